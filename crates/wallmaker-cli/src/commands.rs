//! Subcommand implementations.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use wallmaker_core::{AdjustmentParameters, Catalog, CropRect, Orientation, Session, SessionDefaults, Size};

use crate::args::ExportArgs;
use crate::config::load_defaults;
use crate::listener::LogListener;
use crate::CliError;

/// Run the whole pipeline for one image and return the written path.
pub fn export(catalog: Arc<Catalog>, args: &ExportArgs) -> Result<PathBuf, CliError> {
    let defaults = load_defaults(args.config.as_deref())?;
    let target = resolve_target(&catalog, args, &defaults)?;

    let mut session = Session::with_defaults(catalog, &defaults);
    session.add_listener(LogListener);
    session.load(&args.input)?;

    let adjustments = merge_adjustments(session.adjustments(), args);
    if adjustments != session.adjustments() {
        session.set_adjustments(adjustments);
    }
    if let Some(format) = args.format {
        session.set_output_format(format.to_output_format());
    }
    if let Some(quality) = args.quality {
        session.set_jpeg_quality(quality);
    }

    let crop = match args.crop {
        Some(rect) => rect,
        None if defaults.auto_fit_on_load => session
            .fit_crop_rect(target)
            .ok_or(wallmaker_core::SessionError::NoImageLoaded)?,
        None => {
            let (w, h) = session
                .original_bitmap()
                .map(|b| b.dimensions())
                .unwrap_or_default();
            CropRect::full(w, h)
        }
    };

    log::info!(
        "Exporting {} at {} from crop {} as {}",
        args.input.display(),
        target,
        crop,
        session.output_format()
    );
    Ok(session.export_wallpaper(target, crop)?)
}

/// Target size from `--resolution`, `--preset` or the remembered catalog index.
fn resolve_target(catalog: &Catalog, args: &ExportArgs, defaults: &SessionDefaults) -> Result<Size, CliError> {
    if let Some(size) = args.resolution {
        return Ok(size);
    }
    if let Some(name) = &args.preset {
        return catalog
            .find_resolution(name)
            .map(|r| r.size())
            .ok_or_else(|| CliError::UnknownPreset(name.clone()));
    }
    catalog
        .resolution(defaults.last_resolution_index)
        .map(|r| r.size())
        .ok_or(CliError::ResolutionIndex(defaults.last_resolution_index))
}

fn merge_adjustments(base: AdjustmentParameters, args: &ExportArgs) -> AdjustmentParameters {
    AdjustmentParameters::new(
        args.brightness.unwrap_or(base.brightness),
        args.contrast.unwrap_or(base.contrast),
        args.saturation.unwrap_or(base.saturation),
    )
}

/// `--vertical` wins; otherwise the remembered orientation applies.
pub fn resolution_orientation(vertical: bool, defaults: &SessionDefaults) -> Orientation {
    if vertical || defaults.vertical_orientation {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    }
}

pub fn list_resolutions(catalog: &Catalog, orientation: Orientation, out: &mut impl Write) -> Result<(), CliError> {
    let resolutions = catalog.resolutions_with_orientation(orientation);
    if resolutions.is_empty() {
        writeln!(out, "No {orientation:?} resolutions in the catalog")?;
        return Ok(());
    }

    for r in resolutions {
        writeln!(out, "{:<18} {}", r.name, r.description)?;
    }
    Ok(())
}

pub fn list_formats(catalog: &Catalog, out: &mut impl Write) -> Result<(), CliError> {
    writeln!(out, "Input extensions:")?;
    for (ext, format) in catalog.default_output_mapping() {
        writeln!(out, "  .{ext:<6} -> {format}")?;
    }

    writeln!(out, "Output formats:")?;
    for format in wallmaker_core::OutputFormat::ALL {
        let info = catalog.format_info(format);
        let mut caps = Vec::new();
        if info.supports_quality {
            caps.push("quality");
        }
        if info.supports_transparency {
            caps.push("transparency");
        }
        writeln!(out, "  .{:<6} {} [{}]", info.extension, info.description, caps.join(", "))?;
    }
    Ok(())
}

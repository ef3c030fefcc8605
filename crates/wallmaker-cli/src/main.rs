//! wallmaker - photos to wallpapers from the command line
//!
//! Pipeline: decode -> brightness/contrast/saturation -> crop -> scale to the
//! exact target size -> encode next to the source as `<name>_<W>x<H>.<ext>`.

mod args;
mod commands;
mod config;
mod error;
mod listener;

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use wallmaker_core::Catalog;

use args::{Cli, Command};
use error::CliError;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let catalog = Arc::new(Catalog::new());
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Export(args) => {
            let written = commands::export(catalog, &args)?;
            writeln!(stdout, "{}", written.display())?;
        }
        Command::Resolutions { vertical, config: path } => {
            let defaults = config::load_defaults(path.as_deref())?;
            let orientation = commands::resolution_orientation(vertical, &defaults);
            commands::list_resolutions(&catalog, orientation, &mut stdout)?;
        }
        Command::Formats => {
            commands::list_formats(&catalog, &mut stdout)?;
        }
    }

    Ok(())
}

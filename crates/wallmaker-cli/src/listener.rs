use wallmaker_core::{SessionEvent, SessionListener};

/// Forwards session events to the `log` facade.
#[derive(Debug, Default)]
pub struct LogListener;

impl SessionListener for LogListener {
    fn on_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Loaded { path } => log::info!("Loaded {}", path.display()),
            SessionEvent::Adjusted => log::debug!("Adjustments applied"),
            SessionEvent::Error { message, kind } => log::error!("{kind} error: {message}"),
            SessionEvent::Exported { path } => log::info!("Wrote {}", path.display()),
        }
    }
}

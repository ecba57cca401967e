use notify_rust::{Notification, Timeout};
use tracing::warn;

use super::{completion_message, Cue, Notifier};
use crate::timer::Mode;

pub const APP_NAME: &str = "Tomato";

/// Desktop popup when a phase finishes. Cues are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }

    fn send(summary: &str, body: &str) -> Result<(), Box<dyn std::error::Error>> {
        Notification::new()
            .appname(APP_NAME)
            .summary(summary)
            .body(body)
            .timeout(Timeout::Default)
            .show()?;
        Ok(())
    }
}

impl Notifier for DesktopNotifier {
    fn cue(&self, _cue: Cue) {}

    fn phase_completed(&self, completed: Mode, next: Mode) {
        let summary = format!("{APP_NAME} - {} up next", next.label());
        if let Err(e) = Self::send(&summary, completion_message(completed)) {
            warn!("desktop notification failed: {e}");
        }
    }
}

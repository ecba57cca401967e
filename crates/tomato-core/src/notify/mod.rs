//! Audio and desktop cues.
//!
//! The session host tells a `Notifier` what happened; each notifier decides on
//! its own whether that is worth a sound, a desktop popup, or nothing.

mod bell;
mod desktop;

pub use bell::BellNotifier;
pub use desktop::DesktopNotifier;

use std::time::Duration;

use crate::storage::NotificationsConfig;
use crate::timer::Mode;

/// UI moments that get a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Start,
    Reset,
    Switch,
    Complete,
}

/// A sine tone, offset from the start of its cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration: Duration,
    pub offset: Duration,
}

const fn tone(frequency_hz: u32, duration_ms: u64, offset_ms: u64) -> Tone {
    Tone {
        frequency_hz,
        duration: Duration::from_millis(duration_ms),
        offset: Duration::from_millis(offset_ms),
    }
}

const START_TONES: &[Tone] = &[tone(600, 100, 0)];
const RESET_TONES: &[Tone] = &[tone(400, 100, 0)];
const COMPLETE_TONES: &[Tone] = &[tone(880, 300, 0), tone(1047, 300, 350), tone(1319, 500, 700)];

impl Cue {
    pub fn tones(self) -> &'static [Tone] {
        match self {
            Cue::Start | Cue::Switch => START_TONES,
            Cue::Reset => RESET_TONES,
            Cue::Complete => COMPLETE_TONES,
        }
    }
}

/// Popup text for a finished phase.
pub fn completion_message(completed: Mode) -> &'static str {
    if completed.is_break() {
        "Break over, back to work!"
    } else {
        "Work session over, take a break!"
    }
}

pub trait Notifier {
    fn cue(&self, cue: Cue);
    fn phase_completed(&self, completed: Mode, next: Mode);
}

impl<T: Notifier + ?Sized> Notifier for Box<T> {
    fn cue(&self, cue: Cue) {
        (**self).cue(cue)
    }

    fn phase_completed(&self, completed: Mode, next: Mode) {
        (**self).phase_completed(completed, next)
    }
}

/// Does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn cue(&self, _cue: Cue) {}
    fn phase_completed(&self, _completed: Mode, _next: Mode) {}
}

/// Fans every call out to a list of notifiers.
#[derive(Default)]
pub struct Notifiers {
    inner: Vec<Box<dyn Notifier>>,
}

impl Notifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the set enabled by the user's notification settings.
    pub fn from_config(config: &NotificationsConfig) -> Self {
        let mut set = Self::new();
        if config.sound {
            set.push(BellNotifier::stdout());
        }
        if config.desktop {
            set.push(DesktopNotifier::new());
        }
        set
    }

    pub fn push(&mut self, notifier: impl Notifier + 'static) {
        self.inner.push(Box::new(notifier));
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Notifier for Notifiers {
    fn cue(&self, cue: Cue) {
        for n in &self.inner {
            n.cue(cue);
        }
    }

    fn phase_completed(&self, completed: Mode, next: Mode) {
        for n in &self.inner {
            n.phase_completed(completed, next);
        }
    }
}

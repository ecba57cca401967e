use std::io::Write;
use std::sync::Mutex;

use super::{Cue, Notifier};
use crate::timer::Mode;

const BEL: u8 = 0x07;

/// Rings the terminal bell, once per tone of a cue.
///
/// Terminals cannot play a pitch, so only the tone count survives.
pub struct BellNotifier<W: Write> {
    out: Mutex<W>,
}

impl BellNotifier<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> BellNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn ring(&self, times: usize) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        let bells = vec![BEL; times];
        if let Err(e) = out.write_all(&bells).and_then(|_| out.flush()) {
            tracing::debug!("bell write failed: {e}");
        }
    }
}

impl<W: Write> Notifier for BellNotifier<W> {
    fn cue(&self, cue: Cue) {
        self.ring(cue.tones().len());
    }

    // The Complete cue already rang for this.
    fn phase_completed(&self, _completed: Mode, _next: Mode) {}
}

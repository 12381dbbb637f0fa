// Airmap Caps Word
// One-word caps lock, toggled by the caps tap dance

use std::time::{Duration, Instant};

use crate::key::{codes, is_alpha, is_digit, Key};
use crate::modifier::is_shift;

/// What caps word does with a key while active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapsVerdict {
    /// Emit with a weak shift wrapped around it
    Shift,
    /// Emit untouched, word continues
    Pass,
    /// Word ended: emit untouched and switch off
    Deactivate,
}

/// Classify a key for caps word, independent of the active flag
fn classify(key: Key) -> CapsVerdict {
    if is_alpha(key) {
        CapsVerdict::Shift
    } else if is_digit(key)
        || key == codes::MINUS
        || key == codes::BSPC
        || key == codes::DELETE
        || is_shift(key)
    {
        CapsVerdict::Pass
    } else {
        CapsVerdict::Deactivate
    }
}

/// Caps-word runtime state with an idle timeout.
#[derive(Debug)]
pub struct CapsWord {
    active: bool,
    idle_timeout: Duration,
    deadline: Option<Instant>,
}

impl CapsWord {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            active: false,
            idle_timeout,
            deadline: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.active {
            self.deactivate();
        } else {
            self.active = true;
            self.deadline = Some(now + self.idle_timeout);
        }
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.deadline = None;
    }

    /// Route a key through caps word. Inactive state passes everything.
    pub fn on_key(&mut self, key: Key, now: Instant) -> CapsVerdict {
        if !self.active {
            return CapsVerdict::Pass;
        }
        let verdict = classify(key);
        match verdict {
            CapsVerdict::Deactivate => self.deactivate(),
            _ => self.deadline = Some(now + self.idle_timeout),
        }
        verdict
    }

    /// Switch off after the idle timeout. Returns true if it deactivated.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.active {
            if let Some(deadline) = self.deadline {
                if now >= deadline {
                    self.deactivate();
                    return true;
                }
            }
        }
        false
    }
}

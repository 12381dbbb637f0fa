// Airmap Auto Shift
// Hold a key slightly longer to get its shifted value

use std::time::{Duration, Instant};

use crate::key::{codes, is_alpha, is_digit, Key};
use crate::keycode::Keycode;
use crate::layout::Position;

/// The symbol keys auto shift covers by default
fn is_symbol(key: Key) -> bool {
    matches!(
        key,
        codes::MINUS
            | codes::EQUAL
            | codes::LBRACE
            | codes::RBRACE
            | codes::BSLASH
            | codes::SCLN
            | codes::QUOTE
            | codes::GRAVE
            | codes::COMMA
            | codes::DOT
            | codes::SLASH
    )
}

/// The personal additions: shifted navigation keys
pub fn is_custom_auto_shifted(key: Key) -> bool {
    matches!(
        key,
        codes::LEFT | codes::RIGHT | codes::UP | codes::DOWN | codes::HOME | codes::END
    )
}

/// Whether a resolved keycode participates in auto shift.
///
/// Alphas, the digit row, symbols and Tab (the framework's default
/// classes), extended with the navigation cluster.
pub fn is_auto_shifted(keycode: &Keycode) -> bool {
    match keycode {
        Keycode::Key(k) => {
            is_alpha(*k) || is_digit(*k) || is_symbol(*k) || *k == codes::TAB
                || is_custom_auto_shifted(*k)
        }
        _ => false,
    }
}

/// How a pending press resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoShiftOut {
    /// Released inside the timeout: tap the plain key
    Tap(Key),
    /// Timeout reached while held: press the shifted key
    ShiftedPress(Key),
    /// Release of a key that went shifted
    ShiftedRelease(Key),
    /// Interrupted by another key: press the plain key, keep it down
    PlainPress(Key),
}

#[derive(Debug, Clone, Copy)]
struct PendingShift {
    pos: Position,
    key: Key,
    pressed_at: Instant,
    /// Some(true) once the timeout fired, Some(false) once interrupted
    resolved: Option<bool>,
}

/// Runtime auto-shift state.
///
/// One press is timed at a time; a second eligible press resolves the
/// first as plain, like typing normally does.
#[derive(Debug)]
pub struct AutoShift {
    enabled: bool,
    timeout: Duration,
    pending: Option<PendingShift>,
}

impl AutoShift {
    pub fn new(enabled: bool, timeout: Duration) -> Self {
        Self {
            enabled,
            timeout,
            pending: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the feature; in-flight presses resolve as plain
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_pending(&self, pos: Position) -> bool {
        matches!(self.pending, Some(p) if p.pos == pos && p.resolved.is_none())
    }

    pub fn tracks(&self, pos: Position) -> bool {
        matches!(self.pending, Some(p) if p.pos == pos)
    }

    /// Position still waiting on the timeout, if any
    pub fn pending_pos(&self) -> Option<Position> {
        self.pending
            .and_then(|p| p.resolved.is_none().then_some(p.pos))
    }

    /// Start timing an eligible press
    pub fn on_press(&mut self, pos: Position, key: Key, now: Instant) {
        self.pending = Some(PendingShift {
            pos,
            key,
            pressed_at: now,
            resolved: None,
        });
    }

    /// Resolve the release of a tracked press
    pub fn on_release(&mut self, pos: Position, now: Instant) -> Option<AutoShiftOut> {
        let pending = self.pending?;
        if pending.pos != pos {
            return None;
        }
        self.pending = None;
        match pending.resolved {
            Some(true) => Some(AutoShiftOut::ShiftedRelease(pending.key)),
            Some(false) => {
                // Already down as a plain key; the engine releases it
                None
            }
            None => {
                if now.duration_since(pending.pressed_at) < self.timeout {
                    Some(AutoShiftOut::Tap(pending.key))
                } else {
                    // Raced the poll at the boundary: treat as shifted tap
                    Some(AutoShiftOut::ShiftedPress(pending.key))
                }
            }
        }
    }

    /// Another key was pressed: the timed press becomes a plain press
    pub fn interrupt(&mut self) -> Option<(Position, AutoShiftOut)> {
        let pending = self.pending.as_mut()?;
        if pending.resolved.is_some() {
            return None;
        }
        pending.resolved = Some(false);
        Some((pending.pos, AutoShiftOut::PlainPress(pending.key)))
    }

    /// Fire the shifted press once the timeout elapses
    pub fn poll(&mut self, now: Instant) -> Option<AutoShiftOut> {
        let pending = self.pending.as_mut()?;
        if pending.resolved.is_some() {
            return None;
        }
        if now.duration_since(pending.pressed_at) >= self.timeout {
            pending.resolved = Some(true);
            return Some(AutoShiftOut::ShiftedPress(pending.key));
        }
        None
    }
}

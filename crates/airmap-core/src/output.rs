// Airmap Output Types
// Emissions toward the host and output-side pressed state

use std::collections::HashSet;
use std::fmt;

use smallvec::SmallVec;

use crate::event::Action;
use crate::key::Key;
use crate::keycode::CustomKey;
use crate::modifier::{is_modifier, is_shift, Mods};

/// One unit of output toward the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// HID key edge
    Key { key: Key, action: Action },
    /// Vendor key edge, consumed by the host untouched
    Custom { key: CustomKey, action: Action },
}

impl Emit {
    pub fn press(key: Key) -> Self {
        Emit::Key {
            key,
            action: Action::Press,
        }
    }

    pub fn release(key: Key) -> Self {
        Emit::Key {
            key,
            action: Action::Release,
        }
    }

    pub fn custom(key: CustomKey, action: Action) -> Self {
        Emit::Custom { key, action }
    }
}

impl fmt::Display for Emit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Emit::Key { key, action } => write!(f, "{} {}", action, key),
            Emit::Custom { key, action } => write!(f, "{} {:?}", action, key),
        }
    }
}

/// Press-then-release pair for a single key
pub fn tap(key: Key) -> [Emit; 2] {
    [Emit::press(key), Emit::release(key)]
}

/// Tracks which output keys are currently down.
///
/// The engine updates this for every key emission; the accent macros read
/// the shift state from it, and diagnostics can inspect it between events.
#[derive(Debug, Clone, Default)]
pub struct EmittedKeys {
    down: HashSet<Key>,
}

impl EmittedKeys {
    pub fn new() -> Self {
        Self {
            down: HashSet::new(),
        }
    }

    /// Apply a key emission to the tracked state
    pub fn apply(&mut self, emit: &Emit) {
        if let Emit::Key { key, action } = emit {
            match action {
                Action::Press => {
                    self.down.insert(*key);
                }
                Action::Release => {
                    self.down.remove(key);
                }
            }
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.down.len()
    }

    pub fn is_empty(&self) -> bool {
        self.down.is_empty()
    }

    /// Currently down modifier keys, sorted by code.
    ///
    /// SmallVec keeps the common 0-4 modifier case off the heap.
    pub fn modifier_snapshot(&self) -> SmallVec<[Key; 4]> {
        let mut mods: SmallVec<[Key; 4]> = self
            .down
            .iter()
            .copied()
            .filter(|&k| is_modifier(k))
            .collect();
        mods.sort();
        mods
    }

    /// Currently down shift keys, sorted by code
    pub fn shift_keys(&self) -> SmallVec<[Key; 4]> {
        let mut shifts: SmallVec<[Key; 4]> = self
            .down
            .iter()
            .copied()
            .filter(|&k| is_shift(k))
            .collect();
        shifts.sort();
        shifts
    }

    /// The held modifier set as a mask
    pub fn mods(&self) -> Mods {
        Mods::from_keys(self.down.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::codes;

    #[test]
    fn test_apply_tracks_down_keys() {
        let mut state = EmittedKeys::new();
        state.apply(&Emit::press(codes::A));
        assert!(state.is_down(codes::A));
        state.apply(&Emit::release(codes::A));
        assert!(!state.is_down(codes::A));
        assert!(state.is_empty());
    }

    #[test]
    fn test_custom_emits_do_not_affect_state() {
        let mut state = EmittedKeys::new();
        state.apply(&Emit::custom(CustomKey::BatteryShow, Action::Press));
        assert!(state.is_empty());
    }

    #[test]
    fn test_modifier_snapshot_sorted() {
        let mut state = EmittedKeys::new();
        state.apply(&Emit::press(codes::RALT));
        state.apply(&Emit::press(codes::LCTRL));
        state.apply(&Emit::press(codes::A));
        let snapshot = state.modifier_snapshot();
        assert_eq!(snapshot.as_slice(), &[codes::LCTRL, codes::RALT]);
    }

    #[test]
    fn test_shift_keys_and_mods() {
        let mut state = EmittedKeys::new();
        state.apply(&Emit::press(codes::LSHIFT));
        state.apply(&Emit::press(codes::A));
        assert_eq!(state.shift_keys().as_slice(), &[codes::LSHIFT]);
        assert!(state.mods().is_only_shift());
    }

    #[test]
    fn test_tap_pair() {
        let pair = tap(codes::Q);
        assert_eq!(pair[0], Emit::press(codes::Q));
        assert_eq!(pair[1], Emit::release(codes::Q));
    }
}

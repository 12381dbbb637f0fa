// Airmap Modifier System
// HID modifier bitmask plus modifier-key classification

use std::fmt;

use crate::key::codes;
use crate::Key;

/// A set of held modifiers, one bit per HID modifier.
///
/// Chord keycodes in the layer tables store one of these instead of a list
/// of named modifier objects; the bit layout matches the HID boot report so
/// the host can consume it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Mods(u8);

impl Mods {
    pub const NONE: Mods = Mods(0);
    pub const LCTRL: Mods = Mods(1 << 0);
    pub const LSHIFT: Mods = Mods(1 << 1);
    pub const LALT: Mods = Mods(1 << 2);
    pub const LGUI: Mods = Mods(1 << 3);
    pub const RCTRL: Mods = Mods(1 << 4);
    pub const RSHIFT: Mods = Mods(1 << 5);
    pub const RALT: Mods = Mods(1 << 6);
    pub const RGUI: Mods = Mods(1 << 7);

    /// Ctrl+Shift, the editor "add selection" prefix
    pub const CS: Mods = Mods(Self::LCTRL.0 | Self::LSHIFT.0);
    /// Ctrl+Alt
    pub const LCA: Mods = Mods(Self::LCTRL.0 | Self::LALT.0);
    /// Ctrl+Shift+Alt
    pub const MEH: Mods = Mods(Self::LCTRL.0 | Self::LSHIFT.0 | Self::LALT.0);

    const SHIFT_BITS: u8 = Self::LSHIFT.0 | Self::RSHIFT.0;

    /// Combine two modifier sets
    pub const fn with(self, other: Mods) -> Mods {
        Mods(self.0 | other.0)
    }

    /// Check if all bits of `other` are set in `self`
    pub const fn contains(self, other: Mods) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when at least one shift is held and nothing else is.
    ///
    /// The accent macros use this to decide whether the shift state has to
    /// be lifted around the dead-key sequence.
    pub const fn is_only_shift(self) -> bool {
        self.0 != 0 && self.0 & !Self::SHIFT_BITS == 0
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    /// The modifier keys this mask represents, in press order
    pub fn keys(self) -> Vec<Key> {
        MODIFIER_TABLE
            .iter()
            .filter(|(mask, _)| self.contains(*mask))
            .map(|&(_, code)| Key::from(code))
            .collect()
    }

    /// The modifier bit for a key, if the key is a modifier
    pub fn from_key(key: Key) -> Option<Mods> {
        MODIFIER_TABLE
            .iter()
            .find(|&&(_, code)| code == key.code())
            .map(|&(mask, _)| mask)
    }

    /// Accumulate the mask for a set of held keys, ignoring non-modifiers
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a Key>) -> Mods {
        keys.into_iter()
            .filter_map(|&k| Self::from_key(k))
            .fold(Mods::NONE, Mods::with)
    }

    /// Parse a single modifier alias (Ctrl, Shift, Alt, Gui, AltGr, ...)
    pub fn from_alias(alias: &str) -> Option<Mods> {
        let m = match alias.to_ascii_lowercase().as_str() {
            "ctrl" | "lctrl" | "control" => Mods::LCTRL,
            "rctrl" => Mods::RCTRL,
            "shift" | "lshift" => Mods::LSHIFT,
            "rshift" => Mods::RSHIFT,
            "alt" | "lalt" | "opt" => Mods::LALT,
            "ralt" | "altgr" => Mods::RALT,
            "gui" | "lgui" | "super" | "win" | "cmd" => Mods::LGUI,
            "rgui" => Mods::RGUI,
            "meh" => Mods::MEH,
            _ => return None,
        };
        Some(m)
    }
}

impl fmt::Display for Mods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<&str> = MODIFIER_TABLE
            .iter()
            .filter(|(mask, _)| self.contains(*mask))
            .map(|&(mask, _)| mod_name(mask))
            .collect();
        write!(f, "{}", names.join("+"))
    }
}

/// Bit/key pairs in canonical press order (left block first)
static MODIFIER_TABLE: &[(Mods, u16)] = &[
    (Mods::LCTRL, 29),
    (Mods::LSHIFT, 42),
    (Mods::LALT, 56),
    (Mods::LGUI, 125),
    (Mods::RCTRL, 97),
    (Mods::RSHIFT, 54),
    (Mods::RALT, 100),
    (Mods::RGUI, 126),
];

fn mod_name(mask: Mods) -> &'static str {
    match mask {
        Mods::LCTRL => "LCtrl",
        Mods::LSHIFT => "LShift",
        Mods::LALT => "LAlt",
        Mods::LGUI => "LGui",
        Mods::RCTRL => "RCtrl",
        Mods::RSHIFT => "RShift",
        Mods::RALT => "RAlt",
        Mods::RGUI => "RGui",
        _ => "?",
    }
}

/// All modifier key codes, for the const fast path
const MODIFIER_KEY_CODES: &[u16] = &[
    29, 97, // LEFT_CTRL, RIGHT_CTRL
    42, 54, // LEFT_SHIFT, RIGHT_SHIFT
    56, 100, // LEFT_ALT, RIGHT_ALT
    125, 126, // LEFT_META, RIGHT_META
];

/// Check if a key code is a modifier (O(1)-ish, lock-free, usable in const
/// position and hot loops)
#[inline]
pub const fn is_modifier_code(code: u16) -> bool {
    let mut i = 0;
    while i < MODIFIER_KEY_CODES.len() {
        if MODIFIER_KEY_CODES[i] == code {
            return true;
        }
        i += 1;
    }
    false
}

/// Check if a key is a modifier
pub fn is_modifier(key: Key) -> bool {
    is_modifier_code(key.code())
}

/// True when the key is one of the shift keys
pub fn is_shift(key: Key) -> bool {
    key == codes::LSHIFT || key == codes::RSHIFT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_and_contains() {
        let cs = Mods::LCTRL.with(Mods::LSHIFT);
        assert_eq!(cs, Mods::CS);
        assert!(cs.contains(Mods::LCTRL));
        assert!(cs.contains(Mods::LSHIFT));
        assert!(!cs.contains(Mods::LALT));
        assert!(Mods::MEH.contains(Mods::CS));
    }

    #[test]
    fn test_is_only_shift() {
        assert!(Mods::LSHIFT.is_only_shift());
        assert!(Mods::RSHIFT.is_only_shift());
        assert!(Mods::LSHIFT.with(Mods::RSHIFT).is_only_shift());
        assert!(!Mods::NONE.is_only_shift());
        assert!(!Mods::LSHIFT.with(Mods::LCTRL).is_only_shift());
    }

    #[test]
    fn test_keys_in_press_order() {
        let keys = Mods::MEH.keys();
        assert_eq!(keys, vec![codes::LCTRL, codes::LSHIFT, codes::LALT]);
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Mods::from_key(codes::LCTRL), Some(Mods::LCTRL));
        assert_eq!(Mods::from_key(codes::RALT), Some(Mods::RALT));
        assert_eq!(Mods::from_key(codes::A), None);
    }

    #[test]
    fn test_from_keys() {
        let held = [codes::LSHIFT, codes::A, codes::RALT];
        assert_eq!(Mods::from_keys(&held), Mods::LSHIFT.with(Mods::RALT));
    }

    #[test]
    fn test_from_alias() {
        assert_eq!(Mods::from_alias("Ctrl"), Some(Mods::LCTRL));
        assert_eq!(Mods::from_alias("AltGr"), Some(Mods::RALT));
        assert_eq!(Mods::from_alias("meh"), Some(Mods::MEH));
        assert_eq!(Mods::from_alias("hyper"), None);
    }

    #[test]
    fn test_is_modifier_code_static() {
        assert!(is_modifier_code(29)); // LEFT_CTRL
        assert!(is_modifier_code(100)); // RIGHT_ALT
        assert!(!is_modifier_code(30)); // A
        assert!(!is_modifier_code(57)); // SPACE
    }

    #[test]
    fn test_display() {
        assert_eq!(Mods::CS.to_string(), "LCtrl+LShift");
        assert_eq!(Mods::NONE.to_string(), "none");
    }
}

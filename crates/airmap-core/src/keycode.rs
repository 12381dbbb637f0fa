// Airmap Keycode Model
// Everything a layer-table entry can be

use std::fmt;

use crate::key::Key;
use crate::layout::LayerId;
use crate::modifier::Mods;
use crate::tap_dance::TapDanceId;

/// Which space-cadet shift a table entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

/// Vendor and pointer keys the host consumes directly.
///
/// The engine surfaces these untouched; radio, LED and battery handling
/// stays on the host side, like the board firmware the keymap targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomKey {
    LinkBle1,
    LinkBle2,
    LinkBle3,
    LinkRf,
    SideMode,
    SideHueUp,
    SideSpeedUp,
    SideSpeedDown,
    SideBrightUp,
    SideBrightDown,
    RgbTest,
    RgbMode,
    RgbHueUp,
    RgbSpeedUp,
    RgbSpeedDown,
    RgbBrightUp,
    RgbBrightDown,
    DeviceReset,
    SleepMode,
    BatteryShow,
    BatteryNum,
    ProgButton1,
    WheelUp,
    WheelDown,
    WheelLeft,
    WheelRight,
}

/// A single layer-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keycode {
    /// Plain key
    Key(Key),
    /// Key tapped with shift held
    Shifted(Key),
    /// Key tapped with a modifier chord held
    Chord(Mods, Key),
    /// Tap for the key, hold for a momentary layer
    LayerTap(LayerId, Key),
    /// Tap for the key, hold for a modifier set
    ModTap(Mods, Key),
    /// Hold for shift, tap for the matching paren
    SpaceCadet(Hand),
    /// Layer active while held
    Momentary(LayerId),
    /// Layer toggled on press
    ToggleLayer(LayerId),
    /// Multi-tap/hold key resolved by the tap-dance machinery
    TapDance(TapDanceId),
    /// Host-consumed vendor key
    Custom(CustomKey),
    /// Defer to the next active layer below
    Transparent,
    /// Dead matrix slot / intentionally blank
    NoOp,
}

// Short constructors so the static tables stay close to the original
// keymap's shape.

pub const fn k(key: Key) -> Keycode {
    Keycode::Key(key)
}

pub const fn s(key: Key) -> Keycode {
    Keycode::Shifted(key)
}

pub const fn chord(mods: Mods, key: Key) -> Keycode {
    Keycode::Chord(mods, key)
}

pub const fn c(key: Key) -> Keycode {
    Keycode::Chord(Mods::LCTRL, key)
}

pub const fn a(key: Key) -> Keycode {
    Keycode::Chord(Mods::LALT, key)
}

pub const fn g(key: Key) -> Keycode {
    Keycode::Chord(Mods::LGUI, key)
}

pub const fn cs(key: Key) -> Keycode {
    Keycode::Chord(Mods::CS, key)
}

pub const fn lca(key: Key) -> Keycode {
    Keycode::Chord(Mods::LCA, key)
}

pub const fn meh(key: Key) -> Keycode {
    Keycode::Chord(Mods::MEH, key)
}

pub const fn ralt(key: Key) -> Keycode {
    Keycode::Chord(Mods::RALT, key)
}

pub const fn lt(layer: LayerId, key: Key) -> Keycode {
    Keycode::LayerTap(layer, key)
}

pub const fn mt(mods: Mods, key: Key) -> Keycode {
    Keycode::ModTap(mods, key)
}

pub const fn mo(layer: LayerId) -> Keycode {
    Keycode::Momentary(layer)
}

pub const fn tg(layer: LayerId) -> Keycode {
    Keycode::ToggleLayer(layer)
}

pub const fn td(id: TapDanceId) -> Keycode {
    Keycode::TapDance(id)
}

pub const fn cus(key: CustomKey) -> Keycode {
    Keycode::Custom(key)
}

impl Keycode {
    /// The plain key a tap of this entry produces, if it has one
    pub fn tap_key(&self) -> Option<Key> {
        match self {
            Keycode::Key(k)
            | Keycode::Shifted(k)
            | Keycode::Chord(_, k)
            | Keycode::LayerTap(_, k)
            | Keycode::ModTap(_, k) => Some(*k),
            _ => None,
        }
    }
}

impl fmt::Display for Keycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keycode::Key(k) => write!(f, "{}", k),
            Keycode::Shifted(k) => write!(f, "S({})", k),
            Keycode::Chord(m, k) => write!(f, "{}({})", m, k),
            Keycode::LayerTap(l, k) => write!(f, "LT({},{})", l, k),
            Keycode::ModTap(m, k) => write!(f, "MT({},{})", m, k),
            Keycode::SpaceCadet(Hand::Left) => write!(f, "LSPO"),
            Keycode::SpaceCadet(Hand::Right) => write!(f, "RSPC"),
            Keycode::Momentary(l) => write!(f, "MO({})", l),
            Keycode::ToggleLayer(l) => write!(f, "TG({})", l),
            Keycode::TapDance(id) => write!(f, "TD({:?})", id),
            Keycode::Custom(ck) => write!(f, "{:?}", ck),
            Keycode::Transparent => write!(f, "_______"),
            Keycode::NoOp => write!(f, "XXXXXXX"),
        }
    }
}

// Airmap Key Type
// Key codes for every position the Air75 keymap references

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

include!(concat!(env!("OUT_DIR"), "/key_codes.rs"));

/// Name/code pairs for the keys the keymap uses.
///
/// The first name for a code is its display name; later entries for the
/// same code are parse-only aliases.
static KEY_NAMES: &[(&str, u16)] = &[
    ("ESC", 1),
    ("ESCAPE", 1),
    ("1", 2),
    ("2", 3),
    ("3", 4),
    ("4", 5),
    ("5", 6),
    ("6", 7),
    ("7", 8),
    ("8", 9),
    ("9", 10),
    ("0", 11),
    ("MINUS", 12),
    ("EQUAL", 13),
    ("BACKSPACE", 14),
    ("TAB", 15),
    ("Q", 16),
    ("W", 17),
    ("E", 18),
    ("R", 19),
    ("T", 20),
    ("Y", 21),
    ("U", 22),
    ("I", 23),
    ("O", 24),
    ("P", 25),
    ("LEFT_BRACE", 26),
    ("RIGHT_BRACE", 27),
    ("ENTER", 28),
    ("LEFT_CTRL", 29),
    ("A", 30),
    ("S", 31),
    ("D", 32),
    ("F", 33),
    ("G", 34),
    ("H", 35),
    ("J", 36),
    ("K", 37),
    ("L", 38),
    ("SEMICOLON", 39),
    ("APOSTROPHE", 40),
    ("GRAVE", 41),
    ("LEFT_SHIFT", 42),
    ("BACKSLASH", 43),
    ("Z", 44),
    ("X", 45),
    ("C", 46),
    ("V", 47),
    ("B", 48),
    ("N", 49),
    ("M", 50),
    ("COMMA", 51),
    ("DOT", 52),
    ("SLASH", 53),
    ("RIGHT_SHIFT", 54),
    ("KPASTERISK", 55),
    ("LEFT_ALT", 56),
    ("SPACE", 57),
    ("CAPSLOCK", 58),
    ("F1", 59),
    ("F2", 60),
    ("F3", 61),
    ("F4", 62),
    ("F5", 63),
    ("F6", 64),
    ("F7", 65),
    ("F8", 66),
    ("F9", 67),
    ("F10", 68),
    ("NUMLOCK", 69),
    ("KPMINUS", 74),
    ("KPPLUS", 78),
    ("F11", 87),
    ("F12", 88),
    ("KPENTER", 96),
    ("RIGHT_CTRL", 97),
    ("KPSLASH", 98),
    ("SYSRQ", 99),
    ("PRINT", 99),
    ("RIGHT_ALT", 100),
    ("HOME", 102),
    ("UP", 103),
    ("PAGE_UP", 104),
    ("LEFT", 105),
    ("RIGHT", 106),
    ("END", 107),
    ("DOWN", 108),
    ("PAGE_DOWN", 109),
    ("INSERT", 110),
    ("DELETE", 111),
    ("MUTE", 113),
    ("VOLUMEDOWN", 114),
    ("VOLUMEUP", 115),
    ("LEFT_META", 125),
    ("RIGHT_META", 126),
    ("FIND", 136),
    ("WWW", 150),
    ("SEARCH", 150),
    ("NEXTSONG", 163),
    ("PLAYPAUSE", 164),
    ("PREVIOUSSONG", 165),
    ("BRIGHTNESSDOWN", 224),
    ("BRIGHTNESSUP", 225),
];

/// Display name for a key code
pub fn key_name(code: u16) -> &'static str {
    static BY_CODE: OnceLock<HashMap<u16, &'static str>> = OnceLock::new();
    BY_CODE
        .get_or_init(|| {
            let mut map = HashMap::new();
            for &(name, code) in KEY_NAMES {
                map.entry(code).or_insert(name);
            }
            map
        })
        .get(&code)
        .copied()
        .unwrap_or("UNKNOWN")
}

/// Try to parse a key name to a key code
pub fn key_from_name(name: &str) -> Option<Key> {
    let name_upper = name.to_uppercase();
    static BY_NAME: OnceLock<HashMap<&'static str, u16>> = OnceLock::new();
    BY_NAME
        .get_or_init(|| KEY_NAMES.iter().copied().collect())
        .get(name_upper.as_str())
        .map(|&code| Key::from(code))
}

/// Named key constants used by the layer tables.
///
/// Single-letter and digit keys keep the spelling of the physical legend so
/// the tables in `keymap.rs` read like the board.
pub mod codes {
    use super::Key;

    pub const ESC: Key = Key(1);
    pub const N1: Key = Key(2);
    pub const N2: Key = Key(3);
    pub const N3: Key = Key(4);
    pub const N4: Key = Key(5);
    pub const N5: Key = Key(6);
    pub const N6: Key = Key(7);
    pub const N7: Key = Key(8);
    pub const N8: Key = Key(9);
    pub const N9: Key = Key(10);
    pub const N0: Key = Key(11);
    pub const MINUS: Key = Key(12);
    pub const EQUAL: Key = Key(13);
    pub const BSPC: Key = Key(14);
    pub const TAB: Key = Key(15);
    pub const Q: Key = Key(16);
    pub const W: Key = Key(17);
    pub const E: Key = Key(18);
    pub const R: Key = Key(19);
    pub const T: Key = Key(20);
    pub const Y: Key = Key(21);
    pub const U: Key = Key(22);
    pub const I: Key = Key(23);
    pub const O: Key = Key(24);
    pub const P: Key = Key(25);
    pub const LBRACE: Key = Key(26);
    pub const RBRACE: Key = Key(27);
    pub const ENTER: Key = Key(28);
    pub const LCTRL: Key = Key(29);
    pub const A: Key = Key(30);
    pub const S: Key = Key(31);
    pub const D: Key = Key(32);
    pub const F: Key = Key(33);
    pub const G: Key = Key(34);
    pub const H: Key = Key(35);
    pub const J: Key = Key(36);
    pub const K: Key = Key(37);
    pub const L: Key = Key(38);
    pub const SCLN: Key = Key(39);
    pub const QUOTE: Key = Key(40);
    pub const GRAVE: Key = Key(41);
    pub const LSHIFT: Key = Key(42);
    pub const BSLASH: Key = Key(43);
    pub const Z: Key = Key(44);
    pub const X: Key = Key(45);
    pub const C: Key = Key(46);
    pub const V: Key = Key(47);
    pub const B: Key = Key(48);
    pub const N: Key = Key(49);
    pub const M: Key = Key(50);
    pub const COMMA: Key = Key(51);
    pub const DOT: Key = Key(52);
    pub const SLASH: Key = Key(53);
    pub const RSHIFT: Key = Key(54);
    pub const KP_ASTERISK: Key = Key(55);
    pub const LALT: Key = Key(56);
    pub const SPACE: Key = Key(57);
    pub const CAPS: Key = Key(58);
    pub const F1: Key = Key(59);
    pub const F2: Key = Key(60);
    pub const F3: Key = Key(61);
    pub const F4: Key = Key(62);
    pub const F5: Key = Key(63);
    pub const F6: Key = Key(64);
    pub const F7: Key = Key(65);
    pub const F8: Key = Key(66);
    pub const F9: Key = Key(67);
    pub const F10: Key = Key(68);
    pub const NUMLOCK: Key = Key(69);
    pub const KP_MINUS: Key = Key(74);
    pub const KP_PLUS: Key = Key(78);
    pub const F11: Key = Key(87);
    pub const F12: Key = Key(88);
    pub const RCTRL: Key = Key(97);
    pub const KP_SLASH: Key = Key(98);
    pub const PRINT: Key = Key(99);
    pub const RALT: Key = Key(100);
    pub const HOME: Key = Key(102);
    pub const UP: Key = Key(103);
    pub const PAGE_UP: Key = Key(104);
    pub const LEFT: Key = Key(105);
    pub const RIGHT: Key = Key(106);
    pub const END: Key = Key(107);
    pub const DOWN: Key = Key(108);
    pub const PAGE_DOWN: Key = Key(109);
    pub const INSERT: Key = Key(110);
    pub const DELETE: Key = Key(111);
    pub const MUTE: Key = Key(113);
    pub const VOL_DOWN: Key = Key(114);
    pub const VOL_UP: Key = Key(115);
    pub const LGUI: Key = Key(125);
    pub const RGUI: Key = Key(126);
    pub const FIND: Key = Key(136);
    pub const WWW_SEARCH: Key = Key(150);
    pub const NEXT_TRACK: Key = Key(163);
    pub const PLAY_PAUSE: Key = Key(164);
    pub const PREV_TRACK: Key = Key(165);
    pub const BRIGHT_DOWN: Key = Key(224);
    pub const BRIGHT_UP: Key = Key(225);
}

/// True for the alpha keys A-Z
pub fn is_alpha(key: Key) -> bool {
    matches!(key.code(), 16..=25 | 30..=38 | 44..=50)
}

/// True for the digit-row keys 1-0
pub fn is_digit(key: Key) -> bool {
    matches!(key.code(), 2..=11)
}

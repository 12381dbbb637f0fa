// Airmap Keymap
// The seven layers of the Air75 V2 personal layout

use crate::key::codes::*;
use crate::keycode::{
    a, c, cs, cus, g, k, lca, lt, meh, mo, mt, ralt, s, td, CustomKey::*, Hand, Keycode,
};
use crate::layout::{layout_75_ansi, LayerGrid, LayerId, LayerState, Position, LAYER_COUNT};
use crate::modifier::Mods;
use crate::tap_dance::TapDanceId::*;

/// Base layer: the custom letter arrangement
pub const BASE: LayerId = LayerId(0);
/// Symbols on the left hand, numpad on the right; held space
pub const SYMBOLS: LayerId = LayerId(1);
/// Accent dance keys on the home letters
pub const ACCENTS: LayerId = LayerId(2);
/// Navigation and editor chords; held caps key
pub const NAV: LayerId = LayerId(3);
/// Standard QWERTY for games, toggled by combo
pub const QWERTY: LayerId = LayerId(4);
/// The custom arrangement with plain modifiers everywhere
pub const PLAIN: LayerId = LayerId(5);
/// Media, radio link, LED and battery keys
pub const SYSTEM: LayerId = LayerId(6);

const TRNS: Keycode = Keycode::Transparent;
const XXXX: Keycode = Keycode::NoOp;
const LSPO: Keycode = Keycode::SpaceCadet(Hand::Left);
const RSPC: Keycode = Keycode::SpaceCadet(Hand::Right);

/// The full layer stack, matrix-placed
pub static LAYERS: [LayerGrid; LAYER_COUNT] = [
    // BASE
    layout_75_ansi([
        k(ESC), k(F1), k(F2), k(F3), k(F4), k(F5), k(F6), k(F7), k(F8), k(F9), k(F10), k(F11), k(F12), k(PRINT), k(INSERT), k(DELETE),
        k(GRAVE), k(N1), k(N2), k(N3), k(N4), k(N5), k(N6), k(N7), k(N8), k(N9), k(N0), k(MINUS), k(EQUAL), k(BSPC), k(PAGE_UP),
        k(TAB), k(Q), k(D), k(T), k(R), k(W), k(Y), k(P), k(U), k(L), k(SCLN), k(LBRACE), k(RBRACE), k(BSLASH), k(PAGE_DOWN),
        td(CapsWord), k(A), k(S), k(E), k(F), k(G), k(H), k(J), k(I), k(O), k(N), k(QUOTE), k(ENTER), k(HOME),
        LSPO, k(Z), k(X), k(C), k(V), k(K), k(B), k(M), k(COMMA), k(DOT), k(SLASH), RSPC, k(UP), k(END),
        k(LCTRL), k(LGUI), k(LALT), lt(SYMBOLS, SPACE), mo(ACCENTS), mo(SYSTEM), k(RCTRL), k(LEFT), k(DOWN), k(RIGHT),
    ]),
    // SYMBOLS
    layout_75_ansi([
        TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS,
        TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS,
        TRNS, s(N7), s(BSLASH), s(LBRACE), s(RBRACE), XXXX, k(KP_ASTERISK), k(N7), k(N8), k(N9), k(COMMA), XXXX, XXXX, TRNS, TRNS,
        TRNS, s(COMMA), s(DOT), s(N9), s(N0), k(MINUS), k(KP_MINUS), k(N4), k(N5), k(N6), k(N0), k(EQUAL), TRNS, TRNS,
        TRNS, XXXX, k(LBRACE), k(RBRACE), XXXX, k(KP_SLASH), k(KP_PLUS), k(N1), k(N2), k(N3), k(DOT), TRNS, TRNS, TRNS,
        TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS,
    ]),
    // ACCENTS
    layout_75_ansi([
        TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS,
        TRNS, TRNS, TRNS, TRNS, ralt(N5), TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS,
        TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, td(AccentU), TRNS, TRNS, TRNS, TRNS, TRNS, TRNS,
        TRNS, td(AccentA), TRNS, td(AccentE), TRNS, TRNS, TRNS, TRNS, td(AccentI), td(AccentO), TRNS, TRNS, TRNS, TRNS,
        TRNS, TRNS, TRNS, ralt(C), TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS,
        TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS,
    ]),
    // NAV
    layout_75_ansi([
        TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS,
        TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS,
        mt(Mods::LCTRL, TAB), TRNS, lca(J), c(D), c(Y), a(INSERT), XXXX, XXXX, k(UP), XXXX, XXXX, XXXX, XXXX, TRNS, TRNS,
        TRNS, TRNS, cs(N), meh(N), cs(F), a(J), k(HOME), k(LEFT), k(DOWN), k(RIGHT), k(END), XXXX, TRNS, TRNS,
        TRNS, lca(U), lca(B), cus(WheelLeft), cus(WheelRight), XXXX, cus(WheelUp), cus(WheelDown), XXXX, XXXX, XXXX, TRNS, TRNS, TRNS,
        TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS,
    ]),
    // QWERTY
    layout_75_ansi([
        k(ESC), k(F1), k(F2), k(F3), k(F4), k(F5), k(F6), k(F7), k(F8), k(F9), k(F10), k(F11), k(F12), k(PRINT), k(INSERT), k(DELETE),
        k(GRAVE), k(N1), k(N2), k(N3), k(N4), k(N5), k(N6), k(N7), k(N8), k(N9), k(N0), k(MINUS), k(EQUAL), k(BSPC), k(PAGE_UP),
        k(TAB), k(Q), k(W), k(E), k(R), k(T), k(Y), k(U), k(I), k(O), k(P), k(LBRACE), k(RBRACE), k(BSLASH), k(PAGE_DOWN),
        k(CAPS), k(A), k(S), k(D), k(F), k(G), k(H), k(J), k(K), k(L), k(SCLN), k(QUOTE), k(ENTER), k(HOME),
        k(LSHIFT), k(Z), k(X), k(C), k(V), k(B), k(N), k(M), k(COMMA), k(DOT), k(SLASH), k(RSHIFT), k(UP), k(END),
        k(LCTRL), k(LGUI), k(LALT), k(SPACE), k(RALT), mo(SYSTEM), k(RCTRL), k(LEFT), k(DOWN), k(RIGHT),
    ]),
    // PLAIN
    layout_75_ansi([
        k(ESC), k(F1), k(F2), k(F3), k(F4), k(F5), k(F6), k(F7), k(F8), k(F9), k(F10), k(F11), k(F12), k(PRINT), k(INSERT), k(DELETE),
        k(GRAVE), k(N1), k(N2), k(N3), k(N4), k(N5), k(N6), k(N7), k(N8), k(N9), k(N0), k(MINUS), k(EQUAL), k(BSPC), k(PAGE_UP),
        k(TAB), k(Q), k(D), k(T), k(R), k(W), k(Y), k(P), k(U), k(L), k(SCLN), k(LBRACE), k(RBRACE), k(BSLASH), k(PAGE_DOWN),
        k(CAPS), k(A), k(S), k(E), k(F), k(G), k(H), k(J), k(I), k(O), k(N), k(QUOTE), k(ENTER), k(HOME),
        k(LSHIFT), k(Z), k(X), k(C), k(V), k(K), k(B), k(M), k(COMMA), k(DOT), k(SLASH), k(RSHIFT), k(UP), k(END),
        k(LCTRL), k(LGUI), k(LALT), k(SPACE), k(RALT), mo(SYSTEM), k(RCTRL), k(LEFT), k(DOWN), k(RIGHT),
    ]),
    // SYSTEM
    layout_75_ansi([
        k(NUMLOCK), k(BRIGHT_DOWN), k(BRIGHT_UP), k(WWW_SEARCH), k(FIND), cus(ProgButton1), g(L), k(PREV_TRACK), k(PLAY_PAUSE), k(NEXT_TRACK), k(MUTE), k(VOL_DOWN), k(VOL_UP), TRNS, cus(SideMode), cus(SideHueUp),
        TRNS, cus(LinkBle1), cus(LinkBle2), cus(LinkBle3), cus(LinkRf), TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, cus(SideSpeedUp),
        TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, cus(DeviceReset), cus(SleepMode), cus(BatteryShow), cus(SideSpeedDown),
        TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, cus(SideBrightUp),
        TRNS, TRNS, TRNS, cus(RgbTest), TRNS, cus(BatteryNum), TRNS, TRNS, cus(RgbSpeedDown), cus(RgbSpeedUp), TRNS, TRNS, cus(RgbBrightUp), cus(SideBrightDown),
        TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, cus(RgbMode), cus(RgbBrightDown), cus(RgbHueUp),
    ]),
];

/// The layer stack with transparent-fallthrough resolution.
#[derive(Debug, Clone, Copy)]
pub struct Keymap {
    layers: &'static [LayerGrid; LAYER_COUNT],
}

impl Keymap {
    pub fn new() -> Self {
        Self { layers: &LAYERS }
    }

    pub fn layer(&self, layer: LayerId) -> &LayerGrid {
        &self.layers[layer.index()]
    }

    pub fn keycode_at(&self, layer: LayerId, pos: Position) -> Keycode {
        self.layers[layer.index()][pos.row as usize][pos.col as usize]
    }

    /// Resolve a matrix position against the active layer stack.
    ///
    /// The highest active layer wins; transparent entries defer to the next
    /// active layer below, down to the default layer.
    pub fn resolve(&self, pos: Position, state: &LayerState) -> Keycode {
        for layer in state.highest_first() {
            let kc = self.keycode_at(layer, pos);
            if kc != Keycode::Transparent {
                return kc;
            }
        }
        Keycode::NoOp
    }

    /// First matrix position carrying a keycode on a layer
    pub fn position_of(&self, layer: LayerId, keycode: Keycode) -> Option<Position> {
        let grid = self.layer(layer);
        for (row, cols) in grid.iter().enumerate() {
            for (col, kc) in cols.iter().enumerate() {
                if *kc == keycode {
                    return Some(Position::new(row as u8, col as u8));
                }
            }
        }
        None
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_home_row() {
        let keymap = Keymap::new();
        // The custom arrangement: A S E F G / H J I O N
        let row = &keymap.layer(BASE)[3];
        assert_eq!(row[1], k(A));
        assert_eq!(row[3], k(E));
        assert_eq!(row[8], k(I));
        assert_eq!(row[10], k(N));
        assert_eq!(row[0], td(CapsWord));
    }

    #[test]
    fn test_resolve_falls_through_to_base() {
        let keymap = Keymap::new();
        let mut state = LayerState::new();
        state.layer_on(ACCENTS);
        // Q stays Q on the accent layer (transparent there)
        let q = keymap.position_of(BASE, k(Q)).unwrap();
        assert_eq!(keymap.resolve(q, &state), k(Q));
        // A becomes the accent dance
        let a_pos = keymap.position_of(BASE, k(A)).unwrap();
        assert_eq!(keymap.resolve(a_pos, &state), td(AccentA));
    }

    #[test]
    fn test_resolve_game_layer_shadows_base() {
        let keymap = Keymap::new();
        let mut state = LayerState::new();
        state.layer_toggle(QWERTY);
        // The D position of the custom layout types W in game mode
        let d_pos = keymap.position_of(BASE, k(D)).unwrap();
        assert_eq!(keymap.resolve(d_pos, &state), k(W));
        // Space is a plain space, no layer-tap
        let spc = keymap.position_of(BASE, lt(SYMBOLS, SPACE)).unwrap();
        assert_eq!(keymap.resolve(spc, &state), k(SPACE));
    }

    #[test]
    fn test_accent_layer_dance_positions() {
        let keymap = Keymap::new();
        for (dance, letter) in [
            (td(AccentA), k(A)),
            (td(AccentE), k(E)),
            (td(AccentI), k(I)),
            (td(AccentO), k(O)),
            (td(AccentU), k(U)),
        ] {
            let pos = keymap.position_of(ACCENTS, dance).unwrap();
            assert_eq!(
                keymap.keycode_at(BASE, pos),
                letter,
                "dance {} sits on its letter",
                dance
            );
        }
    }

    #[test]
    fn test_symbols_layer_numpad_block() {
        let keymap = Keymap::new();
        // U/I/L home positions carry the 8-5-... numpad block
        let u_pos = keymap.position_of(BASE, k(U)).unwrap();
        assert_eq!(keymap.keycode_at(SYMBOLS, u_pos), k(N8));
        let i_pos = keymap.position_of(BASE, k(I)).unwrap();
        assert_eq!(keymap.keycode_at(SYMBOLS, i_pos), k(N5));
    }

    #[test]
    fn test_qwerty_layer_is_opaque() {
        let keymap = Keymap::new();
        for row in keymap.layer(QWERTY) {
            for kc in row {
                assert_ne!(*kc, Keycode::Transparent);
            }
        }
    }

    #[test]
    fn test_plain_differs_from_base_only_in_tap_holds() {
        let keymap = Keymap::new();
        let mut diffs = Vec::new();
        for row in 0..keymap.layer(BASE).len() {
            for col in 0..keymap.layer(BASE)[row].len() {
                let pos = Position::new(row as u8, col as u8);
                let base = keymap.keycode_at(BASE, pos);
                let plain = keymap.keycode_at(PLAIN, pos);
                if base != plain {
                    diffs.push((base, plain));
                }
            }
        }
        assert_eq!(
            diffs,
            vec![
                (td(CapsWord), k(CAPS)),
                (LSPO, k(LSHIFT)),
                (RSPC, k(RSHIFT)),
                (lt(SYMBOLS, SPACE), k(SPACE)),
                (mo(ACCENTS), k(RALT)),
            ]
        );
    }

    #[test]
    fn test_system_layer_entries() {
        let keymap = Keymap::new();
        let grid = keymap.layer(SYSTEM);
        assert_eq!(grid[0][0], k(NUMLOCK));
        assert_eq!(grid[0][6], g(L));
        assert_eq!(grid[1][1], cus(LinkBle1));
        assert_eq!(grid[2][11], cus(DeviceReset));
    }

    #[test]
    fn test_every_dance_reachable() {
        use crate::tap_dance::TapDanceId;
        let keymap = Keymap::new();
        for id in TapDanceId::ALL {
            let layer = if id == TapDanceId::CapsWord { BASE } else { ACCENTS };
            assert!(
                keymap.position_of(layer, td(id)).is_some(),
                "{:?} missing from its layer",
                id
            );
        }
    }
}

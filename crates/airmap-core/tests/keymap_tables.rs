// Airmap Keymap Table Checks
//
// Structural invariants of the seven layers, checked against the layout
// the board actually carries.

use airmap_core::combos::COMBOS;
use airmap_core::key::codes;
use airmap_core::keycode::{cus, k, lt, mo, td, CustomKey, Keycode};
use airmap_core::keymap::{self, Keymap, LAYERS};
use airmap_core::layout::{LayerState, Position, LAYER_COUNT, MATRIX_COLS, MATRIX_ROWS};
use airmap_core::tap_dance::TapDanceId;

#[test]
fn seven_layers_of_matrix_size() {
    assert_eq!(LAYERS.len(), LAYER_COUNT);
    for grid in &LAYERS {
        assert_eq!(grid.len(), MATRIX_ROWS);
        for row in grid.iter() {
            assert_eq!(row.len(), MATRIX_COLS);
        }
    }
}

#[test]
fn base_layer_has_no_transparent_or_padding_gaps() {
    let keymap = Keymap::new();
    let state = LayerState::new();
    // Every physical slot resolves to something concrete on base
    for pos in airmap_core::layout::LAYOUT_75_ANSI {
        let kc = keymap.resolve(pos, &state);
        assert_ne!(kc, Keycode::Transparent, "transparent at {}", pos);
        assert_ne!(kc, Keycode::NoOp, "gap at {}", pos);
    }
}

#[test]
fn combo_keys_sit_on_the_base_layer() {
    let keymap = Keymap::new();
    for combo in COMBOS {
        for &key in combo.keys {
            assert!(
                keymap.position_of(keymap::BASE, k(key)).is_some(),
                "{} missing from base",
                key
            );
        }
    }
}

#[test]
fn dance_keys_match_the_original_placement() {
    let keymap = Keymap::new();
    // Caps dance replaces the caps lock key
    let caps = keymap.position_of(keymap::BASE, td(TapDanceId::CapsWord)).unwrap();
    assert_eq!(caps, Position::new(3, 0));
    // Accent dances live on the accent layer over their letters
    let a = keymap.position_of(keymap::ACCENTS, td(TapDanceId::AccentA)).unwrap();
    assert_eq!(keymap.keycode_at(keymap::BASE, a), k(codes::A));
    let u = keymap.position_of(keymap::ACCENTS, td(TapDanceId::AccentU)).unwrap();
    assert_eq!(keymap.keycode_at(keymap::BASE, u), k(codes::U));
}

#[test]
fn accent_layer_carries_euro_and_cedilla() {
    let keymap = Keymap::new();
    let n4 = keymap.position_of(keymap::BASE, k(codes::N4)).unwrap();
    assert_eq!(
        keymap.keycode_at(keymap::ACCENTS, n4),
        Keycode::Chord(airmap_core::Mods::RALT, codes::N5)
    );
    let c = keymap.position_of(keymap::BASE, k(codes::C)).unwrap();
    assert_eq!(
        keymap.keycode_at(keymap::ACCENTS, c),
        Keycode::Chord(airmap_core::Mods::RALT, codes::C)
    );
}

#[test]
fn system_layer_wins_over_accents_when_both_held() {
    let keymap = Keymap::new();
    let mut state = LayerState::new();
    state.layer_on(keymap::ACCENTS);
    state.layer_on(keymap::SYSTEM);

    // The system layer is transparent over A, so the accent dance shows
    let a = keymap.position_of(keymap::BASE, k(codes::A)).unwrap();
    assert_eq!(keymap.resolve(a, &state), td(TapDanceId::AccentA));

    // Where the system layer is concrete it shadows everything
    let one = keymap.position_of(keymap::BASE, k(codes::N1)).unwrap();
    assert_eq!(keymap.resolve(one, &state), cus(CustomKey::LinkBle1));
}

#[test]
fn fn_keys_reach_the_system_layer() {
    let keymap = Keymap::new();
    assert!(keymap.position_of(keymap::BASE, mo(keymap::SYSTEM)).is_some());
    assert!(keymap.position_of(keymap::QWERTY, mo(keymap::SYSTEM)).is_some());
}

#[test]
fn game_layer_restores_standard_typing() {
    let keymap = Keymap::new();
    let mut state = LayerState::new();
    state.layer_toggle(keymap::QWERTY);

    // No tap-hold keys anywhere in game mode
    for row in keymap.layer(keymap::QWERTY) {
        for kc in row {
            assert!(
                !matches!(
                    kc,
                    Keycode::LayerTap(..)
                        | Keycode::ModTap(..)
                        | Keycode::SpaceCadet(_)
                        | Keycode::TapDance(_)
                ),
                "tap-hold {} in game layer",
                kc
            );
        }
    }
    // Space is plain space
    let space = keymap
        .position_of(keymap::BASE, lt(keymap::SYMBOLS, codes::SPACE))
        .unwrap();
    assert_eq!(keymap.resolve(space, &state), k(codes::SPACE));
}

#[test]
fn custom_keys_only_on_nav_and_system() {
    let keymap = Keymap::new();
    for layer in [keymap::BASE, keymap::SYMBOLS, keymap::ACCENTS, keymap::QWERTY, keymap::PLAIN] {
        for row in keymap.layer(layer) {
            for kc in row {
                assert!(
                    !matches!(kc, Keycode::Custom(_)),
                    "custom key {} on layer {}",
                    kc,
                    layer
                );
            }
        }
    }
    // And the system layer carries the radio link selectors
    for custom in [
        CustomKey::LinkBle1,
        CustomKey::LinkBle2,
        CustomKey::LinkBle3,
        CustomKey::LinkRf,
        CustomKey::DeviceReset,
        CustomKey::SleepMode,
    ] {
        assert!(
            keymap.position_of(keymap::SYSTEM, cus(custom)).is_some(),
            "{:?} missing from system layer",
            custom
        );
    }
}

#[test]
fn symbols_layer_left_hand_pairs() {
    let keymap = Keymap::new();
    // The left hand carries bracket/angle pairs under the home position
    let a = keymap.position_of(keymap::BASE, k(codes::A)).unwrap();
    assert_eq!(keymap.keycode_at(keymap::SYMBOLS, a), Keycode::Shifted(codes::COMMA));
    let s = keymap.position_of(keymap::BASE, k(codes::S)).unwrap();
    assert_eq!(keymap.keycode_at(keymap::SYMBOLS, s), Keycode::Shifted(codes::DOT));
    let e = keymap.position_of(keymap::BASE, k(codes::E)).unwrap();
    assert_eq!(keymap.keycode_at(keymap::SYMBOLS, e), Keycode::Shifted(codes::N9));
}

// Airmap Physical Layout
// Matrix geometry for the Air75 V2 and the layer activation stack

use std::fmt;

use crate::keycode::Keycode;

/// Electrical matrix rows
pub const MATRIX_ROWS: usize = 6;
/// Electrical matrix columns
pub const MATRIX_COLS: usize = 16;
/// Physical keys on the 75% ANSI board
pub const PHYSICAL_KEYS: usize = 84;
/// Number of layers the keymap defines
pub const LAYER_COUNT: usize = 7;

/// Keys per physical row, top to bottom
const ROW_KEYS: [usize; MATRIX_ROWS] = [16, 15, 15, 14, 14, 10];

/// A slot in the electrical matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// A layer index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct LayerId(pub u8);

impl LayerId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// One layer's worth of matrix entries
pub type LayerGrid = [[Keycode; MATRIX_COLS]; MATRIX_ROWS];

/// Matrix slot of each of the 84 physical keys, in reading order.
///
/// This plays the role of the board's LAYOUT macro: layer tables are written
/// as a flat list of 84 entries and placed into the matrix through it.
pub const LAYOUT_75_ANSI: [Position; PHYSICAL_KEYS] = build_layout();

const fn build_layout() -> [Position; PHYSICAL_KEYS] {
    let mut slots = [Position::new(0, 0); PHYSICAL_KEYS];
    let mut i = 0;
    let mut row = 0;
    while row < MATRIX_ROWS {
        let mut col = 0;
        while col < ROW_KEYS[row] {
            slots[i] = Position::new(row as u8, col as u8);
            i += 1;
            col += 1;
        }
        row += 1;
    }
    slots
}

/// Place a flat 84-entry key list into the electrical matrix.
///
/// Matrix slots with no physical key get `Keycode::NoOp`.
pub const fn layout_75_ansi(keys: [Keycode; PHYSICAL_KEYS]) -> LayerGrid {
    let mut grid = [[Keycode::NoOp; MATRIX_COLS]; MATRIX_ROWS];
    let mut i = 0;
    while i < PHYSICAL_KEYS {
        let pos = LAYOUT_75_ANSI[i];
        grid[pos.row as usize][pos.col as usize] = keys[i];
        i += 1;
    }
    grid
}

/// Runtime layer activation state.
///
/// The default layer is always active; higher layers stack on top through
/// momentary holds and toggles, and resolution walks from the highest
/// active layer down.
#[derive(Debug, Clone)]
pub struct LayerState {
    default_layer: LayerId,
    active: u8,
}

impl LayerState {
    pub fn new() -> Self {
        Self {
            default_layer: LayerId(0),
            active: 0,
        }
    }

    pub fn default_layer(&self) -> LayerId {
        self.default_layer
    }

    pub fn layer_on(&mut self, layer: LayerId) {
        self.active |= 1 << layer.0;
    }

    pub fn layer_off(&mut self, layer: LayerId) {
        self.active &= !(1 << layer.0);
    }

    pub fn layer_toggle(&mut self, layer: LayerId) {
        self.active ^= 1 << layer.0;
    }

    pub fn is_on(&self, layer: LayerId) -> bool {
        layer == self.default_layer || self.active & (1 << layer.0) != 0
    }

    /// Active layers from highest to lowest, the resolution order
    pub fn highest_first(&self) -> impl Iterator<Item = LayerId> + '_ {
        (0..LAYER_COUNT as u8)
            .rev()
            .map(LayerId)
            .filter(|&l| self.is_on(l))
    }
}

impl Default for LayerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_placement() {
        // 84 physical keys, no duplicates
        assert_eq!(LAYOUT_75_ANSI.len(), PHYSICAL_KEYS);
        for (i, a) in LAYOUT_75_ANSI.iter().enumerate() {
            for b in &LAYOUT_75_ANSI[i + 1..] {
                assert_ne!(a, b);
            }
        }
        // First key of each physical row lands at column 0
        assert_eq!(LAYOUT_75_ANSI[0], Position::new(0, 0));
        assert_eq!(LAYOUT_75_ANSI[16], Position::new(1, 0));
        assert_eq!(LAYOUT_75_ANSI[31], Position::new(2, 0));
    }

    #[test]
    fn test_layout_pads_with_noop() {
        let grid = layout_75_ansi([Keycode::Transparent; PHYSICAL_KEYS]);
        // Bottom row has 10 physical keys; the rest of the row is padding
        assert_eq!(grid[5][9], Keycode::Transparent);
        assert_eq!(grid[5][10], Keycode::NoOp);
        assert_eq!(grid[5][15], Keycode::NoOp);
    }

    #[test]
    fn test_layer_state_stack() {
        let mut state = LayerState::new();
        assert!(state.is_on(LayerId(0)));
        assert!(!state.is_on(LayerId(2)));

        state.layer_on(LayerId(2));
        assert!(state.is_on(LayerId(2)));
        state.layer_off(LayerId(2));
        assert!(!state.is_on(LayerId(2)));

        state.layer_toggle(LayerId(4));
        assert!(state.is_on(LayerId(4)));
        state.layer_toggle(LayerId(4));
        assert!(!state.is_on(LayerId(4)));
    }

    #[test]
    fn test_highest_first_order() {
        let mut state = LayerState::new();
        state.layer_on(LayerId(2));
        state.layer_on(LayerId(6));
        let order: Vec<LayerId> = state.highest_first().collect();
        assert_eq!(order, vec![LayerId(6), LayerId(2), LayerId(0)]);
    }

    #[test]
    fn test_default_layer_cannot_be_switched_off() {
        let mut state = LayerState::new();
        state.layer_off(LayerId(0));
        assert!(state.is_on(LayerId(0)));
    }
}

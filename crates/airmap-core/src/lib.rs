// Airmap Core Library
// The Air75 V2 personal keymap: layer tables, tap-dance accents, chord
// combos, auto shift and the engine that drives them

pub mod accents;
pub mod auto_shift;
pub mod caps_word;
pub mod combos;
pub mod engine;
pub mod event;
pub mod key;
pub mod keycode;
pub mod keymap;
pub mod layout;
pub mod modifier;
pub mod output;
pub mod settings;
pub mod tap_dance;

pub use auto_shift::{is_auto_shifted, AutoShift};
pub use caps_word::{CapsVerdict, CapsWord};
pub use combos::{ChordCombo, ComboAction, ComboMatcher, COMBOS};
pub use engine::{tapping_term_for, Engine, EngineConfig};
pub use event::{Action, KeyEvent};
pub use key::{key_from_name, key_name, Key};
pub use keycode::{CustomKey, Hand, Keycode};
pub use keymap::Keymap;
pub use layout::{LayerId, LayerState, Position, LAYER_COUNT, MATRIX_COLS, MATRIX_ROWS};
pub use modifier::{is_modifier, Mods};
pub use output::{Emit, EmittedKeys};
pub use settings::{default_settings_content, Settings, SettingsError};
pub use tap_dance::{classify, TapDanceId, TapDanceManager, TapKind};

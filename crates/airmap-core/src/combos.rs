// Airmap Chord Combos
// Simultaneous key chords resolved to one-shot actions

use std::time::{Duration, Instant};

use crate::key::{codes, Key};
use crate::keymap;
use crate::layout::{LayerId, Position};

/// What a completed chord does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboAction {
    ToggleLayer(LayerId),
    ToggleAutoShift,
}

/// A chord definition: all keys down together within the combo term
#[derive(Debug, Clone, Copy)]
pub struct ChordCombo {
    pub keys: &'static [Key],
    pub action: ComboAction,
}

/// The combo table: game-mode toggle and auto-shift toggle
pub static COMBOS: &[ChordCombo] = &[
    ChordCombo {
        keys: &[codes::LCTRL, codes::LEFT, codes::RIGHT],
        action: ComboAction::ToggleLayer(keymap::QWERTY),
    },
    ChordCombo {
        keys: &[codes::LCTRL, codes::UP, codes::DOWN],
        action: ComboAction::ToggleAutoShift,
    },
];

/// True if any chord includes the key
pub fn is_combo_member(key: Key) -> bool {
    COMBOS.iter().any(|combo| combo.keys.contains(&key))
}

/// A press parked in the combo buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferedPress {
    pub pos: Position,
    pub key: Key,
    pub at: Instant,
}

/// Outcome of feeding a member press into the matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboProgress {
    /// Waiting for more chord members
    Buffered,
    /// A chord completed; the buffered presses are consumed
    Fired {
        action: ComboAction,
        consumed: Vec<BufferedPress>,
    },
    /// The buffer can no longer complete any chord; replay these presses
    NotViable(Vec<BufferedPress>),
}

/// Buffers chord-member presses until a chord completes or the term runs
/// out, then either fires the action or replays the presses untouched.
#[derive(Debug)]
pub struct ComboMatcher {
    term: Duration,
    buffer: Vec<BufferedPress>,
    deadline: Option<Instant>,
}

impl ComboMatcher {
    pub fn new(term: Duration) -> Self {
        Self {
            term,
            buffer: Vec::new(),
            deadline: None,
        }
    }

    pub fn has_buffered(&self) -> bool {
        !self.buffer.is_empty()
    }

    pub fn contains_pos(&self, pos: Position) -> bool {
        self.buffer.iter().any(|p| p.pos == pos)
    }

    /// Feed a chord-member press. Caller checks `is_combo_member` first.
    pub fn on_press(&mut self, pos: Position, key: Key, now: Instant) -> ComboProgress {
        if self.buffer.is_empty() {
            self.deadline = Some(now + self.term);
        }
        self.buffer.push(BufferedPress { pos, key, at: now });

        if let Some(combo) = self.completed_chord() {
            let action = combo.action;
            return ComboProgress::Fired {
                action,
                consumed: self.take_buffer(),
            };
        }
        if self.viable() {
            ComboProgress::Buffered
        } else {
            ComboProgress::NotViable(self.take_buffer())
        }
    }

    /// Drain the buffer for replay
    pub fn take_buffer(&mut self) -> Vec<BufferedPress> {
        self.deadline = None;
        std::mem::take(&mut self.buffer)
    }

    /// Flush on term expiry
    pub fn poll(&mut self, now: Instant) -> Option<Vec<BufferedPress>> {
        match self.deadline {
            Some(deadline) if now >= deadline => Some(self.take_buffer()),
            _ => None,
        }
    }

    fn completed_chord(&self) -> Option<&'static ChordCombo> {
        COMBOS.iter().find(|combo| {
            combo
                .keys
                .iter()
                .all(|k| self.buffer.iter().any(|p| p.key == *k))
        })
    }

    /// Some chord still contains every buffered key
    fn viable(&self) -> bool {
        COMBOS.iter().any(|combo| {
            self.buffer
                .iter()
                .all(|p| combo.keys.contains(&p.key))
        })
    }
}

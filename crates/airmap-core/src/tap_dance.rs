// Airmap Tap Dance
// Tap/hold classification and the accent + caps-word dance behaviors

use std::time::{Duration, Instant};

use indexmap::IndexMap;

use crate::accents::{altgr_hold, hat_preserving_case};
use crate::key::{codes, Key};
use crate::keymap;
use crate::layout::{LayerId, Position};
use crate::output::Emit;

/// The tap-dance keys the keymap defines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TapDanceId {
    AccentA,
    AccentE,
    AccentI,
    AccentU,
    AccentO,
    CapsWord,
}

impl TapDanceId {
    pub const ALL: [TapDanceId; 6] = [
        TapDanceId::AccentA,
        TapDanceId::AccentE,
        TapDanceId::AccentI,
        TapDanceId::AccentU,
        TapDanceId::AccentO,
        TapDanceId::CapsWord,
    ];
}

/// Classification inputs for one dance cycle
#[derive(Debug, Clone, Copy, Default)]
pub struct TapDanceState {
    /// Presses seen this cycle
    pub count: u8,
    /// Key physically down right now
    pub pressed: bool,
    /// Another key was pressed during the cycle
    pub interrupted: bool,
}

/// What a dance cycle resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapKind {
    None,
    Unknown,
    SingleTap,
    SingleHold,
    DoubleTap,
    DoubleHold,
    /// Two taps that were really two keystrokes ("pepper" typed fast);
    /// dances here treat it like a double tap unless noted
    DoubleSingleTap,
    TripleTap,
    TripleHold,
}

/// Resolve a dance cycle into a tap kind.
///
/// An interrupted or released single press is a tap; still held means a
/// hold. Two presses interrupted mid-cycle are two keystrokes, not the
/// double-tap action.
pub fn classify(state: &TapDanceState) -> TapKind {
    match state.count {
        1 => {
            if state.interrupted || !state.pressed {
                TapKind::SingleTap
            } else {
                TapKind::SingleHold
            }
        }
        2 => {
            if state.interrupted {
                TapKind::DoubleSingleTap
            } else if state.pressed {
                TapKind::DoubleHold
            } else {
                TapKind::DoubleTap
            }
        }
        3 => {
            if state.interrupted || !state.pressed {
                TapKind::TripleTap
            } else {
                TapKind::TripleHold
            }
        }
        _ => TapKind::Unknown,
    }
}

/// Everything a finished dance asks of the engine.
#[derive(Debug, Clone, Default)]
pub struct DanceOutcome {
    /// Output to send immediately
    pub emits: Vec<Emit>,
    /// Keys registered until reset, in the release order reset uses
    pub held: Vec<Key>,
    /// Toggle the caps-word feature
    pub toggle_caps_word: bool,
    /// Layer held active until reset
    pub layer_on: Option<LayerId>,
}

/// The finished half of each dance's callback pair.
///
/// `held_shifts` is the output-side shift state, needed by the circumflex
/// sequences to keep the case of the surrounding text.
pub fn on_finished(id: TapDanceId, kind: TapKind, held_shifts: &[Key]) -> DanceOutcome {
    let mut outcome = DanceOutcome::default();
    match id {
        TapDanceId::AccentA => match kind {
            // a -> à, aa -> â
            TapKind::SingleTap => {
                (outcome.emits, outcome.held) = altgr_hold(codes::Z);
            }
            TapKind::DoubleTap | TapKind::DoubleSingleTap => {
                outcome.emits = hat_preserving_case(held_shifts, codes::A);
            }
            _ => {}
        },
        TapDanceId::AccentE => match kind {
            // e -> è, ee -> é, held -> ê
            TapKind::SingleTap => {
                (outcome.emits, outcome.held) = altgr_hold(codes::G);
            }
            TapKind::DoubleTap | TapKind::DoubleSingleTap => {
                (outcome.emits, outcome.held) = altgr_hold(codes::F);
            }
            TapKind::SingleHold => {
                outcome.emits = hat_preserving_case(held_shifts, codes::E);
            }
            _ => {}
        },
        TapDanceId::AccentI => match kind {
            // i -> î, ii -> í
            TapKind::SingleTap => {
                outcome.emits = hat_preserving_case(held_shifts, codes::I);
            }
            TapKind::DoubleTap | TapKind::DoubleSingleTap => {
                (outcome.emits, outcome.held) = altgr_hold(codes::I);
            }
            _ => {}
        },
        TapDanceId::AccentU => match kind {
            // u -> ù, uu -> û
            TapKind::SingleTap => {
                (outcome.emits, outcome.held) = altgr_hold(codes::H);
            }
            TapKind::DoubleTap | TapKind::DoubleSingleTap => {
                outcome.emits = hat_preserving_case(held_shifts, codes::U);
            }
            _ => {}
        },
        TapDanceId::AccentO => match kind {
            // o -> ô, oo -> ó
            TapKind::SingleTap => {
                outcome.emits = hat_preserving_case(held_shifts, codes::O);
            }
            TapKind::DoubleTap | TapKind::DoubleSingleTap => {
                (outcome.emits, outcome.held) = altgr_hold(codes::O);
            }
            _ => {}
        },
        TapDanceId::CapsWord => match kind {
            TapKind::SingleTap | TapKind::DoubleSingleTap => {
                outcome.toggle_caps_word = true;
            }
            TapKind::SingleHold => {
                outcome.layer_on = Some(keymap::NAV);
            }
            _ => {}
        },
    }
    outcome
}

/// The reset half: releases for whatever finished left registered
pub fn reset_emits(outcome: &DanceOutcome) -> Vec<Emit> {
    outcome.held.iter().map(|&k| Emit::release(k)).collect()
}

/// Resolution events the manager hands back to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DanceEvent {
    Finished { id: TapDanceId, kind: TapKind },
    Reset { id: TapDanceId },
}

#[derive(Debug, Clone)]
struct ActiveDance {
    id: TapDanceId,
    pos: Position,
    state: TapDanceState,
    deadline: Instant,
    finished: Option<TapKind>,
}

/// Runtime driver for the dance keys.
///
/// One dance is in flight at a time; any other key press interrupts it
/// first. The per-dance resolved kinds persist between cycles, mirroring
/// the per-key state slots the host framework's calling convention expects.
#[derive(Debug)]
pub struct TapDanceManager {
    active: Option<ActiveDance>,
    resolved: IndexMap<TapDanceId, TapKind>,
}

impl TapDanceManager {
    pub fn new() -> Self {
        let mut resolved = IndexMap::new();
        for id in TapDanceId::ALL {
            resolved.insert(id, TapKind::None);
        }
        Self {
            active: None,
            resolved,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Matrix position of the dance in flight
    pub fn active_pos(&self) -> Option<Position> {
        self.active.as_ref().map(|a| a.pos)
    }

    /// Last kind a dance resolved to (None between cycles)
    pub fn last_resolved(&self, id: TapDanceId) -> TapKind {
        self.resolved.get(&id).copied().unwrap_or(TapKind::None)
    }

    /// Register a press of a dance key. Each press restarts the term.
    ///
    /// A different dance still awaiting its release is force-reset first;
    /// the returned events carry that reset.
    pub fn on_press(
        &mut self,
        id: TapDanceId,
        pos: Position,
        term: Duration,
        now: Instant,
    ) -> Vec<DanceEvent> {
        let mut events = Vec::new();
        match &mut self.active {
            Some(active) if active.pos == pos => {
                active.state.count = active.state.count.saturating_add(1);
                active.state.pressed = true;
                active.deadline = now + term;
                return events;
            }
            Some(active) => {
                let old = active.id;
                self.resolved.insert(old, TapKind::None);
                events.push(DanceEvent::Reset { id: old });
            }
            None => {}
        }
        self.active = Some(ActiveDance {
            id,
            pos,
            state: TapDanceState {
                count: 1,
                pressed: true,
                interrupted: false,
            },
            deadline: now + term,
            finished: None,
        });
        events
    }

    /// Register a release of the dance key
    pub fn on_release(&mut self, pos: Position) -> Vec<DanceEvent> {
        let Some(active) = &mut self.active else {
            return Vec::new();
        };
        if active.pos != pos {
            return Vec::new();
        }
        active.state.pressed = false;
        if active.finished.is_some() {
            // Hold resolved earlier; release completes the cycle
            let id = active.id;
            self.resolved.insert(id, TapKind::None);
            self.active = None;
            return vec![DanceEvent::Reset { id }];
        }
        Vec::new()
    }

    /// Another key was pressed: resolve the dance in flight now
    pub fn interrupt(&mut self) -> Vec<DanceEvent> {
        let Some(active) = &mut self.active else {
            return Vec::new();
        };
        if active.finished.is_some() {
            return Vec::new();
        }
        active.state.interrupted = true;
        self.finish()
    }

    /// Resolve the dance if its term expired
    pub fn poll(&mut self, now: Instant) -> Vec<DanceEvent> {
        let due = matches!(
            &self.active,
            Some(active) if active.finished.is_none() && now >= active.deadline
        );
        if due {
            self.finish()
        } else {
            Vec::new()
        }
    }

    fn finish(&mut self) -> Vec<DanceEvent> {
        let Some(active) = &mut self.active else {
            return Vec::new();
        };
        let kind = classify(&active.state);
        let id = active.id;
        active.finished = Some(kind);
        self.resolved.insert(id, kind);
        let mut events = vec![DanceEvent::Finished { id, kind }];
        if !active.state.pressed {
            // Key already up: reset follows immediately
            self.resolved.insert(id, TapKind::None);
            self.active = None;
            events.push(DanceEvent::Reset { id });
        }
        events
    }
}

impl Default for TapDanceManager {
    fn default() -> Self {
        Self::new()
    }
}

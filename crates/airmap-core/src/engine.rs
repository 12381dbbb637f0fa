// Airmap Engine
// Drives the keymap against press/release events: layer resolution,
// tap-hold timing, tap dances, chord combos, auto shift and caps word

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::auto_shift::{is_auto_shifted, AutoShift, AutoShiftOut};
use crate::caps_word::{CapsVerdict, CapsWord};
use crate::combos::{is_combo_member, ComboAction, ComboMatcher, ComboProgress};
use crate::event::{Action, KeyEvent};
use crate::key::{codes, Key};
use crate::keycode::{CustomKey, Hand, Keycode};
use crate::keymap::{self, Keymap};
use crate::layout::{LayerId, LayerState, Position};
use crate::modifier::{is_modifier, Mods};
use crate::output::{Emit, EmittedKeys};
use crate::settings::Settings;
use crate::tap_dance::{self, DanceEvent, DanceOutcome, TapDanceId, TapDanceManager};

/// Timing and feature knobs the engine runs with
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub tapping_term: Duration,
    pub combo_term: Duration,
    pub auto_shift_timeout: Duration,
    pub caps_word_idle: Duration,
    pub auto_shift: bool,
    pub game_mode: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::new())
    }
}

impl EngineConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            tapping_term: settings.tapping_term(),
            combo_term: settings.combo_term(),
            auto_shift_timeout: settings.auto_shift_timeout(),
            caps_word_idle: settings.caps_word_idle(),
            auto_shift: settings.auto_shift_enabled(),
            game_mode: settings.game_mode(),
        }
    }
}

/// Per-key tapping term, with the keymap's overrides.
///
/// The space layer-tap gets three times the base term so lazy space taps
/// stay spaces; the caps dance resolves faster than everything else.
pub fn tapping_term_for(keycode: &Keycode, base: Duration) -> Duration {
    match keycode {
        Keycode::LayerTap(layer, key)
            if *layer == keymap::SYMBOLS && *key == codes::SPACE =>
        {
            base * 3
        }
        Keycode::TapDance(TapDanceId::CapsWord) => base * 3 / 4,
        _ => base,
    }
}

/// What a resolved tap-hold key does when held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoldAction {
    Mods(Mods),
    Layer(LayerId),
}

/// What a resolved tap-hold key does when tapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TapAction {
    Key(Key),
    Shifted(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TapHoldPhase {
    Pending,
    Held,
}

#[derive(Debug, Clone, Copy)]
struct ActiveTapHold {
    pos: Position,
    tap: TapAction,
    hold: HoldAction,
    deadline: Instant,
    phase: TapHoldPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TapHoldResult {
    Tap(TapAction),
    HoldEnd(HoldAction),
}

/// Tap/hold decision for layer-taps, mod-taps and the space-cadet shifts.
///
/// One key is timed at a time. Another key press or the term expiring
/// resolves the key as a hold; release inside the term resolves it as a
/// tap.
#[derive(Debug, Default)]
struct TapHoldManager {
    active: Option<ActiveTapHold>,
}

impl TapHoldManager {
    fn start(&mut self, pos: Position, tap: TapAction, hold: HoldAction, term: Duration, now: Instant) {
        self.active = Some(ActiveTapHold {
            pos,
            tap,
            hold,
            deadline: now + term,
            phase: TapHoldPhase::Pending,
        });
    }

    /// Another key pressed while pending: resolve as hold
    fn interrupt_other(&mut self, pos: Position) -> Option<HoldAction> {
        let active = self.active.as_mut()?;
        if active.pos == pos || active.phase == TapHoldPhase::Held {
            return None;
        }
        active.phase = TapHoldPhase::Held;
        Some(active.hold)
    }

    fn poll(&mut self, now: Instant) -> Option<HoldAction> {
        let active = self.active.as_mut()?;
        if active.phase == TapHoldPhase::Pending && now >= active.deadline {
            active.phase = TapHoldPhase::Held;
            return Some(active.hold);
        }
        None
    }

    fn release(&mut self, pos: Position) -> Option<TapHoldResult> {
        let active = self.active?;
        if active.pos != pos {
            return None;
        }
        self.active = None;
        match active.phase {
            TapHoldPhase::Pending => Some(TapHoldResult::Tap(active.tap)),
            TapHoldPhase::Held => Some(TapHoldResult::HoldEnd(active.hold)),
        }
    }
}

/// Release-time bookkeeping for a pressed matrix position
#[derive(Debug, Clone, Copy)]
enum HeldEntry {
    /// Down on output; extra_shift marks a caps-word weak shift
    Plain { key: Key, extra_shift: bool },
    /// Timing inside the auto-shift manager
    AutoShift,
    /// Down with a weak shift (S() keycodes)
    Shifted { key: Key },
    /// Down with a modifier chord
    Chord { mods: Mods, key: Key },
    /// Timing inside the tap-hold manager
    TapHold,
    /// Counting inside the tap-dance manager
    Dance,
    /// Layer held active
    Momentary(LayerId),
    /// Parked in the combo buffer
    ComboBuffered,
    /// Fired as part of a chord; release is swallowed
    ComboConsumed,
    /// Vendor key passed through
    Custom(CustomKey),
    /// Nothing to do on release
    Silent,
}

/// The keymap engine.
///
/// Feed it press/release events and call `poll` between them; both return
/// the output the host should emit.
pub struct Engine {
    keymap: Keymap,
    layers: LayerState,
    tap_hold: TapHoldManager,
    dances: TapDanceManager,
    dance_outcome: Option<DanceOutcome>,
    combos: ComboMatcher,
    auto_shift: AutoShift,
    caps_word: CapsWord,
    held: HashMap<Position, HeldEntry>,
    emitted: Arc<RwLock<EmittedKeys>>,
    config: EngineConfig,
}

impl Engine {
    pub fn new(settings: &Settings) -> Self {
        Self::with_config(EngineConfig::from_settings(settings))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let mut layers = LayerState::new();
        if config.game_mode {
            layers.layer_toggle(keymap::QWERTY);
        }
        Self {
            keymap: Keymap::new(),
            layers,
            tap_hold: TapHoldManager::default(),
            dances: TapDanceManager::new(),
            dance_outcome: None,
            combos: ComboMatcher::new(config.combo_term),
            auto_shift: AutoShift::new(config.auto_shift, config.auto_shift_timeout),
            caps_word: CapsWord::new(config.caps_word_idle),
            held: HashMap::new(),
            emitted: Arc::new(RwLock::new(EmittedKeys::new())),
            config,
        }
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn layer_state(&self) -> &LayerState {
        &self.layers
    }

    /// Handle to the output-side pressed state, for diagnostics
    pub fn emitted(&self) -> Arc<RwLock<EmittedKeys>> {
        Arc::clone(&self.emitted)
    }

    pub fn caps_word_active(&self) -> bool {
        self.caps_word.is_active()
    }

    pub fn auto_shift_enabled(&self) -> bool {
        self.auto_shift.is_enabled()
    }

    /// Process one key event now
    pub fn process(&mut self, event: KeyEvent) -> Vec<Emit> {
        self.process_at(event, Instant::now())
    }

    /// Process one key event with an explicit timestamp
    pub fn process_at(&mut self, event: KeyEvent, now: Instant) -> Vec<Emit> {
        let mut out = Vec::new();
        match event.action {
            Action::Press => self.process_press(event.pos, now, &mut out),
            Action::Release => self.process_release(event.pos, now, &mut out),
        }
        out
    }

    /// Resolve anything whose deadline passed
    pub fn poll(&mut self) -> Vec<Emit> {
        self.poll_at(Instant::now())
    }

    /// `poll` with an explicit timestamp
    pub fn poll_at(&mut self, now: Instant) -> Vec<Emit> {
        let mut out = Vec::new();
        if let Some(replay) = self.combos.poll(now) {
            log::debug!("combo window expired, replaying {} presses", replay.len());
            for p in replay {
                self.dispatch_press(p.pos, Keycode::Key(p.key), p.at, &mut out);
            }
        }
        if let Some(hold) = self.tap_hold.poll(now) {
            self.apply_hold(hold, &mut out);
        }
        for ev in self.dances.poll(now) {
            self.apply_dance_event(ev, now, &mut out);
        }
        if let Some(shift_out) = self.auto_shift.poll(now) {
            self.apply_auto_shift(shift_out, &mut out);
        }
        if self.caps_word.poll(now) {
            log::debug!("caps word idle timeout");
        }
        out
    }

    fn process_press(&mut self, pos: Position, now: Instant, out: &mut Vec<Emit>) {
        // A new press is input for every pending timing decision
        self.interrupt_pending(pos, now, out);

        let kc = self.keymap.resolve(pos, &self.layers);
        log::trace!("press {} -> {}", pos, kc);

        if let Keycode::Key(key) = kc {
            if is_combo_member(key) {
                match self.combos.on_press(pos, key, now) {
                    ComboProgress::Buffered => {
                        self.held.insert(pos, HeldEntry::ComboBuffered);
                        return;
                    }
                    ComboProgress::Fired { action, consumed } => {
                        for p in &consumed {
                            self.held.insert(p.pos, HeldEntry::ComboConsumed);
                        }
                        self.apply_combo_action(action);
                        return;
                    }
                    ComboProgress::NotViable(replay) => {
                        // The current press replays as the last entry
                        for p in replay {
                            self.dispatch_press(p.pos, Keycode::Key(p.key), p.at, out);
                        }
                        return;
                    }
                }
            }
        }

        if self.combos.has_buffered() {
            // A non-chord key ends the window early
            for p in self.combos.take_buffer() {
                self.dispatch_press(p.pos, Keycode::Key(p.key), p.at, out);
            }
        }

        self.dispatch_press(pos, kc, now, out);
    }

    fn dispatch_press(&mut self, pos: Position, kc: Keycode, now: Instant, out: &mut Vec<Emit>) {
        match kc {
            Keycode::Key(key) => {
                if is_modifier(key) {
                    self.emit(out, Emit::press(key));
                    self.held.insert(
                        pos,
                        HeldEntry::Plain {
                            key,
                            extra_shift: false,
                        },
                    );
                } else if self.auto_shift.is_enabled() && is_auto_shifted(&kc) {
                    self.auto_shift.on_press(pos, key, now);
                    self.held.insert(pos, HeldEntry::AutoShift);
                } else {
                    let extra_shift = self.press_with_caps(key, now, out);
                    self.held.insert(pos, HeldEntry::Plain { key, extra_shift });
                }
            }
            Keycode::Shifted(key) => {
                self.emit(out, Emit::press(codes::LSHIFT));
                self.emit(out, Emit::press(key));
                self.held.insert(pos, HeldEntry::Shifted { key });
            }
            Keycode::Chord(mods, key) => {
                for m in mods.keys() {
                    self.emit(out, Emit::press(m));
                }
                self.emit(out, Emit::press(key));
                self.held.insert(pos, HeldEntry::Chord { mods, key });
            }
            Keycode::LayerTap(layer, key) => {
                let term = tapping_term_for(&kc, self.config.tapping_term);
                self.tap_hold
                    .start(pos, TapAction::Key(key), HoldAction::Layer(layer), term, now);
                self.held.insert(pos, HeldEntry::TapHold);
            }
            Keycode::ModTap(mods, key) => {
                let term = tapping_term_for(&kc, self.config.tapping_term);
                self.tap_hold
                    .start(pos, TapAction::Key(key), HoldAction::Mods(mods), term, now);
                self.held.insert(pos, HeldEntry::TapHold);
            }
            Keycode::SpaceCadet(hand) => {
                let (mods, paren) = match hand {
                    Hand::Left => (Mods::LSHIFT, codes::N9),
                    Hand::Right => (Mods::RSHIFT, codes::N0),
                };
                let term = tapping_term_for(&kc, self.config.tapping_term);
                self.tap_hold
                    .start(pos, TapAction::Shifted(paren), HoldAction::Mods(mods), term, now);
                self.held.insert(pos, HeldEntry::TapHold);
            }
            Keycode::Momentary(layer) => {
                self.layers.layer_on(layer);
                self.held.insert(pos, HeldEntry::Momentary(layer));
            }
            Keycode::ToggleLayer(layer) => {
                self.layers.layer_toggle(layer);
                log::debug!("layer {} toggled {}", layer, self.layers.is_on(layer));
                self.held.insert(pos, HeldEntry::Silent);
            }
            Keycode::TapDance(id) => {
                let term = tapping_term_for(&kc, self.config.tapping_term);
                for ev in self.dances.on_press(id, pos, term, now) {
                    self.apply_dance_event(ev, now, out);
                }
                self.held.insert(pos, HeldEntry::Dance);
            }
            Keycode::Custom(key) => {
                self.emit(out, Emit::custom(key, Action::Press));
                self.held.insert(pos, HeldEntry::Custom(key));
            }
            Keycode::Transparent | Keycode::NoOp => {
                self.held.insert(pos, HeldEntry::Silent);
            }
        }
    }

    fn process_release(&mut self, pos: Position, now: Instant, out: &mut Vec<Emit>) {
        // Releasing a parked chord member gives up on the chord
        if self.combos.contains_pos(pos) {
            for p in self.combos.take_buffer() {
                self.dispatch_press(p.pos, Keycode::Key(p.key), p.at, out);
            }
        }

        let Some(entry) = self.held.remove(&pos) else {
            return;
        };
        match entry {
            HeldEntry::Plain { key, extra_shift } => {
                self.emit(out, Emit::release(key));
                if extra_shift {
                    self.emit(out, Emit::release(codes::LSHIFT));
                }
            }
            HeldEntry::AutoShift => match self.auto_shift.on_release(pos, now) {
                Some(AutoShiftOut::Tap(key)) => self.tap_with_caps(key, now, out),
                Some(AutoShiftOut::ShiftedPress(key)) => {
                    // Release raced the poll past the threshold
                    self.emit(out, Emit::press(codes::LSHIFT));
                    self.emit(out, Emit::press(key));
                    self.emit(out, Emit::release(key));
                    self.emit(out, Emit::release(codes::LSHIFT));
                }
                Some(AutoShiftOut::ShiftedRelease(key)) => {
                    self.emit(out, Emit::release(key));
                    self.emit(out, Emit::release(codes::LSHIFT));
                }
                _ => {
                    // Interruption already rewrote the entry as Plain;
                    // reaching here with nothing pending means nothing is
                    // down for this position.
                }
            },
            HeldEntry::Shifted { key } => {
                self.emit(out, Emit::release(key));
                self.emit(out, Emit::release(codes::LSHIFT));
            }
            HeldEntry::Chord { mods, key } => {
                self.emit(out, Emit::release(key));
                for m in mods.keys().into_iter().rev() {
                    self.emit(out, Emit::release(m));
                }
            }
            HeldEntry::TapHold => match self.tap_hold.release(pos) {
                Some(TapHoldResult::Tap(TapAction::Key(key))) => {
                    self.tap_with_caps(key, now, out)
                }
                Some(TapHoldResult::Tap(TapAction::Shifted(key))) => {
                    self.emit(out, Emit::press(codes::LSHIFT));
                    self.emit(out, Emit::press(key));
                    self.emit(out, Emit::release(key));
                    self.emit(out, Emit::release(codes::LSHIFT));
                }
                Some(TapHoldResult::HoldEnd(HoldAction::Mods(mods))) => {
                    for m in mods.keys().into_iter().rev() {
                        self.emit(out, Emit::release(m));
                    }
                }
                Some(TapHoldResult::HoldEnd(HoldAction::Layer(layer))) => {
                    self.layers.layer_off(layer);
                }
                None => {}
            },
            HeldEntry::Dance => {
                for ev in self.dances.on_release(pos) {
                    self.apply_dance_event(ev, now, out);
                }
            }
            HeldEntry::Momentary(layer) => {
                self.layers.layer_off(layer);
            }
            HeldEntry::Custom(key) => {
                self.emit(out, Emit::custom(key, Action::Release));
            }
            HeldEntry::ComboBuffered | HeldEntry::ComboConsumed | HeldEntry::Silent => {}
        }
    }

    fn interrupt_pending(&mut self, pos: Position, now: Instant, out: &mut Vec<Emit>) {
        if self.dances.is_active() && self.dances.active_pos() != Some(pos) {
            for ev in self.dances.interrupt() {
                self.apply_dance_event(ev, now, out);
            }
        }
        if let Some(hold) = self.tap_hold.interrupt_other(pos) {
            self.apply_hold(hold, out);
        }
        if let Some(pending) = self.auto_shift.pending_pos() {
            if pending != pos {
                if let Some((ppos, AutoShiftOut::PlainPress(key))) = self.auto_shift.interrupt() {
                    let extra_shift = self.press_with_caps(key, now, out);
                    self.held
                        .insert(ppos, HeldEntry::Plain { key, extra_shift });
                }
            }
        }
    }

    fn apply_hold(&mut self, hold: HoldAction, out: &mut Vec<Emit>) {
        match hold {
            HoldAction::Mods(mods) => {
                for m in mods.keys() {
                    self.emit(out, Emit::press(m));
                }
            }
            HoldAction::Layer(layer) => {
                self.layers.layer_on(layer);
            }
        }
    }

    fn apply_dance_event(&mut self, ev: DanceEvent, now: Instant, out: &mut Vec<Emit>) {
        match ev {
            DanceEvent::Finished { id, kind } => {
                log::debug!("dance {:?} finished as {:?}", id, kind);
                // Shift is lifted around the dead-key sequence only when it
                // is the sole held modifier, like the original macro
                let shifts: Vec<Key> = {
                    let emitted = self.emitted.read();
                    if emitted.mods().is_only_shift() {
                        emitted.shift_keys().to_vec()
                    } else {
                        Vec::new()
                    }
                };
                let outcome = tap_dance::on_finished(id, kind, &shifts);
                for e in outcome.emits.iter() {
                    self.emit(out, *e);
                }
                if outcome.toggle_caps_word {
                    let active = self.caps_word.toggle(now);
                    log::debug!("caps word {}", if active { "on" } else { "off" });
                }
                if let Some(layer) = outcome.layer_on {
                    self.layers.layer_on(layer);
                }
                self.dance_outcome = Some(outcome);
            }
            DanceEvent::Reset { .. } => {
                if let Some(outcome) = self.dance_outcome.take() {
                    for e in tap_dance::reset_emits(&outcome) {
                        self.emit(out, e);
                    }
                    if let Some(layer) = outcome.layer_on {
                        self.layers.layer_off(layer);
                    }
                }
            }
        }
    }

    fn apply_auto_shift(&mut self, shift_out: AutoShiftOut, out: &mut Vec<Emit>) {
        if let AutoShiftOut::ShiftedPress(key) = shift_out {
            self.emit(out, Emit::press(codes::LSHIFT));
            self.emit(out, Emit::press(key));
        }
    }

    fn apply_combo_action(&mut self, action: ComboAction) {
        match action {
            ComboAction::ToggleLayer(layer) => {
                self.layers.layer_toggle(layer);
                log::debug!("combo: layer {} -> {}", layer, self.layers.is_on(layer));
            }
            ComboAction::ToggleAutoShift => {
                let enabled = self.auto_shift.toggle();
                log::debug!("combo: auto shift -> {}", enabled);
            }
        }
    }

    /// Press a key through the caps-word filter; true if a weak shift went
    /// down with it
    fn press_with_caps(&mut self, key: Key, now: Instant, out: &mut Vec<Emit>) -> bool {
        match self.caps_word.on_key(key, now) {
            CapsVerdict::Shift => {
                self.emit(out, Emit::press(codes::LSHIFT));
                self.emit(out, Emit::press(key));
                true
            }
            CapsVerdict::Pass | CapsVerdict::Deactivate => {
                self.emit(out, Emit::press(key));
                false
            }
        }
    }

    fn tap_with_caps(&mut self, key: Key, now: Instant, out: &mut Vec<Emit>) {
        let extra_shift = self.press_with_caps(key, now, out);
        self.emit(out, Emit::release(key));
        if extra_shift {
            self.emit(out, Emit::release(codes::LSHIFT));
        }
    }

    fn emit(&mut self, out: &mut Vec<Emit>, e: Emit) {
        self.emitted.write().apply(&e);
        out.push(e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::{k, lt, td};

    fn quiet_config() -> EngineConfig {
        EngineConfig {
            tapping_term: Duration::from_millis(40),
            combo_term: Duration::from_millis(30),
            auto_shift_timeout: Duration::from_millis(40),
            caps_word_idle: Duration::from_millis(5000),
            auto_shift: false,
            game_mode: false,
        }
    }

    fn pos_of(engine: &Engine, layer: LayerId, kc: Keycode) -> Position {
        engine.keymap().position_of(layer, kc).expect("keycode on layer")
    }

    #[test]
    fn test_plain_key_press_release() {
        let mut engine = Engine::with_config(quiet_config());
        let q = pos_of(&engine, keymap::BASE, k(codes::Q));

        let out = engine.process(KeyEvent::press(q));
        assert_eq!(out, vec![Emit::press(codes::Q)]);
        assert!(engine.emitted().read().is_down(codes::Q));

        let out = engine.process(KeyEvent::release(q));
        assert_eq!(out, vec![Emit::release(codes::Q)]);
        assert!(engine.emitted().read().is_empty());
    }

    #[test]
    fn test_modifiers_pass_through_auto_shift() {
        let mut config = quiet_config();
        config.auto_shift = true;
        let mut engine = Engine::with_config(config);
        let ctrl = pos_of(&engine, keymap::BASE, k(codes::RCTRL));

        // Modifiers emit immediately even with auto shift on
        let out = engine.process(KeyEvent::press(ctrl));
        assert_eq!(out, vec![Emit::press(codes::RCTRL)]);
        engine.process(KeyEvent::release(ctrl));
    }

    #[test]
    fn test_momentary_layer() {
        let mut engine = Engine::with_config(quiet_config());
        let fnk = pos_of(&engine, keymap::BASE, Keycode::Momentary(keymap::SYSTEM));

        engine.process(KeyEvent::press(fnk));
        assert!(engine.layer_state().is_on(keymap::SYSTEM));
        // Volume-up slot resolves through the system layer
        let vol = pos_of(&engine, keymap::SYSTEM, k(codes::VOL_UP));
        let out = engine.process(KeyEvent::press(vol));
        assert_eq!(out, vec![Emit::press(codes::VOL_UP)]);
        engine.process(KeyEvent::release(vol));
        engine.process(KeyEvent::release(fnk));
        assert!(!engine.layer_state().is_on(keymap::SYSTEM));
    }

    #[test]
    fn test_game_mode_config_starts_on_qwerty() {
        let mut config = quiet_config();
        config.game_mode = true;
        let engine = Engine::with_config(config);
        assert!(engine.layer_state().is_on(keymap::QWERTY));
    }

    #[test]
    fn test_layer_tap_interrupt_activates_layer() {
        let mut engine = Engine::with_config(quiet_config());
        let space = pos_of(&engine, keymap::BASE, lt(keymap::SYMBOLS, codes::SPACE));
        let u = pos_of(&engine, keymap::BASE, k(codes::U));

        assert!(engine.process(KeyEvent::press(space)).is_empty());
        // U interrupts: space resolves as the symbols layer, U types 8
        let out = engine.process(KeyEvent::press(u));
        assert_eq!(out, vec![Emit::press(codes::N8)]);
        engine.process(KeyEvent::release(u));
        engine.process(KeyEvent::release(space));
        assert!(!engine.layer_state().is_on(keymap::SYMBOLS));
        assert!(engine.emitted().read().is_empty());
    }

    #[test]
    fn test_tapping_term_overrides() {
        let base = Duration::from_millis(200);
        assert_eq!(
            tapping_term_for(&lt(keymap::SYMBOLS, codes::SPACE), base),
            Duration::from_millis(600)
        );
        assert_eq!(
            tapping_term_for(&td(TapDanceId::CapsWord), base),
            Duration::from_millis(150)
        );
        assert_eq!(tapping_term_for(&k(codes::A), base), base);
    }

    #[test]
    fn test_custom_key_round_trip() {
        let mut engine = Engine::with_config(quiet_config());
        let fnk = pos_of(&engine, keymap::BASE, Keycode::Momentary(keymap::SYSTEM));
        engine.process(KeyEvent::press(fnk));
        let bat = pos_of(&engine, keymap::SYSTEM, Keycode::Custom(CustomKey::BatteryShow));
        let out = engine.process(KeyEvent::press(bat));
        assert_eq!(out, vec![Emit::custom(CustomKey::BatteryShow, Action::Press)]);
        let out = engine.process(KeyEvent::release(bat));
        assert_eq!(out, vec![Emit::custom(CustomKey::BatteryShow, Action::Release)]);
    }
}

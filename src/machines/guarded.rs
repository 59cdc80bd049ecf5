//! Guards in all three positions: entry/exit obligations that consult a
//! guard at the moment their scope opens or closes, a handler branch that
//! stays internal while its guard holds, and an `off` event declared once on
//! the enclosing scope and bubbled up from whichever leaf is active.

use crate::callback::Callback;
use crate::descriptor::{MachineDescriptor, StateDescriptor};
use crate::id::StateId;
use crate::machine::Engine;
use crate::transition::{Handled, TransitionRequest};

pub const OFF: StateId = StateId::leaf(1);
pub const BASE: StateId = StateId::composite(0);
pub const WARM: StateId = StateId::leaf_in(BASE, 1);
pub const COLD: StateId = StateId::leaf_in(BASE, 2);

#[derive(Debug)]
pub enum GuardedEvent {
  On,
  Toggle,
  Pulse,
  Off,
}

pub trait GuardedEvents {
  fn on(&mut self) {}
  fn toggle(&mut self) {}
  fn pulse(&mut self) {}
  fn off(&mut self) {}
}

pub trait GuardedActions {
  fn on_power(&mut self);
  fn off_power(&mut self);
  fn glow(&mut self);
  fn dim(&mut self);
  fn chill(&mut self);
  fn ignite(&mut self);
  fn swap(&mut self);
  fn pulse(&mut self);
  fn cool(&mut self);
  fn douse(&mut self);
}

pub trait GuardedGuards {
  /// Gates the power hooks on BASE's entry and exit.
  fn gate(&self) -> bool;
  /// While true, a pulse is absorbed internally instead of cooling off.
  fn hot(&self) -> bool;
}

pub type DynActions = dyn GuardedActions;
pub type DynGuards = dyn GuardedGuards;

pub struct GuardedDescriptor;

impl MachineDescriptor for GuardedDescriptor {
  type Event = GuardedEvent;
  type Actions = DynActions;
  type Guards = DynGuards;

  fn debug_name() -> &'static str {
    "guarded"
  }

  fn states() -> &'static [StateDescriptor<Self>] {
    &STATES
  }

  fn initial() -> StateId {
    OFF
  }
}

fn enter_base(actions: &mut DynActions, guards: &DynGuards) {
  if guards.gate() {
    actions.on_power();
  }
}

fn leave_base(actions: &mut DynActions, guards: &DynGuards) {
  if guards.gate() {
    actions.off_power();
  }
}

fn enter_warm(actions: &mut DynActions, _guards: &DynGuards) {
  actions.glow();
}

fn leave_warm(actions: &mut DynActions, _guards: &DynGuards) {
  actions.dim();
}

fn enter_cold(actions: &mut DynActions, _guards: &DynGuards) {
  actions.chill();
}

fn off_handle(
  current: StateId,
  event: &GuardedEvent,
  _actions: &mut DynActions,
  _guards: &DynGuards,
) -> Handled<DynActions> {
  match event {
    GuardedEvent::On => Handled::Transition(TransitionRequest::new(
      current,
      WARM,
      Callback::Unit(GuardedActions::ignite),
    )),
    _ => Handled::NotHandled,
  }
}

fn warm_handle(
  current: StateId,
  event: &GuardedEvent,
  actions: &mut DynActions,
  guards: &DynGuards,
) -> Handled<DynActions> {
  match event {
    GuardedEvent::Toggle => Handled::Transition(TransitionRequest::new(
      current,
      COLD,
      Callback::Unit(GuardedActions::swap),
    )),
    GuardedEvent::Pulse => {
      if guards.hot() {
        actions.pulse();
        Handled::Internal
      } else {
        Handled::Transition(TransitionRequest::new(
          current,
          COLD,
          Callback::Unit(GuardedActions::cool),
        ))
      }
    }
    _ => Handled::NotHandled,
  }
}

fn cold_handle(
  current: StateId,
  event: &GuardedEvent,
  _actions: &mut DynActions,
  _guards: &DynGuards,
) -> Handled<DynActions> {
  match event {
    GuardedEvent::Toggle => Handled::Transition(TransitionRequest::new(
      current,
      WARM,
      Callback::Unit(GuardedActions::swap),
    )),
    _ => Handled::NotHandled,
  }
}

fn base_handle(
  current: StateId,
  event: &GuardedEvent,
  _actions: &mut DynActions,
  _guards: &DynGuards,
) -> Handled<DynActions> {
  match event {
    GuardedEvent::Off => Handled::Transition(TransitionRequest::new(
      current,
      OFF,
      Callback::Unit(GuardedActions::douse),
    )),
    _ => Handled::NotHandled,
  }
}

static STATES: [StateDescriptor<GuardedDescriptor>; 4] = [
  StateDescriptor {
    id: OFF,
    name: "Off",
    parent: None,
    entry: None,
    exit: None,
    continuation: None,
    handle: Some(off_handle),
  },
  StateDescriptor {
    id: BASE,
    name: "Base",
    parent: None,
    entry: Some(enter_base),
    exit: Some(leave_base),
    continuation: None,
    handle: Some(base_handle),
  },
  StateDescriptor {
    id: WARM,
    name: "Warm",
    parent: Some(BASE),
    entry: Some(enter_warm),
    exit: Some(leave_warm),
    continuation: None,
    handle: Some(warm_handle),
  },
  StateDescriptor {
    id: COLD,
    name: "Cold",
    parent: Some(BASE),
    entry: Some(enter_cold),
    exit: None,
    continuation: None,
    handle: Some(cold_handle),
  },
];

pub struct GuardedMachine<'a> {
  engine: Engine<GuardedDescriptor>,
  actions: &'a mut DynActions,
  guards: &'a DynGuards,
}

impl<'a> GuardedMachine<'a> {
  pub fn new(actions: &'a mut DynActions, guards: &'a DynGuards) -> Self {
    let engine = Engine::<GuardedDescriptor>::start(actions, guards);
    Self {
      engine,
      actions,
      guards,
    }
  }

  pub fn state(&self) -> StateId {
    self.engine.state()
  }

  pub fn state_name(&self) -> &'static str {
    self.engine.state_name()
  }

  fn dispatch(&mut self, event: GuardedEvent) {
    self.engine.dispatch(&event, self.actions, self.guards);
  }
}

impl GuardedEvents for GuardedMachine<'_> {
  fn on(&mut self) {
    self.dispatch(GuardedEvent::On);
  }

  fn toggle(&mut self) {
    self.dispatch(GuardedEvent::Toggle);
  }

  fn pulse(&mut self) {
    self.dispatch(GuardedEvent::Pulse);
  }

  fn off(&mut self) {
    self.dispatch(GuardedEvent::Off);
  }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use super::*;

  #[derive(Default)]
  struct Recorder {
    log: Vec<String>,
  }

  impl Recorder {
    fn note(&mut self, label: &str) {
      self.log.push(label.to_string());
    }
  }

  impl GuardedActions for Recorder {
    fn on_power(&mut self) {
      self.note("on_power");
    }

    fn off_power(&mut self) {
      self.note("off_power");
    }

    fn glow(&mut self) {
      self.note("glow");
    }

    fn dim(&mut self) {
      self.note("dim");
    }

    fn chill(&mut self) {
      self.note("chill");
    }

    fn ignite(&mut self) {
      self.note("ignite");
    }

    fn swap(&mut self) {
      self.note("swap");
    }

    fn pulse(&mut self) {
      self.note("pulse");
    }

    fn cool(&mut self) {
      self.note("cool");
    }

    fn douse(&mut self) {
      self.note("douse");
    }
  }

  struct Flags {
    gate: Cell<bool>,
    hot: Cell<bool>,
  }

  impl Flags {
    fn new(gate: bool, hot: bool) -> Self {
      Self {
        gate: Cell::new(gate),
        hot: Cell::new(hot),
      }
    }
  }

  impl GuardedGuards for Flags {
    fn gate(&self) -> bool {
      self.gate.get()
    }

    fn hot(&self) -> bool {
      self.hot.get()
    }
  }

  #[test]
  fn starts_off_without_touching_the_power() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(true, true);
    let machine = GuardedMachine::new(&mut recorder, &flags);
    assert_eq!(machine.state(), OFF);
    drop(machine);
    assert!(recorder.log.is_empty());
  }

  #[test]
  fn powering_on_opens_the_base_scope_when_the_gate_holds() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(true, true);
    let mut machine = GuardedMachine::new(&mut recorder, &flags);
    machine.on();
    assert_eq!(machine.state(), WARM);
    drop(machine);
    assert_eq!(recorder.log, vec!["ignite", "on_power", "glow"]);
  }

  #[test]
  fn powering_on_with_the_gate_closed_skips_the_power_hook() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(false, true);
    let mut machine = GuardedMachine::new(&mut recorder, &flags);
    machine.on();
    assert_eq!(machine.state(), WARM);
    drop(machine);
    assert_eq!(recorder.log, vec!["ignite", "glow"]);
  }

  #[test]
  fn toggling_swaps_leaves_inside_the_open_base() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(true, true);
    let mut machine = GuardedMachine::new(&mut recorder, &flags);
    machine.on();
    machine.toggle();
    assert_eq!(machine.state(), COLD);
    machine.toggle();
    assert_eq!(machine.state(), WARM);
    drop(machine);
    assert_eq!(
      recorder.log,
      vec!["ignite", "on_power", "glow", "dim", "swap", "chill", "swap", "glow"]
    );
  }

  #[test]
  fn pulse_stays_internal_while_hot() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(true, true);
    let mut machine = GuardedMachine::new(&mut recorder, &flags);
    machine.on();
    machine.pulse();
    assert_eq!(machine.state(), WARM);
    drop(machine);
    assert_eq!(recorder.log, vec!["ignite", "on_power", "glow", "pulse"]);
  }

  #[test]
  fn pulse_drops_to_cold_once_the_heat_is_gone() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(true, false);
    let mut machine = GuardedMachine::new(&mut recorder, &flags);
    machine.on();
    machine.pulse();
    assert_eq!(machine.state(), COLD);
    drop(machine);
    assert_eq!(
      recorder.log,
      vec!["ignite", "on_power", "glow", "dim", "cool", "chill"]
    );
  }

  #[test]
  fn off_bubbles_from_the_leaf_and_closes_the_base() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(true, true);
    let mut machine = GuardedMachine::new(&mut recorder, &flags);
    machine.on();
    machine.off();
    assert_eq!(machine.state(), OFF);
    drop(machine);
    assert_eq!(
      recorder.log,
      vec!["ignite", "on_power", "glow", "dim", "off_power", "douse"]
    );
  }

  #[test]
  fn exit_guard_is_read_when_the_scope_closes() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(true, true);
    let mut machine = GuardedMachine::new(&mut recorder, &flags);
    machine.on();
    flags.gate.set(false);
    machine.off();
    assert_eq!(machine.state(), OFF);
    drop(machine);
    assert_eq!(recorder.log, vec!["ignite", "on_power", "glow", "dim", "douse"]);
  }

  #[test]
  fn entry_guard_is_read_when_the_scope_opens() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(false, true);
    let mut machine = GuardedMachine::new(&mut recorder, &flags);
    machine.on();
    flags.gate.set(true);
    machine.off();
    assert_eq!(machine.state(), OFF);
    drop(machine);
    assert_eq!(
      recorder.log,
      vec!["ignite", "glow", "dim", "off_power", "douse"]
    );
  }
}

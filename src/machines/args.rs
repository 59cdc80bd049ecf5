//! Argument-carrying transition actions.  A single-state chart whose five
//! self-transitions each bind one literal of a supported scalar kind, so the
//! recorder log shows exactly what the callable delivered and nothing else
//! (the state declares no entry/exit obligations).

use crate::callback::Callback;
use crate::descriptor::{MachineDescriptor, StateDescriptor};
use crate::id::StateId;
use crate::machine::Engine;
use crate::transition::{Handled, TransitionRequest};

pub const HOME: StateId = StateId::leaf(1);

#[derive(Debug)]
pub enum ArgEvent {
  E0,
  E1,
  E2,
  E3,
  E4,
}

pub trait ArgEvents {
  fn e0(&mut self) {}
  fn e1(&mut self) {}
  fn e2(&mut self) {}
  fn e3(&mut self) {}
  fn e4(&mut self) {}
}

pub trait ArgActions {
  fn on_i32(&mut self, value: i32);
  fn on_bool(&mut self, value: bool);
  fn on_f32(&mut self, value: f32);
  fn on_str(&mut self, value: &'static str);
}

pub type DynActions = dyn ArgActions;

pub struct ArgDescriptor;

impl MachineDescriptor for ArgDescriptor {
  type Event = ArgEvent;
  type Actions = DynActions;
  type Guards = ();

  fn debug_name() -> &'static str {
    "args"
  }

  fn states() -> &'static [StateDescriptor<Self>] {
    &STATES
  }

  fn initial() -> StateId {
    HOME
  }
}

fn home_handle(
  current: StateId,
  event: &ArgEvent,
  _actions: &mut DynActions,
  _guards: &(),
) -> Handled<DynActions> {
  match event {
    ArgEvent::E0 => Handled::Transition(TransitionRequest::new(
      current,
      HOME,
      Callback::WithI32(ArgActions::on_i32, 13),
    )),
    ArgEvent::E1 => Handled::Transition(TransitionRequest::new(
      current,
      HOME,
      Callback::WithI32(ArgActions::on_i32, -252),
    )),
    ArgEvent::E2 => Handled::Transition(TransitionRequest::new(
      current,
      HOME,
      Callback::WithBool(ArgActions::on_bool, true),
    )),
    ArgEvent::E3 => Handled::Transition(TransitionRequest::new(
      current,
      HOME,
      Callback::WithF32(ArgActions::on_f32, 123.456),
    )),
    ArgEvent::E4 => Handled::Transition(TransitionRequest::new(
      current,
      HOME,
      Callback::WithStr(ArgActions::on_str, "test123"),
    )),
  }
}

static STATES: [StateDescriptor<ArgDescriptor>; 1] = [StateDescriptor {
  id: HOME,
  name: "Home",
  parent: None,
  entry: None,
  exit: None,
  continuation: None,
  handle: Some(home_handle),
}];

pub struct ArgMachine<'a> {
  engine: Engine<ArgDescriptor>,
  actions: &'a mut DynActions,
}

impl<'a> ArgMachine<'a> {
  pub fn new(actions: &'a mut DynActions) -> Self {
    let engine = Engine::<ArgDescriptor>::start(actions, &());
    Self { engine, actions }
  }

  pub fn state(&self) -> StateId {
    self.engine.state()
  }

  fn dispatch(&mut self, event: ArgEvent) {
    self.engine.dispatch(&event, self.actions, &());
  }
}

impl ArgEvents for ArgMachine<'_> {
  fn e0(&mut self) {
    self.dispatch(ArgEvent::E0);
  }

  fn e1(&mut self) {
    self.dispatch(ArgEvent::E1);
  }

  fn e2(&mut self) {
    self.dispatch(ArgEvent::E2);
  }

  fn e3(&mut self) {
    self.dispatch(ArgEvent::E3);
  }

  fn e4(&mut self) {
    self.dispatch(ArgEvent::E4);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Default)]
  struct Recorder {
    log: Vec<String>,
  }

  impl ArgActions for Recorder {
    fn on_i32(&mut self, value: i32) {
      self.log.push(format!("i32({})", value));
    }

    fn on_bool(&mut self, value: bool) {
      self.log.push(format!("bool({})", value));
    }

    fn on_f32(&mut self, value: f32) {
      self.log.push(format!("f32({})", value));
    }

    fn on_str(&mut self, value: &'static str) {
      self.log.push(format!("str({})", value));
    }
  }

  #[test]
  fn positive_i32_argument_is_delivered() {
    let mut recorder = Recorder::default();
    let mut machine = ArgMachine::new(&mut recorder);
    machine.e0();
    assert_eq!(machine.state(), HOME);
    drop(machine);
    assert_eq!(recorder.log, vec!["i32(13)"]);
  }

  #[test]
  fn negative_i32_argument_survives_the_trip() {
    let mut recorder = Recorder::default();
    let mut machine = ArgMachine::new(&mut recorder);
    machine.e1();
    drop(machine);
    assert_eq!(recorder.log, vec!["i32(-252)"]);
  }

  #[test]
  fn bool_argument_is_delivered() {
    let mut recorder = Recorder::default();
    let mut machine = ArgMachine::new(&mut recorder);
    machine.e2();
    drop(machine);
    assert_eq!(recorder.log, vec!["bool(true)"]);
  }

  #[test]
  fn f32_argument_is_delivered() {
    let mut recorder = Recorder::default();
    let mut machine = ArgMachine::new(&mut recorder);
    machine.e3();
    drop(machine);
    assert_eq!(recorder.log, vec!["f32(123.456)"]);
  }

  #[test]
  fn str_argument_is_delivered() {
    let mut recorder = Recorder::default();
    let mut machine = ArgMachine::new(&mut recorder);
    machine.e4();
    drop(machine);
    assert_eq!(recorder.log, vec!["str(test123)"]);
  }

  #[test]
  fn each_dispatch_redelivers_the_bound_value() {
    let mut recorder = Recorder::default();
    let mut machine = ArgMachine::new(&mut recorder);
    machine.e0();
    machine.e0();
    machine.e0();
    drop(machine);
    assert_eq!(recorder.log, vec!["i32(13)", "i32(13)", "i32(13)"]);
  }

  #[test]
  fn mixed_kinds_arrive_in_dispatch_order_with_no_other_effects() {
    let mut recorder = Recorder::default();
    let mut machine = ArgMachine::new(&mut recorder);
    machine.e3();
    machine.e0();
    machine.e4();
    assert_eq!(machine.state(), HOME);
    drop(machine);
    assert_eq!(recorder.log, vec!["f32(123.456)", "i32(13)", "str(test123)"]);
  }
}

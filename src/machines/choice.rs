//! Minimal choice pseudostate: one real state, one guard, two ways back.
//! The guard is read exactly once per visit, inside the pseudostate's
//! continuation, and the pseudostate is never observably current.

use crate::callback::Callback;
use crate::descriptor::{MachineDescriptor, StateDescriptor};
use crate::id::StateId;
use crate::machine::Engine;
use crate::transition::{Handled, TransitionRequest};

pub const S: StateId = StateId::leaf(1);
pub const CHOICE: StateId = StateId::leaf(2);

#[derive(Debug)]
pub enum ChoiceEvent {
  E0,
}

pub trait ChoiceEvents {
  fn e0(&mut self) {}
}

pub trait ChoiceActions {
  fn a0(&mut self);
  fn a1(&mut self);
}

pub trait ChoiceGuards {
  fn g0(&self) -> bool;
}

pub type DynActions = dyn ChoiceActions;
pub type DynGuards = dyn ChoiceGuards;

pub struct ChoiceDescriptor;

impl MachineDescriptor for ChoiceDescriptor {
  type Event = ChoiceEvent;
  type Actions = DynActions;
  type Guards = DynGuards;

  fn debug_name() -> &'static str {
    "choice"
  }

  fn states() -> &'static [StateDescriptor<Self>] {
    &STATES
  }

  fn initial() -> StateId {
    S
  }
}

fn s_handle(
  current: StateId,
  event: &ChoiceEvent,
  _actions: &mut DynActions,
  _guards: &DynGuards,
) -> Handled<DynActions> {
  match event {
    ChoiceEvent::E0 => {
      Handled::Transition(TransitionRequest::new(current, CHOICE, Callback::default()))
    }
  }
}

fn choice_continuation(
  _source: StateId,
  target: StateId,
  _actions: &mut DynActions,
  guards: &DynGuards,
) -> Option<TransitionRequest<DynActions>> {
  let g0 = guards.g0();
  if g0 {
    Some(TransitionRequest::new(
      target,
      S,
      Callback::Unit(ChoiceActions::a0),
    ))
  } else {
    Some(TransitionRequest::new(
      target,
      S,
      Callback::Unit(ChoiceActions::a1),
    ))
  }
}

static STATES: [StateDescriptor<ChoiceDescriptor>; 2] = [
  StateDescriptor {
    id: S,
    name: "S",
    parent: None,
    entry: None,
    exit: None,
    continuation: None,
    handle: Some(s_handle),
  },
  StateDescriptor {
    id: CHOICE,
    name: "Choice",
    parent: None,
    entry: None,
    exit: None,
    continuation: Some(choice_continuation),
    handle: None,
  },
];

pub struct ChoiceMachine<'a> {
  engine: Engine<ChoiceDescriptor>,
  actions: &'a mut DynActions,
  guards: &'a DynGuards,
}

impl<'a> ChoiceMachine<'a> {
  pub fn new(actions: &'a mut DynActions, guards: &'a DynGuards) -> Self {
    let engine = Engine::<ChoiceDescriptor>::start(actions, guards);
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
}

impl ChoiceEvents for ChoiceMachine<'_> {
  fn e0(&mut self) {
    self
      .engine
      .dispatch(&ChoiceEvent::E0, self.actions, self.guards);
  }
}

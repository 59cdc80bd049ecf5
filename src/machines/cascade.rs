//! Two chained choice points picking the first satisfied branch: `go` leads
//! into `Pick1`, which short-circuits to `Fast` when its guard holds, or
//! falls through to `Pick2` and from there to `Mid` or `Fallback`.  However
//! deep the cascade goes, a single dispatch settles it.

use crate::callback::Callback;
use crate::descriptor::{MachineDescriptor, StateDescriptor};
use crate::id::StateId;
use crate::machine::Engine;
use crate::transition::{Handled, TransitionRequest};

pub const START: StateId = StateId::leaf(1);
pub const PICK1: StateId = StateId::leaf(2);
pub const PICK2: StateId = StateId::leaf(3);
pub const FAST: StateId = StateId::leaf(4);
pub const MID: StateId = StateId::leaf(5);
pub const FALLBACK: StateId = StateId::leaf(6);

#[derive(Debug)]
pub enum CascadeEvent {
  Go,
}

pub trait CascadeEvents {
  fn go(&mut self) {}
}

pub trait CascadeActions {
  fn begin(&mut self);
  fn fast(&mut self);
  fn next(&mut self);
  fn mid(&mut self);
  fn fallback(&mut self);
  fn landed(&mut self);
}

pub trait CascadeGuards {
  fn g1(&self) -> bool;
  fn g2(&self) -> bool;
}

pub type DynActions = dyn CascadeActions;
pub type DynGuards = dyn CascadeGuards;

pub struct CascadeDescriptor;

impl MachineDescriptor for CascadeDescriptor {
  type Event = CascadeEvent;
  type Actions = DynActions;
  type Guards = DynGuards;

  fn debug_name() -> &'static str {
    "cascade"
  }

  fn states() -> &'static [StateDescriptor<Self>] {
    &STATES
  }

  fn initial() -> StateId {
    START
  }
}

fn start_handle(
  current: StateId,
  event: &CascadeEvent,
  _actions: &mut DynActions,
  _guards: &DynGuards,
) -> Handled<DynActions> {
  match event {
    CascadeEvent::Go => Handled::Transition(TransitionRequest::new(
      current,
      PICK1,
      Callback::Unit(CascadeActions::begin),
    )),
  }
}

fn pick1_continuation(
  _source: StateId,
  target: StateId,
  _actions: &mut DynActions,
  guards: &DynGuards,
) -> Option<TransitionRequest<DynActions>> {
  let g1 = guards.g1();
  if g1 {
    Some(TransitionRequest::new(
      target,
      FAST,
      Callback::Unit(CascadeActions::fast),
    ))
  } else {
    Some(TransitionRequest::new(
      target,
      PICK2,
      Callback::Unit(CascadeActions::next),
    ))
  }
}

fn pick2_continuation(
  _source: StateId,
  target: StateId,
  _actions: &mut DynActions,
  guards: &DynGuards,
) -> Option<TransitionRequest<DynActions>> {
  let g2 = guards.g2();
  if g2 {
    Some(TransitionRequest::new(
      target,
      MID,
      Callback::Unit(CascadeActions::mid),
    ))
  } else {
    Some(TransitionRequest::new(
      target,
      FALLBACK,
      Callback::Unit(CascadeActions::fallback),
    ))
  }
}

fn enter_fallback(actions: &mut DynActions, _guards: &DynGuards) {
  actions.landed();
}

static STATES: [StateDescriptor<CascadeDescriptor>; 6] = [
  StateDescriptor {
    id: START,
    name: "Start",
    parent: None,
    entry: None,
    exit: None,
    continuation: None,
    handle: Some(start_handle),
  },
  StateDescriptor {
    id: PICK1,
    name: "Pick1",
    parent: None,
    entry: None,
    exit: None,
    continuation: Some(pick1_continuation),
    handle: None,
  },
  StateDescriptor {
    id: PICK2,
    name: "Pick2",
    parent: None,
    entry: None,
    exit: None,
    continuation: Some(pick2_continuation),
    handle: None,
  },
  StateDescriptor {
    id: FAST,
    name: "Fast",
    parent: None,
    entry: None,
    exit: None,
    continuation: None,
    handle: None,
  },
  StateDescriptor {
    id: MID,
    name: "Mid",
    parent: None,
    entry: None,
    exit: None,
    continuation: None,
    handle: None,
  },
  StateDescriptor {
    id: FALLBACK,
    name: "Fallback",
    parent: None,
    entry: Some(enter_fallback),
    exit: None,
    continuation: None,
    handle: None,
  },
];

pub struct CascadeMachine<'a> {
  engine: Engine<CascadeDescriptor>,
  actions: &'a mut DynActions,
  guards: &'a DynGuards,
}

impl<'a> CascadeMachine<'a> {
  pub fn new(actions: &'a mut DynActions, guards: &'a DynGuards) -> Self {
    let engine = Engine::<CascadeDescriptor>::start(actions, guards);
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

impl CascadeEvents for CascadeMachine<'_> {
  fn go(&mut self) {
    self
      .engine
      .dispatch(&CascadeEvent::Go, self.actions, self.guards);
  }
}

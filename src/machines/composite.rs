//! Two-level composite chart: `S0` encloses leaf `S2` and composite `S1`,
//! which encloses leaf `S3`.  Every state logs its entry/exit obligations,
//! so the tests pin down exactly which scopes open and close for sibling
//! hops, descents, self-transitions and bubbled events.
//!
//! Chart shape:
//!
//!   Initial -> S0 -> S1 (initial child)
//!   S0: E5 -> Final / a5
//!   S1: E0 -> S2 / a0,  E2 -> S3 / a2,  E4 internal / a4,
//!       E6 -> S1 / a6,  E8 internal / a8
//!   S2: E1 -> S1 / a1,  E3 -> S3 / a3,  E7 -> S2 / a7
//!   S3: E8 internal / a9

use crate::callback::Callback;
use crate::descriptor::{MachineDescriptor, StateDescriptor};
use crate::id::StateId;
use crate::machine::Engine;
use crate::transition::{Handled, TransitionRequest};

pub const INITIAL: StateId = StateId::leaf(1);
pub const FINAL: StateId = StateId::leaf(2);
pub const S0: StateId = StateId::composite(0);
pub const S1: StateId = StateId::composite_in(S0, 1);
pub const S2: StateId = StateId::leaf_in(S0, 1);
pub const S3: StateId = StateId::leaf_in(S1, 1);

#[derive(Debug)]
pub enum CompositeEvent {
  E0,
  E1,
  E2,
  E3,
  E4,
  E5,
  E6,
  E7,
  E8,
}

pub trait CompositeEvents {
  fn e0(&mut self) {}
  fn e1(&mut self) {}
  fn e2(&mut self) {}
  fn e3(&mut self) {}
  fn e4(&mut self) {}
  fn e5(&mut self) {}
  fn e6(&mut self) {}
  fn e7(&mut self) {}
  fn e8(&mut self) {}
}

pub trait CompositeActions {
  fn entry_s0(&mut self);
  fn exit_s0(&mut self);
  fn entry_s1(&mut self);
  fn exit_s1(&mut self);
  fn entry_s2(&mut self);
  fn exit_s2(&mut self);
  fn entry_s3(&mut self);
  fn exit_s3(&mut self);
  fn a0(&mut self);
  fn a1(&mut self);
  fn a2(&mut self);
  fn a3(&mut self);
  fn a4(&mut self);
  fn a5(&mut self);
  fn a6(&mut self);
  fn a7(&mut self);
  fn a8(&mut self);
  fn a9(&mut self);
}

pub type DynActions = dyn CompositeActions;

pub struct CompositeDescriptor;

impl MachineDescriptor for CompositeDescriptor {
  type Event = CompositeEvent;
  type Actions = DynActions;
  type Guards = ();

  fn debug_name() -> &'static str {
    "composite"
  }

  fn states() -> &'static [StateDescriptor<Self>] {
    &STATES
  }

  fn initial() -> StateId {
    INITIAL
  }
}

fn initial_continuation(
  _source: StateId,
  target: StateId,
  _actions: &mut DynActions,
  _guards: &(),
) -> Option<TransitionRequest<DynActions>> {
  Some(TransitionRequest::new(target, S0, Callback::default()))
}

/// Descend into the declared initial child, but only when S0's scope was
/// actually opened by this commit.  Re-targeting S0 from inside leaves the
/// machine settled on S0 itself.
fn s0_continuation(
  source: StateId,
  target: StateId,
  _actions: &mut DynActions,
  _guards: &(),
) -> Option<TransitionRequest<DynActions>> {
  if S0.must_call_entry(source, target) {
    Some(TransitionRequest::new(target, S1, Callback::default()))
  } else {
    None
  }
}

fn enter_s0(actions: &mut DynActions, _guards: &()) {
  actions.entry_s0();
}

fn leave_s0(actions: &mut DynActions, _guards: &()) {
  actions.exit_s0();
}

fn enter_s1(actions: &mut DynActions, _guards: &()) {
  actions.entry_s1();
}

fn leave_s1(actions: &mut DynActions, _guards: &()) {
  actions.exit_s1();
}

fn enter_s2(actions: &mut DynActions, _guards: &()) {
  actions.entry_s2();
}

fn leave_s2(actions: &mut DynActions, _guards: &()) {
  actions.exit_s2();
}

fn enter_s3(actions: &mut DynActions, _guards: &()) {
  actions.entry_s3();
}

fn leave_s3(actions: &mut DynActions, _guards: &()) {
  actions.exit_s3();
}

fn s0_handle(
  current: StateId,
  event: &CompositeEvent,
  _actions: &mut DynActions,
  _guards: &(),
) -> Handled<DynActions> {
  match event {
    CompositeEvent::E5 => Handled::Transition(TransitionRequest::new(
      current,
      FINAL,
      Callback::Unit(CompositeActions::a5),
    )),
    _ => Handled::NotHandled,
  }
}

fn s1_handle(
  current: StateId,
  event: &CompositeEvent,
  actions: &mut DynActions,
  _guards: &(),
) -> Handled<DynActions> {
  match event {
    CompositeEvent::E0 => Handled::Transition(TransitionRequest::new(
      current,
      S2,
      Callback::Unit(CompositeActions::a0),
    )),
    CompositeEvent::E2 => Handled::Transition(TransitionRequest::new(
      current,
      S3,
      Callback::Unit(CompositeActions::a2),
    )),
    CompositeEvent::E4 => {
      actions.a4();
      Handled::Internal
    }
    CompositeEvent::E6 => Handled::Transition(TransitionRequest::new(
      current,
      S1,
      Callback::Unit(CompositeActions::a6),
    )),
    CompositeEvent::E8 => {
      actions.a8();
      Handled::Internal
    }
    _ => Handled::NotHandled,
  }
}

fn s2_handle(
  current: StateId,
  event: &CompositeEvent,
  _actions: &mut DynActions,
  _guards: &(),
) -> Handled<DynActions> {
  match event {
    CompositeEvent::E1 => Handled::Transition(TransitionRequest::new(
      current,
      S1,
      Callback::Unit(CompositeActions::a1),
    )),
    CompositeEvent::E3 => Handled::Transition(TransitionRequest::new(
      current,
      S3,
      Callback::Unit(CompositeActions::a3),
    )),
    CompositeEvent::E7 => Handled::Transition(TransitionRequest::new(
      current,
      S2,
      Callback::Unit(CompositeActions::a7),
    )),
    _ => Handled::NotHandled,
  }
}

fn s3_handle(
  _current: StateId,
  event: &CompositeEvent,
  actions: &mut DynActions,
  _guards: &(),
) -> Handled<DynActions> {
  match event {
    CompositeEvent::E8 => {
      actions.a9();
      Handled::Internal
    }
    _ => Handled::NotHandled,
  }
}

static STATES: [StateDescriptor<CompositeDescriptor>; 6] = [
  StateDescriptor {
    id: INITIAL,
    name: "Initial",
    parent: None,
    entry: None,
    exit: None,
    continuation: Some(initial_continuation),
    handle: None,
  },
  StateDescriptor {
    id: S0,
    name: "S0",
    parent: None,
    entry: Some(enter_s0),
    exit: Some(leave_s0),
    continuation: Some(s0_continuation),
    handle: Some(s0_handle),
  },
  StateDescriptor {
    id: S1,
    name: "S1",
    parent: Some(S0),
    entry: Some(enter_s1),
    exit: Some(leave_s1),
    continuation: None,
    handle: Some(s1_handle),
  },
  StateDescriptor {
    id: S2,
    name: "S2",
    parent: Some(S0),
    entry: Some(enter_s2),
    exit: Some(leave_s2),
    continuation: None,
    handle: Some(s2_handle),
  },
  StateDescriptor {
    id: S3,
    name: "S3",
    parent: Some(S1),
    entry: Some(enter_s3),
    exit: Some(leave_s3),
    continuation: None,
    handle: Some(s3_handle),
  },
  StateDescriptor {
    id: FINAL,
    name: "Final",
    parent: None,
    entry: None,
    exit: None,
    continuation: None,
    handle: None,
  },
];

pub struct CompositeMachine<'a> {
  engine: Engine<CompositeDescriptor>,
  actions: &'a mut DynActions,
}

impl<'a> CompositeMachine<'a> {
  pub fn new(actions: &'a mut DynActions) -> Self {
    let engine = Engine::<CompositeDescriptor>::start(actions, &());
    Self { engine, actions }
  }

  pub fn state(&self) -> StateId {
    self.engine.state()
  }

  pub fn state_name(&self) -> &'static str {
    self.engine.state_name()
  }

  fn dispatch(&mut self, event: CompositeEvent) {
    self.engine.dispatch(&event, self.actions, &());
  }
}

impl CompositeEvents for CompositeMachine<'_> {
  fn e0(&mut self) {
    self.dispatch(CompositeEvent::E0);
  }

  fn e1(&mut self) {
    self.dispatch(CompositeEvent::E1);
  }

  fn e2(&mut self) {
    self.dispatch(CompositeEvent::E2);
  }

  fn e3(&mut self) {
    self.dispatch(CompositeEvent::E3);
  }

  fn e4(&mut self) {
    self.dispatch(CompositeEvent::E4);
  }

  fn e5(&mut self) {
    self.dispatch(CompositeEvent::E5);
  }

  fn e6(&mut self) {
    self.dispatch(CompositeEvent::E6);
  }

  fn e7(&mut self) {
    self.dispatch(CompositeEvent::E7);
  }

  fn e8(&mut self) {
    self.dispatch(CompositeEvent::E8);
  }
}

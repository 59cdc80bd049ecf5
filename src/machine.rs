use log::{debug, trace};

use crate::callback::Callback;
use crate::descriptor::{validate, MachineDescriptor, StateDescriptor};
use crate::id::StateId;
use crate::transition::{Handled, TransitionRequest};

/// Upper bound on back-to-back transition commits while settling a single
/// dispatch.  A chain this long means two choice states are feeding each
/// other and the machine would never come to rest.
pub const MAX_TRANSITION_CHAIN: usize = 32;

/// Drives one machine described by `D`.  Holds the current state (an index
/// into the descriptor table) and at most one pending transition request,
/// and settles every dispatched event into a stable configuration before
/// returning control to the caller.
///
/// The application's action/guard implementations are not stored here; the
/// caller passes them to each dispatch so the engine itself stays free of
/// borrows between events.
pub struct Engine<D: MachineDescriptor + 'static> {
  states: &'static [StateDescriptor<D>],
  current: usize,
  pending: Option<TransitionRequest<D::Actions>>,
}

impl<D: MachineDescriptor + 'static> Engine<D> {
  /// Validate the descriptor table, then run the construction-time
  /// transition into `D::initial()` (continuations included) so the machine
  /// is already settled when this returns.
  ///
  /// Panics if the table is malformed; a generated table that fails
  /// validation cannot be run safely.
  pub fn start(actions: &mut D::Actions, guards: &D::Guards) -> Self {
    let states = D::states();
    if let Err(error) = validate(states, D::initial()) {
      panic!("{}: rejected state table: {}", D::debug_name(), error);
    }
    let mut machine = Self {
      states,
      // Placeholder until the first commit lands; the construction-time
      // request below carries the invalid source, so no exit walk reads it.
      current: 0,
      pending: Some(TransitionRequest::new(
        StateId::INVALID,
        D::initial(),
        Callback::default(),
      )),
    };
    machine.settle(actions, guards);
    debug!("{}: started in [{}]", D::debug_name(), machine.state_name());
    machine
  }

  /// Offer `event` to the current state, then to each enclosing scope in
  /// turn until some handler takes it.  An event nobody handles is
  /// discarded.  Any transition the handler requested (and every follow-up
  /// a continuation asks for) is committed before this returns.
  pub fn dispatch(&mut self, event: &D::Event, actions: &mut D::Actions, guards: &D::Guards) {
    debug_assert!(
      self.pending.is_none(),
      "{}: dispatch re-entered while a transition was pending",
      D::debug_name()
    );
    let states = self.states;
    let source = states[self.current].id;
    let mut level = Some(self.current);
    while let Some(index) = level {
      if let Some(handle) = states[index].handle {
        match handle(source, event, actions, guards) {
          Handled::Transition(request) => {
            self.pending = Some(request);
            break;
          }
          Handled::Internal => break,
          Handled::NotHandled => {}
        }
      }
      level = self.parent_index(index);
    }
    if level.is_none() {
      debug!(
        "{}: [{}] ignored {:?}",
        D::debug_name(),
        self.state_name(),
        event
      );
    }
    self.settle(actions, guards);
  }

  /// Id of the state the machine has settled on.
  pub fn state(&self) -> StateId {
    self.states[self.current].id
  }

  pub fn state_name(&self) -> &'static str {
    self.states[self.current].name
  }

  fn settle(&mut self, actions: &mut D::Actions, guards: &D::Guards) {
    let mut commits = 0;
    while let Some(request) = self.pending.take() {
      commits += 1;
      if commits > MAX_TRANSITION_CHAIN {
        panic!(
          "{}: transition chain still unsettled after {} commits (at [{}]); guard cycle?",
          D::debug_name(),
          MAX_TRANSITION_CHAIN,
          self.state_name()
        );
      }
      self.commit(&request, actions, guards);
    }
  }

  /// Run one requested transition: close scopes up from the current state,
  /// invoke the transition action, open scopes down to the target, then let
  /// the target's continuation queue the next hop if it has one.
  fn commit(
    &mut self,
    request: &TransitionRequest<D::Actions>,
    actions: &mut D::Actions,
    guards: &D::Guards,
  ) {
    let states = self.states;
    debug!(
      "{}: [{}] => [{}]",
      D::debug_name(),
      self.name_of(request.source),
      self.name_of(request.target)
    );

    // The construction-time transition has nothing to close yet.
    if request.source.is_valid() {
      let mut level = Some(self.current);
      while let Some(index) = level {
        let state = &states[index];
        if state.id.must_call_exit(request.source, request.target) {
          if let Some(exit) = state.exit {
            trace!("{}: exit [{}]", D::debug_name(), state.name);
            exit(actions, guards);
          }
        }
        level = self.parent_index(index);
      }
    }

    request.action.invoke(actions);

    let target = match self.index_of(request.target) {
      Some(index) => index,
      None => panic!(
        "{}: no descriptor for transition target {:?} (from {:?})",
        D::debug_name(),
        request.target,
        request.source
      ),
    };
    self.enter_chain(target, request.source, request.target, actions, guards);
    self.current = target;

    if let Some(continuation) = states[target].continuation {
      self.pending = continuation(request.source, request.target, actions, guards);
    }
  }

  /// Entry obligations run outermost scope first, so recurse to the parent
  /// before firing this level.
  fn enter_chain(
    &self,
    index: usize,
    source: StateId,
    target: StateId,
    actions: &mut D::Actions,
    guards: &D::Guards,
  ) {
    if let Some(parent) = self.parent_index(index) {
      self.enter_chain(parent, source, target, actions, guards);
    }
    let state = &self.states[index];
    if state.id.must_call_entry(source, target) {
      if let Some(entry) = state.entry {
        trace!("{}: enter [{}]", D::debug_name(), state.name);
        entry(actions, guards);
      }
    }
  }

  fn parent_index(&self, index: usize) -> Option<usize> {
    self.states[index].parent.and_then(|id| self.index_of(id))
  }

  fn index_of(&self, id: StateId) -> Option<usize> {
    self.states.iter().position(|state| state.id == id)
  }

  fn name_of(&self, id: StateId) -> &'static str {
    match self.index_of(id) {
      Some(index) => self.states[index].name,
      None => "<none>",
    }
  }
}

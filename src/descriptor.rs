use std::fmt::Debug;

use thiserror::Error;

use crate::id::StateId;
use crate::transition::{Handled, TransitionRequest};

/// Compile-time description of one generated machine: its event type, the
/// application interfaces it calls through, the static state table, and
/// where construction lands.
pub trait MachineDescriptor: Sized {
  type Event: Debug;
  type Actions: ?Sized;
  type Guards: ?Sized;

  fn debug_name() -> &'static str;
  fn states() -> &'static [StateDescriptor<Self>];

  /// Target of the construction-time transition, normally an initial
  /// pseudostate whose continuation picks the first real state.
  fn initial() -> StateId;
}

/// One state's row in the generated table.
///
/// `entry`/`exit` are the obligations run when the state's scope opens and
/// closes.  `continuation` runs when the state is the committed transition
/// target and may request the next transition: choice pseudostates branch on
/// guards here, initial pseudostates and composites with a declared initial
/// child request their descent.  `handle` is the event handler; a state
/// without one defers every event to its parent scope.
pub struct StateDescriptor<D: MachineDescriptor> {
  pub id: StateId,
  pub name: &'static str,
  pub parent: Option<StateId>,
  pub entry: Option<fn(&mut D::Actions, &D::Guards)>,
  pub exit: Option<fn(&mut D::Actions, &D::Guards)>,
  pub continuation:
    Option<fn(StateId, StateId, &mut D::Actions, &D::Guards) -> Option<TransitionRequest<D::Actions>>>,
  pub handle: Option<fn(StateId, &D::Event, &mut D::Actions, &D::Guards) -> Handled<D::Actions>>,
}

/// Why a state table was rejected before the machine could run.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DefinitionError {
  #[error("state table is empty")]
  EmptyTable,

  #[error("the invalid sentinel cannot be registered as a state")]
  InvalidId,

  #[error("state {0:?} is registered twice")]
  DuplicateId(StateId),

  #[error("state {0:?} names unregistered parent {1:?}")]
  UnknownParent(StateId, StateId),

  #[error("state {0:?} names leaf {1:?} as its parent")]
  LeafParent(StateId, StateId),

  #[error("state {0:?} is not encoded directly within the scope of {1:?}")]
  ScopeMismatch(StateId, StateId),

  #[error("initial target {0:?} is not registered")]
  UnknownInitial(StateId),
}

/// Check a table for the malformations a generator bug (or a hand-written
/// table) could introduce.  Run by the engine before the first transition.
pub fn validate<D: MachineDescriptor>(
  states: &[StateDescriptor<D>],
  initial: StateId,
) -> Result<(), DefinitionError> {
  if states.is_empty() {
    return Err(DefinitionError::EmptyTable);
  }
  for (i, state) in states.iter().enumerate() {
    if !state.id.is_valid() {
      return Err(DefinitionError::InvalidId);
    }
    if states[..i].iter().any(|other| other.id == state.id) {
      return Err(DefinitionError::DuplicateId(state.id));
    }
    if let Some(parent) = state.parent {
      if !states.iter().any(|other| other.id == parent) {
        return Err(DefinitionError::UnknownParent(state.id, parent));
      }
      if !parent.is_composite() {
        return Err(DefinitionError::LeafParent(state.id, parent));
      }
      if !directly_scoped(parent, state.id) {
        return Err(DefinitionError::ScopeMismatch(state.id, parent));
      }
    }
  }
  if !states.iter().any(|state| state.id == initial) {
    return Err(DefinitionError::UnknownInitial(initial));
  }
  Ok(())
}

/// A child must carry its parent's scope bits exactly: leaves add only a
/// discriminator, composites add exactly one fresh tag bit.  This also rules
/// out parent cycles, since scope strictly grows on the way down.
fn directly_scoped(parent: StateId, child: StateId) -> bool {
  if child.is_composite() {
    let added = child.scope_bits() & !parent.scope_bits();
    added != 0
      && added & (added - 1) == 0
      && child.scope_bits() & parent.scope_bits() == parent.scope_bits()
  } else {
    child.scope_bits() == parent.scope_bits()
  }
}

use crate::callback::Callback;
use crate::id::StateId;

/// A wish to leave `source` for `target`, produced by an event handler or a
/// continuation hook.  Lives only in the engine's pending slot and is
/// consumed by the next commit; it never survives across two commits.
pub struct TransitionRequest<A: ?Sized> {
  pub source: StateId,
  pub target: StateId,
  pub action: Callback<A>,
}

impl<A: ?Sized> TransitionRequest<A> {
  pub fn new(source: StateId, target: StateId, action: Callback<A>) -> Self {
    Self { source, target, action }
  }
}

impl<A: ?Sized> Clone for TransitionRequest<A> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<A: ?Sized> Copy for TransitionRequest<A> {}

/// What a state's handler did with an event.
pub enum Handled<A: ?Sized> {
  /// A structural transition was requested; the engine commits it next.
  Transition(TransitionRequest<A>),

  /// The event was consumed in place (an internal transition or a guarded
  /// handler whose branches all declined): no exit/entry fires and the
  /// current state is unchanged.
  Internal,

  /// Not claimed at this level; the engine offers the event to the
  /// enclosing scope, innermost outward.
  NotHandled,
}

use std::fmt;

const DISCRIMINATOR_MASK: u64 = 0xFF;
const FIRST_TAG_BIT: u32 = 8;

/// Compact encoding of a state's position in the chart hierarchy.
///
/// Every composite state owns one tag bit above the low byte, unique across
/// the whole chart.  A composite's id is its parent's id OR'd with its own
/// tag bit; a leaf's id is its parent's id OR'd with a non-zero discriminator
/// in the low byte (counted per enclosing scope).  Ancestry then reduces to
/// bit masking: every scope bit of an ancestor is present in each of its
/// descendants.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(u64);

impl StateId {
  /// Sentinel for "no state"; the source of the construction-time transition.
  pub const INVALID: StateId = StateId(0);

  /// Top-level composite state owning tag bit `n`.
  pub const fn composite(n: u32) -> StateId {
    StateId(1 << (FIRST_TAG_BIT + n))
  }

  /// Composite state nested in `parent`, owning tag bit `n`.
  pub const fn composite_in(parent: StateId, n: u32) -> StateId {
    StateId(parent.0 | 1 << (FIRST_TAG_BIT + n))
  }

  /// Top-level leaf state with discriminator `n`, counted from 1.
  pub const fn leaf(n: u8) -> StateId {
    StateId(n as u64)
  }

  /// Leaf state nested in `parent`, with discriminator `n` counted from 1
  /// among the siblings of that scope.
  pub const fn leaf_in(parent: StateId, n: u8) -> StateId {
    StateId(parent.0 | n as u64)
  }

  pub const fn is_valid(self) -> bool {
    self.0 != 0
  }

  /// Composite states carry no discriminator, only scope bits.
  pub const fn is_composite(self) -> bool {
    self.0 & DISCRIMINATOR_MASK == 0 && self.0 != 0
  }

  /// The id with its discriminator byte dropped: the set of enclosing scope
  /// tag bits (plus the state's own, when composite).
  pub const fn scope_bits(self) -> u64 {
    self.0 & !DISCRIMINATOR_MASK
  }

  /// True when every scope bit of `self` is also set in `other`.
  pub const fn is_ancestor_or_self(self, other: StateId) -> bool {
    self.scope_bits() & other.scope_bits() == self.scope_bits()
  }

  /// Whether this state's entry obligation fires when a `source` -> `target`
  /// transition commits.  An explicit self-transition re-enters its own state
  /// unconditionally; otherwise a composite scope that already enclosed
  /// `source` was never left, so it is not re-entered.
  pub const fn must_call_entry(self, source: StateId, target: StateId) -> bool {
    if source.0 == target.0 && self.0 == source.0 {
      return true;
    }
    if self.is_composite() && self.is_ancestor_or_self(source) {
      return false;
    }
    true
  }

  /// Exit-side mirror of [`StateId::must_call_entry`]: a composite scope that
  /// still encloses the pending `target` is never left, so it does not exit.
  pub const fn must_call_exit(self, source: StateId, target: StateId) -> bool {
    if source.0 == target.0 && self.0 == source.0 {
      return true;
    }
    if self.is_composite() && self.is_ancestor_or_self(target) {
      return false;
    }
    true
  }
}

impl fmt::Debug for StateId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "StateId({:#x})", self.0)
  }
}

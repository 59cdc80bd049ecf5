/// Allocation-free bound action carried by a transition: a method on the
/// application's actions object plus at most one scalar argument, copied
/// inline.
///
/// The actions object itself is not captured; the engine supplies it at
/// invocation.  That keeps the value `Copy` and a few machine words wide no
/// matter what `A` is, and the closed variant set is the capacity bound:
/// argument kinds outside it have no constructor at all.
pub enum Callback<A: ?Sized> {
  None,
  Unit(fn(&mut A)),
  WithI32(fn(&mut A, i32), i32),
  WithBool(fn(&mut A, bool), bool),
  WithF32(fn(&mut A, f32), f32),
  WithStr(fn(&mut A, &'static str), &'static str),
}

impl<A: ?Sized> Callback<A> {
  /// Deliver the bound call to `actions`.  The unbound value is a no-op.
  /// Invocation never consumes the callback; calling it N times re-delivers
  /// the identical call N times.
  pub fn invoke(&self, actions: &mut A) {
    match *self {
      Callback::None => {}
      Callback::Unit(f) => f(actions),
      Callback::WithI32(f, v) => f(actions, v),
      Callback::WithBool(f, v) => f(actions, v),
      Callback::WithF32(f, v) => f(actions, v),
      Callback::WithStr(f, v) => f(actions, v),
    }
  }
}

// Derives would demand `A: Clone`/`A: Copy`, but the variants only ever hold
// fn pointers and scalars, so the impls hold for any `A`.
impl<A: ?Sized> Clone for Callback<A> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<A: ?Sized> Copy for Callback<A> {}

impl<A: ?Sized> Default for Callback<A> {
  fn default() -> Self {
    Callback::None
  }
}

#[cfg(test)]
mod tests {
  use super::Callback;

  #[derive(Default)]
  struct Recorder {
    log: Vec<String>,
  }

  impl Recorder {
    fn ping(&mut self) {
      self.log.push(String::from("ping()"));
    }

    fn count(&mut self, v: i32) {
      self.log.push(format!("count({})", v));
    }

    fn flag(&mut self, v: bool) {
      self.log.push(format!("flag({})", v));
    }

    fn level(&mut self, v: f32) {
      self.log.push(format!("level({})", v));
    }

    fn tag(&mut self, v: &'static str) {
      self.log.push(format!("tag({})", v));
    }
  }

  #[test]
  fn default_value_is_a_no_op() {
    let mut rec = Recorder::default();
    let cb = Callback::<Recorder>::default();
    cb.invoke(&mut rec);
    cb.invoke(&mut rec);
    assert!(rec.log.is_empty());
  }

  #[test]
  fn bound_method_without_argument() {
    let mut rec = Recorder::default();
    let cb = Callback::Unit(Recorder::ping);
    cb.invoke(&mut rec);
    assert_eq!(rec.log, vec!["ping()"]);
  }

  #[test]
  fn repeated_invocation_redelivers_the_call() {
    let mut rec = Recorder::default();
    let cb = Callback::WithI32(Recorder::count, 13);
    cb.invoke(&mut rec);
    cb.invoke(&mut rec);
    cb.invoke(&mut rec);
    assert_eq!(rec.log, vec!["count(13)", "count(13)", "count(13)"]);
  }

  #[test]
  fn copies_invoke_independently_with_identical_effect() {
    let mut rec = Recorder::default();
    let original = Callback::WithStr(Recorder::tag, "job-7");
    let copy = original;
    original.invoke(&mut rec);
    copy.invoke(&mut rec);
    assert_eq!(rec.log, vec!["tag(job-7)", "tag(job-7)"]);
  }

  #[test]
  fn every_argument_kind_is_delivered_verbatim() {
    let mut rec = Recorder::default();
    Callback::WithI32(Recorder::count, -252).invoke(&mut rec);
    Callback::WithBool(Recorder::flag, true).invoke(&mut rec);
    Callback::WithF32(Recorder::level, 123.456).invoke(&mut rec);
    Callback::WithStr(Recorder::tag, "test123").invoke(&mut rec);
    assert_eq!(
      rec.log,
      vec!["count(-252)", "flag(true)", "level(123.456)", "tag(test123)"]);
  }

  #[test]
  fn overwriting_a_slot_replaces_the_binding() {
    let mut rec = Recorder::default();
    let mut slot = Callback::WithI32(Recorder::count, 1);
    slot = Callback::Unit(Recorder::ping);
    slot.invoke(&mut rec);
    assert_eq!(rec.log, vec!["ping()"]);
  }

  #[test]
  fn value_stays_a_few_words_wide() {
    assert!(
      std::mem::size_of::<Callback<Recorder>>() <= 4 * std::mem::size_of::<usize>());
  }
}

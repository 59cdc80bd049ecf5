//! UART driver chart: a flat machine pushing a serial port through its
//! configure/run/suspend/stop lifecycle.  Hardware is only touched through
//! the [`UartActions`] object, so the same chart drives real registers or a
//! test recorder.

use crate::callback::Callback;
use crate::descriptor::{MachineDescriptor, StateDescriptor};
use crate::id::StateId;
use crate::machine::Engine;
use crate::transition::{Handled, TransitionRequest};

pub const IDLE: StateId = StateId::leaf(1);
pub const RUNNING: StateId = StateId::leaf(2);
pub const SUSPENDING: StateId = StateId::leaf(3);
pub const SUSPENDED: StateId = StateId::leaf(4);
pub const STOPPING: StateId = StateId::leaf(5);

#[derive(Debug)]
pub enum UartEvent {
  Configure,
  Start,
  Stop,
  Suspend,
  Resume,
  Stopped,
}

/// Event interface the application drives the machine through.  Default
/// bodies do nothing so senders can be stubbed out.
pub trait UartEvents {
  fn configure(&mut self) {}
  fn start(&mut self) {}
  fn stop(&mut self) {}
  fn suspend(&mut self) {}
  fn resume(&mut self) {}
  fn stopped(&mut self) {}
}

/// Hardware operations the chart calls into.
pub trait UartActions {
  fn save_config(&mut self);
  fn set_error(&mut self);
  fn configure_hw(&mut self);
  fn start_hw(&mut self);
  fn stop_hw(&mut self);
}

pub trait UartGuards {
  /// Is the saved configuration complete enough to bring the port up?
  fn config_ok(&self) -> bool;
}

pub type DynActions = dyn UartActions;
pub type DynGuards = dyn UartGuards;

pub struct UartDescriptor;

impl MachineDescriptor for UartDescriptor {
  type Event = UartEvent;
  type Actions = DynActions;
  type Guards = DynGuards;

  fn debug_name() -> &'static str {
    "uart"
  }

  fn states() -> &'static [StateDescriptor<Self>] {
    &STATES
  }

  fn initial() -> StateId {
    IDLE
  }
}

fn idle_handle(
  current: StateId,
  event: &UartEvent,
  actions: &mut DynActions,
  guards: &DynGuards,
) -> Handled<DynActions> {
  match event {
    UartEvent::Configure => {
      actions.save_config();
      Handled::Internal
    }
    UartEvent::Start => {
      if guards.config_ok() {
        Handled::Transition(TransitionRequest::new(
          current,
          RUNNING,
          Callback::Unit(UartActions::configure_hw),
        ))
      } else {
        actions.set_error();
        Handled::Internal
      }
    }
    _ => Handled::NotHandled,
  }
}

fn running_handle(
  current: StateId,
  event: &UartEvent,
  _actions: &mut DynActions,
  _guards: &DynGuards,
) -> Handled<DynActions> {
  match event {
    UartEvent::Suspend => Handled::Transition(TransitionRequest::new(
      current,
      SUSPENDING,
      Callback::default(),
    )),
    UartEvent::Stop => Handled::Transition(TransitionRequest::new(
      current,
      STOPPING,
      Callback::default(),
    )),
    _ => Handled::NotHandled,
  }
}

fn suspending_handle(
  current: StateId,
  event: &UartEvent,
  _actions: &mut DynActions,
  _guards: &DynGuards,
) -> Handled<DynActions> {
  match event {
    UartEvent::Stopped => Handled::Transition(TransitionRequest::new(
      current,
      SUSPENDED,
      Callback::Unit(UartActions::stop_hw),
    )),
    _ => Handled::NotHandled,
  }
}

fn suspended_handle(
  current: StateId,
  event: &UartEvent,
  _actions: &mut DynActions,
  _guards: &DynGuards,
) -> Handled<DynActions> {
  match event {
    UartEvent::Resume => Handled::Transition(TransitionRequest::new(
      current,
      RUNNING,
      Callback::Unit(UartActions::start_hw),
    )),
    UartEvent::Stop => {
      Handled::Transition(TransitionRequest::new(current, IDLE, Callback::default()))
    }
    _ => Handled::NotHandled,
  }
}

fn stopping_handle(
  current: StateId,
  event: &UartEvent,
  _actions: &mut DynActions,
  _guards: &DynGuards,
) -> Handled<DynActions> {
  match event {
    UartEvent::Stopped => Handled::Transition(TransitionRequest::new(
      current,
      IDLE,
      Callback::Unit(UartActions::stop_hw),
    )),
    _ => Handled::NotHandled,
  }
}

static STATES: [StateDescriptor<UartDescriptor>; 5] = [
  StateDescriptor {
    id: IDLE,
    name: "Idle",
    parent: None,
    entry: None,
    exit: None,
    continuation: None,
    handle: Some(idle_handle),
  },
  StateDescriptor {
    id: RUNNING,
    name: "Running",
    parent: None,
    entry: None,
    exit: None,
    continuation: None,
    handle: Some(running_handle),
  },
  StateDescriptor {
    id: SUSPENDING,
    name: "Suspending",
    parent: None,
    entry: None,
    exit: None,
    continuation: None,
    handle: Some(suspending_handle),
  },
  StateDescriptor {
    id: SUSPENDED,
    name: "Suspended",
    parent: None,
    entry: None,
    exit: None,
    continuation: None,
    handle: Some(suspended_handle),
  },
  StateDescriptor {
    id: STOPPING,
    name: "Stopping",
    parent: None,
    entry: None,
    exit: None,
    continuation: None,
    handle: Some(stopping_handle),
  },
];

pub struct UartMachine<'a> {
  engine: Engine<UartDescriptor>,
  actions: &'a mut DynActions,
  guards: &'a DynGuards,
}

impl<'a> UartMachine<'a> {
  pub fn new(actions: &'a mut DynActions, guards: &'a DynGuards) -> Self {
    let engine = Engine::<UartDescriptor>::start(actions, guards);
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

  fn dispatch(&mut self, event: UartEvent) {
    self.engine.dispatch(&event, self.actions, self.guards);
  }
}

impl UartEvents for UartMachine<'_> {
  fn configure(&mut self) {
    self.dispatch(UartEvent::Configure);
  }

  fn start(&mut self) {
    self.dispatch(UartEvent::Start);
  }

  fn stop(&mut self) {
    self.dispatch(UartEvent::Stop);
  }

  fn suspend(&mut self) {
    self.dispatch(UartEvent::Suspend);
  }

  fn resume(&mut self) {
    self.dispatch(UartEvent::Resume);
  }

  fn stopped(&mut self) {
    self.dispatch(UartEvent::Stopped);
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

  impl UartActions for Recorder {
    fn save_config(&mut self) {
      self.note("saveConfig");
    }

    fn set_error(&mut self) {
      self.note("setError");
    }

    fn configure_hw(&mut self) {
      self.note("configureHw");
    }

    fn start_hw(&mut self) {
      self.note("startHw");
    }

    fn stop_hw(&mut self) {
      self.note("stopHw");
    }
  }

  struct Flags {
    config_ok: Cell<bool>,
  }

  impl Flags {
    fn new(config_ok: bool) -> Self {
      Self {
        config_ok: Cell::new(config_ok),
      }
    }
  }

  impl UartGuards for Flags {
    fn config_ok(&self) -> bool {
      self.config_ok.get()
    }
  }

  #[test]
  fn starts_in_idle_with_nothing_performed() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(true);
    let machine = UartMachine::new(&mut recorder, &flags);
    assert_eq!(machine.state(), IDLE);
    drop(machine);
    assert!(recorder.log.is_empty());
  }

  #[test]
  fn configure_is_saved_without_leaving_idle() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(true);
    let mut machine = UartMachine::new(&mut recorder, &flags);
    machine.configure();
    assert_eq!(machine.state(), IDLE);
    drop(machine);
    assert_eq!(recorder.log, vec!["saveConfig"]);
  }

  #[test]
  fn start_with_a_bad_config_reports_an_error_and_stays() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(false);
    let mut machine = UartMachine::new(&mut recorder, &flags);
    machine.start();
    assert_eq!(machine.state(), IDLE);
    drop(machine);
    assert_eq!(recorder.log, vec!["setError"]);
  }

  #[test]
  fn start_with_a_good_config_brings_the_hardware_up() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(true);
    let mut machine = UartMachine::new(&mut recorder, &flags);
    machine.start();
    assert_eq!(machine.state(), RUNNING);
    drop(machine);
    assert_eq!(recorder.log, vec!["configureHw"]);
  }

  #[test]
  fn suspend_resume_cycle_bounces_the_hardware() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(true);
    let mut machine = UartMachine::new(&mut recorder, &flags);
    machine.start();
    machine.suspend();
    assert_eq!(machine.state(), SUSPENDING);
    machine.stopped();
    assert_eq!(machine.state(), SUSPENDED);
    machine.resume();
    assert_eq!(machine.state(), RUNNING);
    drop(machine);
    assert_eq!(recorder.log, vec!["configureHw", "stopHw", "startHw"]);
  }

  #[test]
  fn stopping_out_of_suspended_returns_to_idle() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(true);
    let mut machine = UartMachine::new(&mut recorder, &flags);
    machine.start();
    machine.suspend();
    machine.stopped();
    machine.stop();
    assert_eq!(machine.state(), IDLE);
    drop(machine);
    assert_eq!(recorder.log, vec!["configureHw", "stopHw"]);
  }

  #[test]
  fn stop_while_running_waits_for_the_stopped_callback() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(true);
    let mut machine = UartMachine::new(&mut recorder, &flags);
    machine.start();
    machine.stop();
    assert_eq!(machine.state(), STOPPING);
    assert_eq!(machine.state_name(), "Stopping");
    machine.stopped();
    assert_eq!(machine.state(), IDLE);
    drop(machine);
    assert_eq!(recorder.log, vec!["configureHw", "stopHw"]);
  }

  #[test]
  fn events_without_a_handler_are_ignored() {
    let mut recorder = Recorder::default();
    let flags = Flags::new(true);
    let mut machine = UartMachine::new(&mut recorder, &flags);
    machine.resume();
    machine.stopped();
    assert_eq!(machine.state(), IDLE);
    drop(machine);
    assert!(recorder.log.is_empty());
  }
}

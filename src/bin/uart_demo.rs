//! Drive the UART reference machine from the command line: list event names
//! and watch which transitions and hardware calls each one settles into.
//!
//! Example:
//!
//!   uart_demo --config-ok configure start suspend stopped resume stop stopped

use anyhow::bail;
use clap::Parser;

use microhsm::machines::uart::{UartActions, UartEvents, UartGuards, UartMachine};

#[derive(Parser, Debug)]
#[clap(name = "uart_demo")]
struct Opts {
    /// Answer the readiness guard with true.
    #[clap(long)]
    config_ok: bool,

    /// Events to dispatch, in order: configure, start, stop, suspend, resume, stopped.
    events: Vec<String>,
}

struct ConsoleHw;

impl UartActions for ConsoleHw {
    fn save_config(&mut self) {
        println!("  hw: saveConfig");
    }

    fn set_error(&mut self) {
        println!("  hw: setError");
    }

    fn configure_hw(&mut self) {
        println!("  hw: configureHw");
    }

    fn start_hw(&mut self) {
        println!("  hw: startHw");
    }

    fn stop_hw(&mut self) {
        println!("  hw: stopHw");
    }
}

struct FixedGuards {
    config_ok: bool,
}

impl UartGuards for FixedGuards {
    fn config_ok(&self) -> bool {
        self.config_ok
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();

    let mut hw = ConsoleHw;
    let guards = FixedGuards {
        config_ok: opts.config_ok,
    };
    let mut machine = UartMachine::new(&mut hw, &guards);
    println!("up in [{}]", machine.state_name());

    for name in &opts.events {
        match name.as_str() {
            "configure" => machine.configure(),
            "start" => machine.start(),
            "stop" => machine.stop(),
            "suspend" => machine.suspend(),
            "resume" => machine.resume(),
            "stopped" => machine.stopped(),
            other => bail!("unknown event: {}", other),
        }
        println!("{} => [{}]", name, machine.state_name());
    }

    println!("settled in [{}]", machine.state_name());
    Ok(())
}

use std::env;
use std::process::ExitCode;

use devinst::args::{self, Command, UsageError};

fn main() -> ExitCode {
    let argv: Vec<String> = env::args().collect();

    match args::parse(&argv) {
        Ok(command) => dispatch(command),
        Err(err) => {
            // The usage line stands on its own; everything else is an error.
            match err {
                UsageError::TooManyArguments { .. } => eprintln!("{err}"),
                _ => eprintln!("ERROR: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(windows)]
fn dispatch(command: Command) -> ExitCode {
    match devinst::run(&command) {
        Ok(outcome) => {
            if outcome.reboot_required {
                println!("IMPORTANT: You must reboot your system for the change to take effect.");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(windows))]
fn dispatch(_command: Command) -> ExitCode {
    eprintln!("ERROR: devinst only runs on Windows.");
    ExitCode::FAILURE
}

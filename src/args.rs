//! Command-line argument shape validation.
//!
//! Accepted shapes are exactly `<GUID>` (remove) and `--install <GUID>`.
//! Shape errors are reported before anything touches the device service.

use std::error::Error;
use std::fmt::{self, Display};
use std::path::Path;

const INSTALL_FLAG: &str = "--install";

/// Which device action one invocation performs. Fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Install,
    Remove,
}

/// A validated invocation: the action to take and the raw identifier text.
/// The identifier is parsed later, as the first workflow step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub mode: Mode,
    pub identifier: String,
}

/// Validates `argv` (program name included) against the accepted shapes.
pub fn parse(argv: &[String]) -> Result<Command, UsageError> {
    match argv {
        [] | [_] => Err(UsageError::MissingIdentifier),
        [_, identifier] => Ok(Command {
            mode: Mode::Remove,
            identifier: identifier.clone(),
        }),
        [_, flag, identifier] if flag == INSTALL_FLAG => Ok(Command {
            mode: Mode::Install,
            identifier: identifier.clone(),
        }),
        [_, flag, _] => Err(UsageError::UnknownFlag(flag.clone())),
        [program, ..] => Err(UsageError::TooManyArguments {
            program: file_name(program),
        }),
    }
}

/// The invoking program with any path stripped, for the usage line.
fn file_name(program: &str) -> String {
    Path::new(program)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    MissingIdentifier,
    UnknownFlag(String),
    TooManyArguments { program: String },
}

impl Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::MissingIdentifier => write!(f, "No GUID specified."),
            UsageError::UnknownFlag(flag) => write!(f, "Wrong flag: {flag}"),
            UsageError::TooManyArguments { program } => {
                write!(f, "Usage: {program} [{INSTALL_FLAG}] GUID")
            }
        }
    }
}

impl Error for UsageError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_identifier_selects_remove() {
        let command = parse(&argv(&["devinst", "{guid}"])).unwrap();
        assert_eq!(command.mode, Mode::Remove);
        assert_eq!(command.identifier, "{guid}");
    }

    #[test]
    fn install_flag_selects_install() {
        let command = parse(&argv(&["devinst", "--install", "{guid}"])).unwrap();
        assert_eq!(command.mode, Mode::Install);
        assert_eq!(command.identifier, "{guid}");
    }

    #[test]
    fn no_arguments_is_a_missing_identifier() {
        assert_eq!(
            parse(&argv(&["devinst"])),
            Err(UsageError::MissingIdentifier)
        );
        assert_eq!(parse(&[]), Err(UsageError::MissingIdentifier));
    }

    #[test]
    fn unrecognized_flag_is_rejected() {
        assert_eq!(
            parse(&argv(&["devinst", "--uninstall", "{guid}"])),
            Err(UsageError::UnknownFlag("--uninstall".to_string()))
        );
    }

    #[test]
    fn too_many_arguments_names_the_program() {
        let err = parse(&argv(&["/usr/bin/devinst", "too", "many", "args"])).unwrap_err();
        assert_eq!(
            err,
            UsageError::TooManyArguments {
                program: "devinst".to_string()
            }
        );
        assert_eq!(err.to_string(), "Usage: devinst [--install] GUID");
    }
}

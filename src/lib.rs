//! # devinst
//!
//! Installs or removes a Windows device by its device-class GUID using
//! `windows-sys` bindings to SetupAPI and newdev.
//!
//! The workflow is strictly sequential and single-shot: parse the textual
//! identifier, open a device information set scoped to the class, take the
//! first enumerated instance, then dispatch the install or remove action and
//! report whether a reboot is required. Every failure is terminal; the tool
//! never retries, never tries an alternate device match, and never rolls
//! back partial device state.
//!
//! ## Example
//!
//! ```rust,no_run
//! use devinst::args::{Command, Mode};
//!
//! let command = Command {
//!     mode: Mode::Remove,
//!     identifier: "{4d36e96b-e325-11ce-bfc1-08002be10318}".to_string(),
//! };
//! # #[cfg(windows)]
//! match devinst::run(&command) {
//!     Ok(outcome) if outcome.reboot_required => println!("reboot needed"),
//!     Ok(_) => {}
//!     Err(e) => eprintln!("ERROR: {e}"),
//! }
//! ```
//!
//! ## Important Notes
//!
//! - Device installation and removal require administrator privileges.
//! - A reported reboot requirement is surfaced to the operator, never
//!   triggered by the tool.

pub mod args;
pub mod guid;
pub mod win32;

#[cfg(windows)]
mod action;
#[cfg(windows)]
mod devinfo;

use std::error;
use std::fmt::{self, Display};

use crate::args::Mode;
#[cfg(windows)]
use crate::args::Command;

/// Outcome of a successfully dispatched action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// The change does not take full effect until the host restarts.
    /// Orthogonal to success; the action itself has already completed.
    pub reboot_required: bool,
}

/// A failed workflow step. Non-parse variants carry the Win32 code captured
/// immediately after the underlying call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The identifier text does not parse as a class GUID.
    MalformedIdentifier(guid::ParseError),
    /// The device service could not produce an enumeration handle.
    EnumerationUnavailable(win32::Error),
    /// Enumeration succeeded but holds no device at the expected position.
    NoMatchingDevice(win32::Error),
    /// Install mode only: the device has no bound class driver.
    NoDriverSelected(win32::Error),
    /// The install or uninstall call itself reported failure.
    ActionFailed { mode: Mode, error: win32::Error },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedIdentifier(err) => write!(f, "Bad GUID string: {err}"),
            Error::EnumerationUnavailable(err) => {
                write!(f, "Could not obtain HDEVINFO: {err}")
            }
            Error::NoMatchingDevice(err) => {
                write!(f, "Could not enumerate the device information data: {err}")
            }
            Error::NoDriverSelected(err) => {
                write!(f, "No driver is selected for the device: {err}")
            }
            Error::ActionFailed {
                mode: Mode::Install,
                error,
            } => write!(f, "Could not install the device: {error}"),
            Error::ActionFailed {
                mode: Mode::Remove,
                error,
            } => write!(f, "Could not remove the device: {error}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::MalformedIdentifier(err) => Some(err),
            Error::EnumerationUnavailable(err)
            | Error::NoMatchingDevice(err)
            | Error::NoDriverSelected(err)
            | Error::ActionFailed { error: err, .. } => Some(err),
        }
    }
}

impl From<guid::ParseError> for Error {
    fn from(err: guid::ParseError) -> Self {
        Error::MalformedIdentifier(err)
    }
}

/// Runs one resolve-and-act workflow against the live device service.
///
/// Resolution always selects the first enumerated instance (member index 0);
/// the tool acts on exactly one device per invocation.
#[cfg(windows)]
pub fn run(command: &Command) -> Result<Outcome, Error> {
    let class = guid::parse(&command.identifier)?;

    let set = devinfo::DeviceInfoSet::class_devices(&class, command.mode)
        .map_err(Error::EnumerationUnavailable)?;
    let mut device = set.device(0).map_err(Error::NoMatchingDevice)?;

    let reboot_required = match command.mode {
        Mode::Install => {
            let mut driver = set
                .selected_driver(&mut device)
                .map_err(Error::NoDriverSelected)?;
            action::install(&set, &mut device, &mut driver)
        }
        Mode::Remove => action::remove(&set, &mut device),
    }
    .map_err(|error| Error::ActionFailed {
        mode: command.mode,
        error,
    })?;

    Ok(Outcome { reboot_required })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_step() {
        let err = Error::EnumerationUnavailable(win32::Error::from_code(5));
        assert!(err.to_string().starts_with("Could not obtain HDEVINFO: "));

        let err = Error::MalformedIdentifier(guid::ParseError::MissingBraces);
        assert!(err.to_string().starts_with("Bad GUID string: "));
    }

    #[test]
    fn action_failure_message_follows_the_mode() {
        let code = win32::Error::from_code(1);
        let install = Error::ActionFailed {
            mode: Mode::Install,
            error: code,
        };
        let remove = Error::ActionFailed {
            mode: Mode::Remove,
            error: code,
        };
        assert!(install.to_string().starts_with("Could not install"));
        assert!(remove.to_string().starts_with("Could not remove"));
    }

    #[test]
    fn parse_errors_convert_into_malformed_identifier() {
        let err = Error::from(guid::ParseError::Empty);
        assert_eq!(
            err,
            Error::MalformedIdentifier(guid::ParseError::Empty)
        );
    }
}

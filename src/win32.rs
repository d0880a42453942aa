//! Win32 error capture and rendering.
//!
//! Last-error codes are global and transient. Every fallible call in this
//! crate captures the code immediately after the call fails and carries it
//! in the returned error, so ordering-sensitive reads are explicit and the
//! code can never be overwritten by a later service call.

use std::fmt::{self, Display};
use std::num::NonZeroU32;
use std::{error, result};
use windows_sys::Win32::Foundation::ERROR_GEN_FAILURE;

pub type Result<T = (), E = Error> = result::Result<T, E>;

/// A nonzero Win32 error code captured at the point of failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Error(NonZeroU32);

const _: () = {
    ["Result is niche optimized"][size_of::<Result>() - size_of::<u32>()];
};

impl Error {
    /// Captures `GetLastError()` for the call that just failed. Must run
    /// before any other system call can overwrite the code.
    #[cfg(windows)]
    pub fn last() -> Self {
        Self::from_code(unsafe { windows_sys::Win32::Foundation::GetLastError() })
    }

    /// Wraps a raw code. A call that failed without recording a code still
    /// has to surface as an error, so zero maps to `ERROR_GEN_FAILURE`.
    pub const fn from_code(code: u32) -> Self {
        match NonZeroU32::new(code) {
            Some(code) => Error(code),
            None => Error(GEN_FAILURE),
        }
    }

    pub const fn code(self) -> u32 {
        self.0.get()
    }

    /// Resolves the code to localized text via `FormatMessageW`, neutral
    /// language with the default sublanguage. `None` when the system has no
    /// message for the code.
    #[cfg(windows)]
    pub fn message(self) -> Option<String> {
        use std::ptr;
        use windows_sys::Win32::Foundation::{ERROR_INSUFFICIENT_BUFFER, GetLastError};
        use windows_sys::Win32::System::Diagnostics::Debug::{
            FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS, FormatMessageW,
        };

        // MAKELANGID(LANG_NEUTRAL, SUBLANG_DEFAULT)
        const LANGUAGE_ID: u32 = 0x0400;

        // `FormatMessageW` cannot report the required size up front; grow
        // the buffer and retry when a message overflows it. System messages
        // are capped at 64K characters.
        let mut buffer = vec![0u16; 512];
        loop {
            let len = unsafe {
                FormatMessageW(
                    FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
                    ptr::null(),
                    self.code(),
                    LANGUAGE_ID,
                    buffer.as_mut_ptr(),
                    buffer.len() as u32,
                    ptr::null(),
                )
            };
            if len != 0 {
                let text = String::from_utf16_lossy(&buffer[..len as usize]);
                return Some(text.trim_end().to_string());
            }
            if unsafe { GetLastError() } != ERROR_INSUFFICIENT_BUFFER || buffer.len() >= 0x1_0000
            {
                return None;
            }
            let doubled = buffer.len() * 2;
            buffer.resize(doubled, 0);
        }
    }
}

const GEN_FAILURE: NonZeroU32 = match NonZeroU32::new(ERROR_GEN_FAILURE) {
    Some(code) => code,
    None => panic!("ERROR_GEN_FAILURE is nonzero"),
};

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[cfg(windows)]
        if let Some(message) = self.message() {
            return f.write_str(&message);
        }
        write!(f, "system error code {}", self.code())
    }
}

impl error::Error for Error {}

/// Maps a Win32 `BOOL` result to `Result`, capturing the last error on the
/// failure path before anything else can run.
#[cfg(windows)]
pub fn check_bool(result: windows_sys::Win32::Foundation::BOOL) -> Result {
    if result == windows_sys::Win32::Foundation::FALSE {
        Err(Error::last())
    } else {
        Ok(())
    }
}

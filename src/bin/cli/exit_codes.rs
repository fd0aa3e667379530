//! Exit codes for the CLI tool.

use qrcedit::Error;

/// Exit code constants
pub const SUCCESS: i32 = 0;
/// Operation completed with warnings
pub const WARNING: i32 = 1;
/// Fatal error occurred
pub const FATAL_ERROR: i32 = 2;
/// Resource file is not a valid manifest
pub const BAD_MANIFEST: i32 = 3;
/// I/O error
pub const IO_ERROR: i32 = 4;
/// Invalid command line arguments
pub const BAD_ARGS: i32 = 255;

/// Exit code enum for structured handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    Warning,
    FatalError,
    BadManifest,
    IoError,
    BadArgs,
}

impl ExitCode {
    /// Returns the numeric exit code
    pub fn code(self) -> i32 {
        match self {
            Self::Success => SUCCESS,
            Self::Warning => WARNING,
            Self::FatalError => FATAL_ERROR,
            Self::BadManifest => BAD_MANIFEST,
            Self::IoError => IO_ERROR,
            Self::BadArgs => BAD_ARGS,
        }
    }
}

/// Converts a qrcedit error to an exit code
pub fn error_to_exit_code(error: &Error) -> ExitCode {
    match error {
        Error::Io(_) => ExitCode::IoError,
        Error::InvalidFormat(_) | Error::Xml { .. } => ExitCode::BadManifest,
        Error::UnknownAlgorithm { .. }
        | Error::InvalidCompressionLevel { .. }
        | Error::LevelNotSupported { .. }
        | Error::EntryNotFound { .. }
        | Error::EntryExists { .. }
        | Error::GroupNotFound { .. }
        | Error::GroupExists { .. } => ExitCode::BadArgs,
        Error::NoFilePath => ExitCode::FatalError,
        // Future error variants - required by #[non_exhaustive]
        _ => ExitCode::FatalError,
    }
}

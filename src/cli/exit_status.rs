use std::process::ExitCode;

/// Process exit status of the `rf-locale` binary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// The command ran and found nothing blocking.
    Success,
    /// The command ran but reported errors (bad extractions, missing translations).
    Failure,
    /// The command could not run (config, I/O or JSON errors).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

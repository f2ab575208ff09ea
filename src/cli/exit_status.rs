use std::process::ExitCode;

/// Process exit status.
///
/// - `Success` (0): finished, including "nothing to do"
/// - `Failure` (1): `verify` reported at least one error
/// - `Error` (2): malformed input or any other fatal error
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn from_errors(error_count: usize, exit_on_errors: bool) -> Self {
        if exit_on_errors && error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
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

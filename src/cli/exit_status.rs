use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): every key kept every tier it attempted
/// - `Failure` (1): the run finished but some key lost a tier, or `init` found an existing config
/// - `Error` (2): the run could not start or complete (config, message file, parse error, missing credential)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Output was written, but at least one key fell back to a lower tier.
    Failure,
    /// Fatal error before or while writing output.
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

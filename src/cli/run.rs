use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{init::init, scan::scan, translate::translate},
    exit_status::ExitStatus,
};

/// Dispatch to the handler for the parsed command.
///
/// `Err` is reserved for fatal errors; per-key generation failures are
/// reported through `ExitStatus::Failure`.
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Translate(cmd)) => translate(cmd),
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Init) => init(),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}

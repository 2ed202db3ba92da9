mod cims_cli;
mod session_command;

pub use cims_cli::CimsCli;
pub use session_command::SessionCommand;

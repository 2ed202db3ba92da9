mod base_cli;
mod cli_mode;
mod user_gate;

pub use base_cli::BaseCli;
pub use cli_mode::CliModeResult;
pub use user_gate::{UserGate, resolve_user};

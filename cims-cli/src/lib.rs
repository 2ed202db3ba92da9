mod cli_modes;
mod common;
mod render;

pub use cli_modes::{CimsCli, SessionCommand};
pub use common::{BaseCli, CliModeResult, UserGate, resolve_user};
pub use render::{ColorMode, RenderOptions, Renderer};

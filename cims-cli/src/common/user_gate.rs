use crate::render::Renderer;
use anyhow::Result;
use cims_core::Config;
use std::io::{BufRead, Write};

#[derive(Debug)]
pub enum UserGate {
    Open(Config),
    /// A name was required and none was given.
    Closed,
}

/// Settles who is timing: `--user`/`CIMS_USER` first, then the config file.
/// With `require_user` and no name anywhere, asks once on `input`.
pub fn resolve_user(
    config: Config,
    cli_user: Option<String>,
    renderer: &Renderer,
    input: &mut impl BufRead,
) -> Result<UserGate> {
    let config = match cli_user.filter(|u| !u.trim().is_empty()) {
        Some(user) => config.with_user(Some(user)),
        None => config,
    };
    if config.user.is_some() || !config.require_user {
        return Ok(UserGate::Open(config));
    }
    ask_user(config, renderer, input)
}

fn ask_user(config: Config, renderer: &Renderer, input: &mut impl BufRead) -> Result<UserGate> {
    print!("Please enter your name to start: ");
    std::io::stdout().flush()?;
    let mut name = String::new();
    input.read_line(&mut name)?;
    let config = config.with_user(Some(name));
    if config.user.is_none() {
        renderer.print_warning("Enter your name to begin.");
        return Ok(UserGate::Closed);
    }
    Ok(UserGate::Open(config))
}

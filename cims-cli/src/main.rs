use anyhow::Result;
use cims_cli::{BaseCli, CimsCli, Renderer, UserGate, resolve_user};
use cims_core::{Cims, Config};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::filter::EnvFilter;

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("cims: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = BaseCli::new();
    let config = Config::load()?;
    let renderer = Renderer::for_config(cli.color, &config);
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let config = match resolve_user(config, cli.user.clone(), &renderer, &mut input)? {
        UserGate::Open(config) => config,
        UserGate::Closed => return Ok(()),
    };

    if cli.path {
        renderer.print_info(&format!("{}", config.log_path().display()));
        return Ok(());
    }

    let cims = Cims::with_config(config)?;
    let mut cims_cli = CimsCli::new(cli, cims);
    cims_cli.run(&mut input)
}

/// Diagnostics go to `CIMS_LOG_PATH` when set, otherwise to stderr.
/// The level comes from `CIMS_LOG` (default `warn`) so the session view stays clean.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .with_env_var("CIMS_LOG")
        .from_env_lossy();

    if let Ok(path) = std::env::var("CIMS_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

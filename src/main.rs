use std::process;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use jumpscare::app::run_scare;
use jumpscare::cli::{Cli, Mode};
use jumpscare::menu::run_menu;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.into_mode() {
        Ok(Mode::Menu) => run_menu(),
        Ok(Mode::Scare(config)) => run_scare(config),
        Err(err) => Err(err.into()),
    };

    if let Err(err) = result {
        error!(error = ?err, "jumpscare failed");
        process::exit(1); // Non-zero exit tells a launching menu the scare never ran
    }
}

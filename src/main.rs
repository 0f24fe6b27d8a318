use ironvault::commands::Cli;
use ironvault::libs::messages::macros::is_debug_mode;
use std::process;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    if is_debug_mode() {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    if let Err(error) = Cli::menu() {
        eprintln!("❌ {}", error);
        process::exit(1);
    }
}

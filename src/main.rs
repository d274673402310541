use std::process::ExitCode;
use taskdeck::commands::Cli;
use taskdeck::libs::messages::macros::is_debug_mode;
use taskdeck::msg_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    if is_debug_mode() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskdeck=debug"));
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
    }

    match Cli::menu().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            msg_error!(e);
            ExitCode::FAILURE
        }
    }
}

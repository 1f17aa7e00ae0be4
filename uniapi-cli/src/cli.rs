use anyhow::Context;
use clap::Parser;
use std::{io, path::PathBuf, sync::Arc, time::Duration};
use tracing::{debug, info};
use uniapi_core::{ApiClient, Config, ProviderId, ReqwestTransport};

use crate::{
    console::{Console, ConsoleError, TerminalConsole},
    logging,
    menu::{Dispatcher, FAREWELL},
};

const INTERRUPTED: &str = "\nProgram interrupted. Exiting...";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "uniapi",
    version,
    about = "Look up exchange rates, movies and weather from one interactive menu",
    after_help = "API keys are read from EXCHANGE_RATE_API_KEY, MOVIE_API_KEY and WEATHER_API_KEY \
                  (a .env file in the working directory is loaded first)."
)]
pub struct Cli {
    /// Load environment variables from this file instead of `./.env`.
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Per-request timeout in seconds [default: 10, env: UNIAPI_TIMEOUT_SECS].
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let env_file = Config::load_dotenv(self.env_file.as_deref())?;
        logging::init_logging();
        env_file.log();

        let mut config = Config::from_env()?;
        if let Some(secs) = self.timeout {
            config.timeout = Duration::from_secs(secs);
        }

        for id in ProviderId::all() {
            debug!(provider = %id, configured = config.is_provider_configured(*id), "provider key");
        }

        let transport = ReqwestTransport::new(config.timeout)?;
        let client = ApiClient::new(Arc::new(transport));
        let console = TerminalConsole::new().context("Failed to attach to the terminal")?;
        let mut dispatcher = Dispatcher::new(console, client, config);

        drive(&mut dispatcher, tokio::signal::ctrl_c()).await
    }
}

/// Runs the menu until it ends or `interrupt` fires, then says goodbye accordingly.
///
/// Ctrl-C at an interactive prompt is reported by inquire. `interrupt` covers the rest: piped
/// input and requests in flight. If it fails to install it never fires.
async fn drive<C, I>(dispatcher: &mut Dispatcher<C>, interrupt: I) -> anyhow::Result<()>
where
    C: Console,
    I: Future<Output = io::Result<()>>,
{
    let result = tokio::select! {
        biased;
        Ok(()) = interrupt => Err(ConsoleError::Interrupted),
        res = dispatcher.run() => res,
    };

    match result {
        Ok(()) => {
            debug!(state = ?dispatcher.state(), "menu loop finished");
            Ok(())
        }
        Err(ConsoleError::Interrupted) => {
            info!("exiting on interrupt");
            let console = dispatcher.console_mut();
            console.end_work();
            console.show_error(INTERRUPTED);
            Ok(())
        }
        Err(ConsoleError::EndOfInput) => {
            info!("exiting on end of input");
            dispatcher.console_mut().show_info(FAREWELL);
            Ok(())
        }
        Err(err) => Err(err).context("Terminal interaction failed"),
    }
}

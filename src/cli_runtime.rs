use anyhow::{Context, Result};
use clap::Parser;

use flowgate::endpoint::Endpoint;
use flowgate::listing::PageSize;
use flowgate::model::ConsoleConfig;
use flowgate::remote::RemoteClient;
use flowgate::store::ConsoleStore;

use crate::Commands;

const API_URL_ENV: &str = "FLOWGATE_API_URL";
const HOST_ENV: &str = "FLOWGATE_HOST";

#[derive(Parser)]
#[command(name = "flowgate")]
#[command(about = "Administration console for a workflow-automation proxy", long_about = None)]
pub(crate) struct Cli {
    /// API base URL (overrides FLOWGATE_API_URL and the saved config)
    #[arg(long = "api-url", global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Host to reach on port 4000 when no API URL is configured
    #[arg(long, global = true)]
    host: Option<String>,

    /// Do not subscribe to sync notifications in the console
    #[arg(long = "no-live")]
    no_live: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Resolved local state for one invocation: store, config and proxy endpoint.
pub(crate) struct Console {
    pub(crate) store: ConsoleStore,
    pub(crate) config: ConsoleConfig,
    pub(crate) endpoint: Endpoint,
    email_domain: String,
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Console {
    fn open(api_url: Option<String>, host: Option<String>) -> Result<Self> {
        let store = ConsoleStore::open_default()?;
        let config = store.read_config()?;
        let explicit = api_url
            .or_else(|| env_nonempty(API_URL_ENV))
            .or_else(|| config.api_url.clone());
        let host = host
            .or_else(|| env_nonempty(HOST_ENV))
            .or_else(|| config.host.clone());
        let endpoint = Endpoint::resolve(explicit.as_deref(), host.as_deref())?;
        tracing::debug!(base = endpoint.base(), "resolved API endpoint");
        Ok(Self {
            store,
            email_domain: config.email_domain(),
            config,
            endpoint,
        })
    }

    /// Client carrying the saved session for this endpoint, if any.
    pub(crate) fn client(&self) -> Result<RemoteClient> {
        let session = self.store.session_token(&self.endpoint)?;
        RemoteClient::new(self.endpoint.clone(), session)
    }

    pub(crate) fn require_session(&self) -> Result<RemoteClient> {
        let client = self.client()?;
        if client.session().is_none() {
            anyhow::bail!(
                "not logged in to {} (run `flowgate login`)",
                self.endpoint.base()
            );
        }
        Ok(client)
    }

    pub(crate) fn email_domain(&self) -> &str {
        &self.email_domain
    }

    pub(crate) fn page_size(&self) -> PageSize {
        self.config
            .page_size
            .and_then(PageSize::from_u32)
            .unwrap_or_default()
    }
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let console = Console::open(cli.api_url, cli.host)?;
            flowgate::logging::init_file(&console.store.log_path())
                .context("start console logging")?;
            flowgate::tui::run(flowgate::tui::TuiRunOptions {
                client: console.require_session()?,
                email_domain: console.email_domain().to_string(),
                page_size: console.page_size(),
                live: !cli.no_live,
            })?;
        }
        Some(command) => {
            flowgate::logging::init_stderr();
            if cli.no_live {
                anyhow::bail!("`--no-live` is only supported when running the console (no subcommand)");
            }
            let console = Console::open(cli.api_url, cli.host)?;
            crate::cli_exec::handle_command(&console, command)?
        }
    }

    Ok(())
}

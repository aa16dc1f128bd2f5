use anyhow::Result;

use crate::listing::PageSize;
use crate::remote::RemoteClient;

/// Everything the interactive console needs from the command line and config.
#[derive(Clone)]
pub struct TuiRunOptions {
    pub client: RemoteClient,
    pub email_domain: String,
    pub page_size: PageSize,
    /// Subscribe to `/ws/n8n` and re-fetch on sync notifications.
    pub live: bool,
}

pub fn run(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run(opts)
}

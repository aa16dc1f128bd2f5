use clap::Args;

use flowgate::listing::PageSize;

#[derive(Args)]
pub(crate) struct ListArgs {
    /// Free-text search
    #[arg(long, short = 's')]
    pub(crate) search: Option<String>,
    /// Only rows whose id carries this instance prefix
    #[arg(long)]
    pub(crate) instance: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub(crate) page: u32,
    /// Rows per page: 10, 20 or 50 (defaults to the configured size)
    #[arg(long)]
    pub(crate) size: Option<PageSize>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct LogsArgs {
    /// Only entries whose action or user email contains this text
    #[arg(long)]
    pub(crate) find: Option<String>,
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct DashboardArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct WatchArgs {
    /// Stop after this many sync notifications
    #[arg(long)]
    pub(crate) count: Option<usize>,
}

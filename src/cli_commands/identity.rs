use clap::Args;

#[derive(Args)]
pub(crate) struct LoginArgs {
    /// Value of the proxy's `token` cookie; prompted for when omitted
    #[arg(long)]
    pub(crate) token: Option<String>,
}

#[derive(Args)]
pub(crate) struct WhoamiArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

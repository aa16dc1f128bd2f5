use clap::Subcommand;

use crate::{AccessCommands, ConfigCommands, InstanceCommands, UserCommands};

pub(crate) mod identity;
pub(crate) mod listing;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Save a session token for the configured proxy
    Login(identity::LoginArgs),

    /// End the session on the proxy and forget the local token
    Logout,

    /// Show the signed-in account
    Whoami(identity::WhoamiArgs),

    /// Show or change local settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Manage users and roles (superadmin)
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Inspect and change per-user workflow access (superadmin)
    Access {
        #[command(subcommand)]
        command: AccessCommands,
    },

    /// List workflows visible to the signed-in account
    #[command(alias = "wf")]
    Workflows(listing::ListArgs),

    /// List executions visible to the signed-in account
    #[command(alias = "ex")]
    Executions(listing::ListArgs),

    /// Manage backend instances (superadmin)
    Instances {
        #[command(subcommand)]
        command: InstanceCommands,
    },

    /// Show the admin action log (superadmin)
    Logs(listing::LogsArgs),

    /// Show the dashboard greeting and totals
    Dashboard(listing::DashboardArgs),

    /// Follow sync notifications and print refreshed totals
    Watch(listing::WatchArgs),

    /// Record an entry in the action log
    #[command(name = "log-action")]
    LogAction {
        action: String,
    },
}

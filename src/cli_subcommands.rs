use clap::{Args, Subcommand, ValueEnum};

use flowgate::access::AccessFilter;
use flowgate::model::Role;

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the effective settings
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change one saved setting; an empty value clears it
    Set {
        key: ConfigKey,
        value: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum ConfigKey {
    /// API base URL
    ApiUrl,
    /// Host to reach on port 4000 when no API URL is set
    Host,
    /// 10, 20 or 50
    PageSize,
    /// Suffix new user emails must end with (e.g. @example.com)
    EmailDomain,
}

#[derive(Subcommand)]
pub(crate) enum UserCommands {
    /// List users
    List {
        /// Only users whose email contains this text
        #[arg(long)]
        find: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a user in the allowed email domain
    Create {
        email: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a user's role
    Role {
        /// User id or email
        user: String,
        /// user|superadmin
        role: Role,
    },
}

/// Workflow filters shared by the access subcommands.
#[derive(Args, Clone, Default)]
pub(crate) struct WorkflowFilterArgs {
    /// Name or id contains this text
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Category prefix (`all` for every category)
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// all|has|missing, relative to the user
    #[arg(long)]
    pub(crate) show: Option<AccessFilter>,
}

#[derive(Subcommand)]
pub(crate) enum AccessCommands {
    /// Show a user's workflow access grouped by category
    Show {
        /// User id or email (defaults to the first user)
        user: Option<String>,
        #[command(flatten)]
        filter: WorkflowFilterArgs,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Grant workflows to a user
    Grant {
        /// User id or email
        user: String,
        /// Workflow ids
        workflow_ids: Vec<String>,
        /// Grant every workflow matching the filters instead of listing ids
        #[arg(long = "all-filtered")]
        all_filtered: bool,
        #[command(flatten)]
        filter: WorkflowFilterArgs,
    },

    /// Revoke workflows from a user
    Revoke {
        /// User id or email
        user: String,
        /// Workflow ids
        workflow_ids: Vec<String>,
        /// Revoke every workflow matching the filters instead of listing ids
        #[arg(long = "all-filtered")]
        all_filtered: bool,
        #[command(flatten)]
        filter: WorkflowFilterArgs,
    },
}

#[derive(Subcommand)]
pub(crate) enum InstanceCommands {
    /// List instances with their configuration (superadmin)
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List the prefixes and names any signed-in user may see
    Public {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Register an instance
    Create {
        #[arg(long)]
        name: String,
        #[arg(long = "url")]
        base_url: String,
        #[arg(long = "key")]
        api_key: String,
        /// Workflow id prefix for this instance
        #[arg(long = "id")]
        identifier: Option<String>,
        #[arg(long)]
        inactive: bool,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change an instance's fields
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "url")]
        base_url: Option<String>,
        #[arg(long = "key")]
        api_key: Option<String>,
        #[arg(long)]
        identifier: Option<String>,
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        #[arg(long)]
        inactive: bool,
    },

    /// Delete an instance
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

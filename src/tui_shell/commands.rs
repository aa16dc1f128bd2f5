use super::UiMode;

#[derive(Clone, Copy, Debug)]
pub(super) struct CommandDef {
    pub(super) name: &'static str,
    pub(super) aliases: &'static [&'static str],
    pub(super) usage: &'static str,
    pub(super) help: &'static str,
}

const fn cmd(
    name: &'static str,
    aliases: &'static [&'static str],
    usage: &'static str,
    help: &'static str,
) -> CommandDef {
    CommandDef {
        name,
        aliases,
        usage,
        help,
    }
}

const GLOBAL: &[CommandDef] = &[
    cmd("help", &["h", "?"], "help [command]", "Show help"),
    cmd("refresh", &["r"], "refresh", "Re-fetch everything"),
    cmd("dashboard", &[], "dashboard", "Open the dashboard"),
    cmd("workflows", &["wf"], "workflows", "Open the workflow listing"),
    cmd("executions", &["ex"], "executions", "Open the execution listing"),
    cmd("access", &[], "access", "Open workflow access management"),
    cmd("users", &[], "users", "Open user management"),
    cmd("logs", &[], "logs", "Open the action log"),
    cmd("instances", &[], "instances", "Open instance management"),
    cmd("quit", &["q"], "quit", "Exit"),
];

const LISTING: &[CommandDef] = &[
    cmd("search", &["s", "/"], "search [text]", "Set the search query"),
    cmd("instance", &["in"], "instance <prefix|all>", "Filter by instance prefix"),
    cmd("page", &["p"], "page <n>", "Go to page n"),
    cmd("next", &["n"], "next", "Next page"),
    cmd("prev", &[], "prev", "Previous page"),
    cmd("size", &[], "size <10|20|50>", "Rows per page"),
];

const ACCESS: &[CommandDef] = &[
    cmd("user", &["u"], "user <email|id>", "Select the user to manage"),
    cmd("who", &[], "who [text]", "Filter the user list by email"),
    cmd("search", &["s", "/"], "search [text]", "Filter workflows by name or id"),
    cmd("category", &["cat"], "category <name|all>", "Filter workflows by category"),
    cmd("show", &[], "show <all|has|missing>", "Filter by access state"),
    cmd("toggle", &["t"], "toggle", "Grant or revoke the selected workflow"),
    cmd("all", &[], "all", "Grant or revoke every filtered workflow"),
];

const USERS: &[CommandDef] = &[
    cmd("create", &["add"], "create <email>", "Create a user"),
    cmd("role", &[], "role <user|superadmin>", "Change the selected user's role"),
    cmd("find", &["f"], "find [text]", "Filter users by email"),
];

const LOGS: &[CommandDef] = &[cmd("find", &["f"], "find [text]", "Filter by user or action")];

const INSTANCES: &[CommandDef] = &[
    cmd(
        "create",
        &["add"],
        "create name=<..> url=<..> key=<..> [id=<prefix>] [inactive]",
        "Register an instance",
    ),
    cmd("activate", &[], "activate", "Mark the selected instance active"),
    cmd("deactivate", &[], "deactivate", "Mark the selected instance inactive"),
    cmd("delete", &["rm"], "delete", "Delete the selected instance"),
];

pub(super) fn command_defs(mode: UiMode) -> Vec<CommandDef> {
    let local: &[CommandDef] = match mode {
        UiMode::Dashboard => &[],
        UiMode::Workflows | UiMode::Executions => LISTING,
        UiMode::Access => ACCESS,
        UiMode::Users => USERS,
        UiMode::Logs => LOGS,
        UiMode::Instances => INSTANCES,
    };
    local.iter().chain(GLOBAL).copied().collect()
}

/// Resolves a typed command word or alias within `mode`.
pub(super) fn resolve(mode: UiMode, word: &str) -> Option<CommandDef> {
    command_defs(mode)
        .into_iter()
        .find(|d| d.name == word || d.aliases.contains(&word))
}

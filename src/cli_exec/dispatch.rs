use super::admin::{handle_access_command, handle_instance_command, handle_user_command};
use super::identity::{
    handle_config_command, handle_login_command, handle_logout_command, handle_whoami_command,
};
use super::listing::{
    handle_dashboard_command, handle_executions_command, handle_log_action_command,
    handle_logs_command, handle_watch_command, handle_workflows_command,
};
use super::*;

pub(super) fn handle_command(console: &Console, command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => handle_login_command(console, args.token)?,
        Commands::Logout => handle_logout_command(console)?,
        Commands::Whoami(args) => handle_whoami_command(console, args.json)?,
        Commands::Config { command } => handle_config_command(console, command)?,
        Commands::Users { command } => handle_user_command(console, command)?,
        Commands::Access { command } => handle_access_command(console, command)?,
        Commands::Workflows(args) => handle_workflows_command(console, args)?,
        Commands::Executions(args) => handle_executions_command(console, args)?,
        Commands::Instances { command } => handle_instance_command(console, command)?,
        Commands::Logs(args) => {
            handle_logs_command(console, args.find.as_deref(), args.limit, args.json)?
        }
        Commands::Dashboard(args) => handle_dashboard_command(console, args.json)?,
        Commands::Watch(args) => handle_watch_command(console, args.count)?,
        Commands::LogAction { action } => handle_log_action_command(console, &action)?,
    }
    Ok(())
}

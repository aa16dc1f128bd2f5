use anyhow::{Context, Result};

use crate::{
    AccessCommands, Commands, ConfigCommands, Console, InstanceCommands, UserCommands,
    WorkflowFilterArgs,
};

mod admin;
mod dispatch;
mod identity;
mod listing;

pub(super) fn handle_command(console: &Console, command: Commands) -> Result<()> {
    dispatch::handle_command(console, command)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T, what: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {} json", what))?
    );
    Ok(())
}

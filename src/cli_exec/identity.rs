use std::io::{self, BufRead, Write};

use flowgate::endpoint::Endpoint;
use flowgate::listing::PageSize;
use flowgate::model::normalize_email_domain;

use crate::cli_subcommands::ConfigKey;

use super::*;

fn prompt_token(console: &Console) -> Result<String> {
    eprintln!(
        "Sign in at {} and paste the value of the `token` cookie.",
        console.endpoint.login_url()
    );
    eprint!("token: ");
    io::stderr().flush().context("flush prompt")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read token from stdin")?;
    Ok(line.trim().to_string())
}

pub(super) fn handle_login_command(console: &Console, token: Option<String>) -> Result<()> {
    let token = match token {
        Some(t) => t.trim().to_string(),
        None => prompt_token(console)?,
    };
    if token.is_empty() {
        anyhow::bail!("no token given");
    }

    console
        .store
        .set_session_token(&console.endpoint, &token)
        .context("store session token in state.json")?;
    let client = console.client()?;
    match client.me() {
        Ok(me) => println!(
            "Logged in to {} as {} ({})",
            console.endpoint.base(),
            me.email,
            me.role
        ),
        Err(err) if err.is_unauthorized() => {
            console.store.clear_session_token(&console.endpoint)?;
            anyhow::bail!("the proxy rejected this token: {}", err);
        }
        Err(err) => {
            tracing::warn!(error = %err, "could not verify session");
            println!(
                "Token saved for {} (not verified: {})",
                console.endpoint.base(),
                err
            );
        }
    }
    Ok(())
}

pub(super) fn handle_logout_command(console: &Console) -> Result<()> {
    let client = console.client()?;
    if client.session().is_some()
        && let Err(err) = client.logout()
    {
        tracing::warn!(error = %err, "logout call failed; clearing local session anyway");
    }
    console.store.clear_session_token(&console.endpoint)?;
    println!("Logged out");
    Ok(())
}

pub(super) fn handle_whoami_command(console: &Console, json: bool) -> Result<()> {
    let client = console.require_session()?;
    let me = client.me().context("fetch current user")?;
    if json {
        print_json(&me, "whoami")?;
    } else {
        println!("email: {}", me.email);
        println!("role: {}", me.role);
        println!("id: {}", me.id);
        println!("api: {}", console.endpoint.base());
    }
    Ok(())
}

fn nonempty(v: String) -> Option<String> {
    let v = v.trim().to_string();
    (!v.is_empty()).then_some(v)
}

pub(super) fn handle_config_command(console: &Console, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let logged_in = console.store.session_token(&console.endpoint)?.is_some();
            if json {
                print_json(
                    &serde_json::json!({
                        "store": console.store.root().display().to_string(),
                        "api_url": console.endpoint.base(),
                        "sync_url": console.endpoint.sync_url(),
                        "saved": &console.config,
                        "email_domain": console.email_domain(),
                        "page_size": console.page_size().get(),
                        "logged_in": logged_in,
                    }),
                    "config",
                )?;
            } else {
                println!("store: {}", console.store.root().display());
                println!("api_url: {}", console.endpoint.base());
                println!("sync_url: {}", console.endpoint.sync_url());
                println!("email_domain: {}", console.email_domain());
                println!("page_size: {}", console.page_size());
                println!("logged_in: {}", logged_in);
            }
        }
        ConfigCommands::Set { key, value } => {
            let mut cfg = console.store.read_config()?;
            let value = nonempty(value);
            match key {
                ConfigKey::ApiUrl => {
                    if let Some(raw) = value.as_deref() {
                        Endpoint::parse(raw)?;
                    }
                    cfg.api_url = value;
                }
                ConfigKey::Host => cfg.host = value,
                ConfigKey::PageSize => {
                    cfg.page_size = value
                        .map(|raw| raw.parse::<PageSize>().map(PageSize::get))
                        .transpose()
                        .map_err(anyhow::Error::msg)?;
                }
                ConfigKey::EmailDomain => {
                    cfg.email_domain = value.as_deref().and_then(normalize_email_domain);
                }
            }
            console.store.write_config(&cfg)?;
            println!("Config saved");
        }
    }
    Ok(())
}

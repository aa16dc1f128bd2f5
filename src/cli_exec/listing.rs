use std::time::Duration;

use flowgate::dashboard::Dashboard;
use flowgate::listing::{
    EMPTY_HINT, InstanceFilter, Page, PageRequest, execution_counts, paginate,
};
use flowgate::model::{Execution, Workflow};
use flowgate::snapshot::or_empty;
use flowgate::sync::{SyncEvent, SyncSubscription};

use crate::cli_commands::listing::ListArgs;

use super::*;

fn page_request(console: &Console, args: &ListArgs) -> PageRequest {
    PageRequest::new(
        args.search.as_deref().unwrap_or(""),
        args.page,
        args.size.unwrap_or_else(|| console.page_size()),
        InstanceFilter::parse(args.instance.as_deref().unwrap_or("")),
    )
}

fn page_json<T: serde::Serialize>(page: &Page<'_, T>) -> serde_json::Value {
    serde_json::json!({
        "total": page.total,
        "page": page.current,
        "total_pages": page.total_pages,
        "rows": page.rows,
    })
}

pub(super) fn handle_workflows_command(console: &Console, args: ListArgs) -> Result<()> {
    let client = console.require_session()?;
    let req = page_request(console, &args);
    let items: Vec<Workflow> = client
        .list_workflows(Some(&req.to_query()))
        .context("list workflows")?;
    let page = paginate(&items, &req);

    if args.json {
        return print_json(&page_json(&page), "workflows");
    }
    if page.is_empty() {
        println!("{}", EMPTY_HINT);
        return Ok(());
    }
    let counts = execution_counts(&or_empty("executions", client.list_executions(None)));
    for (i, wf) in page.rows.iter().enumerate() {
        println!(
            "{:>4}. {:<24} {:<40} {:<8} executions={}",
            page.first_row + i,
            wf.id,
            wf.name(),
            if wf.active { "active" } else { "inactive" },
            counts.get(&wf.id).copied().unwrap_or(0)
        );
    }
    println!("{}", page.summary());
    Ok(())
}

pub(super) fn handle_executions_command(console: &Console, args: ListArgs) -> Result<()> {
    let client = console.require_session()?;
    let req = page_request(console, &args);
    let items: Vec<Execution> = client
        .list_executions(Some(&req.to_query()))
        .context("list executions")?;
    let page = paginate(&items, &req);

    if args.json {
        return print_json(&page_json(&page), "executions");
    }
    if page.is_empty() {
        println!("No executions found");
        return Ok(());
    }
    for (i, ex) in page.rows.iter().enumerate() {
        println!(
            "{:>4}. {:<24} {:<24} {:<10} {} {}",
            page.first_row + i,
            ex.id,
            ex.workflow_id.as_ref().map(|w| w.as_str()).unwrap_or("-"),
            ex.display_status(),
            ex.started_at.as_deref().unwrap_or("-"),
            ex.stopped_at.as_deref().unwrap_or("-")
        );
    }
    println!("{}", page.summary());
    Ok(())
}

pub(super) fn handle_logs_command(
    console: &Console,
    find: Option<&str>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let client = console.require_session()?;
    let logs = client.list_action_logs().context("list action logs")?;
    let users = or_empty("users", client.list_users());
    let email = |id: &str| {
        users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.email.clone())
            .unwrap_or_else(|| id.to_string())
    };

    let q = find.unwrap_or("").trim().to_lowercase();
    let rows: Vec<_> = logs
        .iter()
        .filter(|l| {
            q.is_empty()
                || l.action.to_lowercase().contains(&q)
                || email(&l.user_id).to_lowercase().contains(&q)
        })
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    if json {
        return print_json(&rows, "action logs");
    }
    for l in rows {
        println!(
            "{} {} {}",
            l.timestamp.as_deref().unwrap_or("-"),
            email(&l.user_id),
            l.action
        );
    }
    Ok(())
}

pub(super) fn handle_dashboard_command(console: &Console, json: bool) -> Result<()> {
    let client = console.require_session()?;
    let dash = Dashboard::load(&client);
    if json {
        return print_json(
            &serde_json::json!({ "message": dash.message, "stats": dash.stats }),
            "dashboard",
        );
    }
    println!("{}", dash.message);
    for (title, n) in dash.stats.cards() {
        println!("{:<20} {}", title, n);
    }
    Ok(())
}

pub(super) fn handle_watch_command(console: &Console, count: Option<usize>) -> Result<()> {
    let client = console.require_session()?;
    let sub = SyncSubscription::subscribe(&console.endpoint.sync_url(), client.session())?;
    let mut seen = 0usize;
    loop {
        let Some(ev) = sub.next_timeout(Duration::from_secs(1)) else {
            continue;
        };
        match ev {
            SyncEvent::Connected => println!("connected to {}", console.endpoint.sync_url()),
            SyncEvent::Disconnected { reason } => println!("disconnected: {}", reason),
            SyncEvent::Sync => {
                let stats = Dashboard::fetch(&client).stats;
                println!(
                    "sync: workflows={} active={} executions={} running={} failed={}",
                    stats.workflows,
                    stats.active_workflows,
                    stats.executions,
                    stats.running,
                    stats.failed
                );
                seen += 1;
                if count.is_some_and(|n| seen >= n) {
                    return Ok(());
                }
            }
        }
    }
}

pub(super) fn handle_log_action_command(console: &Console, action: &str) -> Result<()> {
    let client = console.require_session()?;
    client.log_action(action).context("log action")?;
    println!("Logged");
    Ok(())
}

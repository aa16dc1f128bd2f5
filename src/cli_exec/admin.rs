use flowgate::access::{
    AccessMatrix, AccessSelection, BulkAction, BulkDispatcher, BulkRequest, CategoryFilter,
    WorkflowFilter, filter_users,
};
use flowgate::admin::AdminActions;
use flowgate::forms::InstanceForm;
use flowgate::model::{User, WorkflowId};
use flowgate::remote::InstancePatch;
use flowgate::snapshot::AdminSnapshot;

use super::*;

/// Looks a user up by id, then by email (case-insensitive).
fn resolve_user<'a>(snap: &'a AdminSnapshot, needle: &str) -> Result<&'a User> {
    let needle = needle.trim();
    snap.user(needle)
        .or_else(|| {
            snap.users
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(needle))
        })
        .with_context(|| format!("unknown user: {}", needle))
}

fn selection_for(user_id: Option<String>, filter: WorkflowFilterArgs) -> AccessSelection {
    AccessSelection {
        user_id,
        user_query: String::new(),
        filter: WorkflowFilter {
            text: filter.search.unwrap_or_default(),
            category: CategoryFilter::parse(filter.category.as_deref().unwrap_or("")),
            access: filter.show.unwrap_or_default(),
        },
    }
}

pub(super) fn handle_user_command(console: &Console, command: UserCommands) -> Result<()> {
    let client = console.require_session()?;

    match command {
        UserCommands::List { find, json } => {
            let users = client.list_users().context("list users")?;
            let users = filter_users(&users, find.as_deref().unwrap_or(""));
            if json {
                print_json(&users, "users")?;
            } else {
                for u in users {
                    println!("{} {} {}", u.id, u.email, u.role);
                }
            }
        }
        UserCommands::Create { email, json } => {
            let mut snap = AdminSnapshot::default();
            let actions = AdminActions::new(&client, console.email_domain());
            let user = actions.create_user(&mut snap, &email)?;
            if json {
                print_json(&user, "user")?;
            } else {
                println!("Created {} ({})", user.email, user.id);
            }
        }
        UserCommands::Role { user, role } => {
            let mut snap = AdminSnapshot::load(&client);
            let target = resolve_user(&snap, &user)?.clone();
            let actions = AdminActions::new(&client, console.email_domain());
            actions.set_role(&mut snap, &target.id, role)?;
            println!("{} is now {}", target.email, role);
        }
    }

    Ok(())
}

fn print_access(matrix: &AccessMatrix<'_>, user: &User) {
    println!("user: {} [{}]", user.email, user.role);
    if matrix.workflow_panel_hidden() {
        println!("superadmin: has access to every workflow");
        return;
    }
    let granted = matrix.workflows.iter().filter(|w| matrix.has_access(&w.id)).count();
    println!(
        "workflows: {} shown, {} with access (select all: {})",
        matrix.workflows.len(),
        granted,
        if matrix.all_filtered_granted() { "on" } else { "off" }
    );
    for (category, wfs) in matrix.groups() {
        println!();
        println!("{} ({})", category, wfs.len());
        for wf in wfs {
            let has = matrix.has_access(&wf.id);
            println!(
                "  [{}] {:<40} {} {}",
                if has { "x" } else { " " },
                wf.name(),
                wf.id,
                if has { "Has access" } else { "No access" }
            );
        }
    }
}

fn bulk_command(
    console: &Console,
    action: BulkAction,
    user: &str,
    workflow_ids: Vec<String>,
    all_filtered: bool,
    filter: WorkflowFilterArgs,
) -> Result<()> {
    if all_filtered && !workflow_ids.is_empty() {
        anyhow::bail!("pass workflow ids or `--all-filtered`, not both");
    }
    let client = console.require_session()?;
    let mut snap = AdminSnapshot::load(&client);
    let target = resolve_user(&snap, user)?.clone();

    let request = if all_filtered {
        let selection = selection_for(Some(target.id.clone()), filter);
        let matrix = AccessMatrix::derive(&snap, &selection);
        BulkRequest::select_all(&target.id, action == BulkAction::Grant, &matrix.workflows)
    } else {
        let ids = workflow_ids.into_iter().map(WorkflowId::new).collect();
        BulkRequest::new(&target.id, action, ids)
    };
    let Some(request) = request else {
        println!("Nothing to {}", action.label());
        return Ok(());
    };

    let dispatcher = BulkDispatcher::default();
    AdminActions::new(&client, console.email_domain()).apply_bulk(&dispatcher, &mut snap, &request)?;
    println!(
        "{}: {} workflow(s) for {}",
        action.label(),
        request.ids.len(),
        target.email
    );
    Ok(())
}

pub(super) fn handle_access_command(console: &Console, command: AccessCommands) -> Result<()> {
    match command {
        AccessCommands::Show { user, filter, json } => {
            let client = console.require_session()?;
            let snap = AdminSnapshot::load(&client);
            let user_id = match user.as_deref() {
                Some(u) => Some(resolve_user(&snap, u)?.id.clone()),
                None => None,
            };
            let selection = selection_for(user_id, filter);
            let matrix = AccessMatrix::derive(&snap, &selection);
            let Some(selected) = matrix.selected else {
                anyhow::bail!("no users to show");
            };
            if json {
                let rows: Vec<_> = matrix
                    .workflows
                    .iter()
                    .map(|w| {
                        serde_json::json!({
                            "id": w.id,
                            "name": w.name(),
                            "category": w.id.category(),
                            "has_access": matrix.has_access(&w.id),
                        })
                    })
                    .collect();
                print_json(
                    &serde_json::json!({
                        "user": selected,
                        "all_filtered_granted": matrix.all_filtered_granted(),
                        "workflows": rows,
                    }),
                    "access",
                )?;
            } else {
                print_access(&matrix, selected);
            }
        }
        AccessCommands::Grant {
            user,
            workflow_ids,
            all_filtered,
            filter,
        } => bulk_command(console, BulkAction::Grant, &user, workflow_ids, all_filtered, filter)?,
        AccessCommands::Revoke {
            user,
            workflow_ids,
            all_filtered,
            filter,
        } => bulk_command(console, BulkAction::Revoke, &user, workflow_ids, all_filtered, filter)?,
    }
    Ok(())
}

pub(super) fn handle_instance_command(console: &Console, command: InstanceCommands) -> Result<()> {
    let client = console.require_session()?;

    match command {
        InstanceCommands::List { json } => {
            let list = client.list_instances().context("list instances")?;
            if json {
                print_json(&list, "instances")?;
            } else {
                for i in list {
                    println!(
                        "{} {} {} {} {}",
                        i.id,
                        i.identifier.as_deref().unwrap_or("-"),
                        i.name,
                        i.base_url,
                        if i.active { "active" } else { "inactive" }
                    );
                }
            }
        }
        InstanceCommands::Public { json } => {
            let list = client.list_public_instances().context("list public instances")?;
            if json {
                print_json(&list, "public instances")?;
            } else {
                for i in list {
                    println!("{} {}", i.prefix, i.display_name());
                }
            }
        }
        InstanceCommands::Create {
            name,
            base_url,
            api_key,
            identifier,
            inactive,
            json,
        } => {
            let form = InstanceForm {
                identifier: identifier.unwrap_or_default(),
                name,
                base_url,
                api_key,
                active: !inactive,
            };
            let mut snap = AdminSnapshot::default();
            let created = AdminActions::new(&client, console.email_domain())
                .create_instance(&mut snap, &form)?;
            if json {
                print_json(&created, "instance")?;
            } else {
                println!("Created instance {} ({})", created.name, created.id);
            }
        }
        InstanceCommands::Update {
            id,
            name,
            base_url,
            api_key,
            identifier,
            active,
            inactive,
        } => {
            let patch = InstancePatch {
                identifier,
                name,
                base_url,
                api_key,
                active: match (active, inactive) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to update (pass at least one field)");
            }
            let mut snap = AdminSnapshot::default();
            AdminActions::new(&client, console.email_domain()).update_instance(&mut snap, &id, &patch)?;
            println!("Updated instance {}", id);
        }
        InstanceCommands::Delete { id, yes } => {
            if !yes {
                anyhow::bail!(
                    "refusing to delete instance {} without confirmation (pass --yes)",
                    id
                );
            }
            let mut snap = AdminSnapshot::default();
            AdminActions::new(&client, console.email_domain()).delete_instance(&mut snap, &id)?;
            println!("Deleted instance {}", id);
        }
    }

    Ok(())
}

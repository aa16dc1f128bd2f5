use crate::access::{AccessFilter, CategoryFilter};
use crate::admin::AdminActions;
use crate::forms::InstanceForm;
use crate::listing::{InstanceFilter, PageRequest, PageSize, paginate};
use crate::model::Role;

use super::*;

/// Splits `name=value` tokens; bare words are returned as flags.
fn parse_kv(rest: &str) -> (Vec<(&str, &str)>, Vec<&str>) {
    let mut kv = Vec::new();
    let mut flags = Vec::new();
    for tok in rest.split_whitespace() {
        match tok.split_once('=') {
            Some((k, v)) => kv.push((k, v)),
            None => flags.push(tok),
        }
    }
    (kv, flags)
}

fn instance_form(rest: &str) -> Result<InstanceForm, String> {
    let (kv, flags) = parse_kv(rest);
    let mut form = InstanceForm::default();
    for (k, v) in kv {
        match k {
            "id" | "identifier" => form.identifier = v.to_string(),
            "name" => form.name = v.to_string(),
            "url" | "base_url" => form.base_url = v.to_string(),
            "key" | "api_key" => form.api_key = v.to_string(),
            other => return Err(format!("unknown field: {}", other)),
        }
    }
    for f in flags {
        match f {
            "inactive" => form.active = false,
            "active" => form.active = true,
            other => return Err(format!("unexpected argument: {}", other)),
        }
    }
    Ok(form)
}

impl UiMode {
    pub(super) fn is_listing(self) -> bool {
        matches!(self, UiMode::Workflows | UiMode::Executions)
    }
}

impl App {
    pub(super) fn run_current_input(&mut self) {
        let line = self.input.submit();
        self.suggestions.clear();
        self.suggestion_selected = 0;

        let raw = line.trim().trim_start_matches('/').trim();
        if raw.is_empty() {
            return;
        }
        self.last_command = Some(raw.to_string());

        let (word, rest) = match raw.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (raw, ""),
        };
        let Some(def) = commands::resolve(self.mode, word) else {
            self.push_error(format!("unknown command: {} (try `help`)", word));
            return;
        };
        let rest = rest.to_string();
        self.run_command(def, &rest);
    }

    fn run_command(&mut self, def: CommandDef, rest: &str) {
        if let Some(mode) = UiMode::from_label(def.name) {
            self.set_mode(mode);
            return;
        }
        match def.name {
            "help" => self.show_help(rest),
            "quit" => self.quit = true,
            "refresh" => {
                self.refresh_all();
                self.push_output(vec!["refreshed".to_string()]);
            }
            _ => match self.mode {
                UiMode::Workflows | UiMode::Executions => self.run_listing(def.name, rest),
                UiMode::Access => self.run_access(def.name, rest),
                UiMode::Users => self.run_users(def.name, rest),
                UiMode::Logs => {
                    self.logs.query = rest.to_string();
                    self.logs.selected = 0;
                }
                UiMode::Instances => self.run_instances(def.name, rest),
                UiMode::Dashboard => {}
            },
        }
    }

    fn show_help(&mut self, rest: &str) {
        let defs = commands::command_defs(self.mode);
        if !rest.is_empty() {
            match commands::resolve(self.mode, rest) {
                Some(d) => self.push_output(vec![format!("{}  {}", d.usage, d.help)]),
                None => self.push_error(format!("unknown command: {}", rest)),
            }
            return;
        }
        let mut lines: Vec<String> = defs
            .iter()
            .map(|d| {
                let aliases = if d.aliases.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", d.aliases.join(", "))
                };
                format!("{:<52} {}{}", d.usage, d.help, aliases)
            })
            .collect();
        lines.push(String::new());
        lines.push("Tab/Shift-Tab: switch tab   Up/Down: move   Enter: default action".to_string());
        if self.mode == UiMode::Access {
            lines.push("Space: toggle workflow   PgUp/PgDn: previous/next user".to_string());
        }
        if self.mode.is_listing() {
            lines.push("PgUp/PgDn: previous/next page".to_string());
        }
        self.modal = Some(Modal::viewer(&format!("Help: {}", self.mode.label()), lines));
    }

    fn listing_request_mut(&mut self) -> Option<&mut PageRequest> {
        match self.mode {
            UiMode::Workflows => Some(&mut self.workflows.request),
            UiMode::Executions => Some(&mut self.executions.request),
            _ => None,
        }
    }

    /// (current page, total pages) as the listing currently shows them.
    fn listing_bounds(&self) -> (u32, u32) {
        match self.mode {
            UiMode::Workflows => {
                let p = paginate(&self.workflows.items, &self.workflows.request);
                (p.current, p.total_pages)
            }
            UiMode::Executions => {
                let p = paginate(&self.executions.items, &self.executions.request);
                (p.current, p.total_pages)
            }
            _ => (1, 1),
        }
    }

    pub(super) fn step_page(&mut self, delta: i64) {
        let (current, total) = self.listing_bounds();
        let target = (current as i64 + delta).clamp(1, total as i64) as u32;
        if target == current {
            return;
        }
        if let Some(req) = self.listing_request_mut() {
            req.go_to(target);
        }
        self.after_listing_change();
    }

    fn after_listing_change(&mut self) {
        match self.mode {
            UiMode::Workflows => self.workflows.selected = 0,
            UiMode::Executions => self.executions.selected = 0,
            _ => {}
        }
        self.refresh_listing(self.mode);
    }

    fn run_listing(&mut self, name: &str, rest: &str) {
        match name {
            "search" => {
                if let Some(req) = self.listing_request_mut() {
                    req.set_query(rest);
                }
            }
            "instance" => {
                if let Some(req) = self.listing_request_mut() {
                    req.set_instance(InstanceFilter::parse(rest));
                }
            }
            "size" => {
                let size = if rest.is_empty() {
                    self.listing_request_mut()
                        .map(|r| r.size().next())
                        .unwrap_or_default()
                } else {
                    match rest.parse::<PageSize>() {
                        Ok(s) => s,
                        Err(msg) => {
                            self.push_error(msg);
                            return;
                        }
                    }
                };
                if let Some(req) = self.listing_request_mut() {
                    req.set_size(size);
                }
            }
            "page" => {
                let Ok(n) = rest.parse::<u32>() else {
                    self.push_error(format!("invalid page: {:?}", rest));
                    return;
                };
                let (_, total) = self.listing_bounds();
                if let Some(req) = self.listing_request_mut() {
                    req.go_to(n.clamp(1, total));
                }
            }
            "next" => return self.step_page(1),
            "prev" => return self.step_page(-1),
            _ => return,
        }
        self.after_listing_change();
    }

    fn run_access(&mut self, name: &str, rest: &str) {
        let selection = &mut self.access.selection;
        match name {
            "user" => {
                let needle = rest.to_lowercase();
                let found = self
                    .snapshot
                    .users
                    .iter()
                    .find(|u| u.id == rest || u.email.to_lowercase() == needle)
                    .or_else(|| {
                        self.snapshot
                            .users
                            .iter()
                            .find(|u| !needle.is_empty() && u.email.to_lowercase().contains(&needle))
                    });
                match found {
                    Some(u) => selection.user_id = Some(u.id.clone()),
                    None => {
                        self.push_error(format!("no user matches {:?}", rest));
                        return;
                    }
                }
            }
            "who" => selection.user_query = rest.to_string(),
            "search" => selection.filter.text = rest.to_string(),
            "category" => selection.filter.category = CategoryFilter::parse(rest),
            "show" => {
                if rest.is_empty() {
                    selection.filter.access = selection.filter.access.cycle();
                } else {
                    match rest.parse::<AccessFilter>() {
                        Ok(f) => selection.filter.access = f,
                        Err(msg) => {
                            self.push_error(msg);
                            return;
                        }
                    }
                }
            }
            "toggle" => return self.toggle_selected_workflow(),
            "all" => return self.toggle_all_filtered(),
            _ => return,
        }
        self.access.cursor = 0;
    }

    /// True (and tells the operator) when the workflow panel is hidden.
    fn refuse_hidden_panel(&mut self) -> bool {
        if !self.access.matrix(&self.snapshot).workflow_panel_hidden() {
            return false;
        }
        self.push_output(vec!["superadmins already have every workflow".to_string()]);
        true
    }

    fn toggle_all_filtered(&mut self) {
        if self.refuse_hidden_panel() {
            return;
        }
        let request = self.access.matrix(&self.snapshot).select_all_request();
        self.submit_bulk(request);
    }

    pub(super) fn toggle_selected_workflow(&mut self) {
        if self.refuse_hidden_panel() {
            return;
        }
        let Some(wf) = self.access.selected_workflow(&self.snapshot) else {
            self.push_output(vec!["no workflow selected".to_string()]);
            return;
        };
        let request = self.access.matrix(&self.snapshot).toggle_request(&wf);
        self.submit_bulk(request);
    }

    fn run_users(&mut self, name: &str, rest: &str) {
        let actions = AdminActions::new(&self.client, &self.email_domain);
        match name {
            "find" => {
                self.users.query = rest.to_string();
                self.users.selected = 0;
            }
            "create" => match actions.create_user(&mut self.snapshot, rest) {
                Ok(u) => self.push_output(vec![format!("created {} ({})", u.email, u.id)]),
                Err(err) => self.push_error(err.to_string()),
            },
            "role" => {
                let role = match rest.parse::<Role>() {
                    Ok(r) => r,
                    Err(msg) => return self.push_error(msg),
                };
                let Some(user) = self.users.selected_user(&self.snapshot).cloned() else {
                    return self.push_error("no user selected");
                };
                match actions.set_role(&mut self.snapshot, &user.id, role) {
                    Ok(()) => self.push_output(vec![format!("{} is now {}", user.email, role)]),
                    Err(err) => self.push_error(err.to_string()),
                }
            }
            _ => {}
        }
    }

    fn run_instances(&mut self, name: &str, rest: &str) {
        if name == "create" {
            let form = match instance_form(rest) {
                Ok(f) => f,
                Err(msg) => return self.push_error(msg),
            };
            let actions = AdminActions::new(&self.client, &self.email_domain);
            match actions.create_instance(&mut self.snapshot, &form) {
                Ok(i) => self.push_output(vec![format!("created instance {} ({})", i.name, i.id)]),
                Err(err) => self.push_error(err.to_string()),
            }
            return;
        }

        let Some(inst) = self.instances.selected_instance(&self.snapshot).cloned() else {
            return self.push_error("no instance selected");
        };
        match name {
            "activate" | "deactivate" => {
                let active = name == "activate";
                let actions = AdminActions::new(&self.client, &self.email_domain);
                match actions.set_instance_active(&mut self.snapshot, &inst.id, active) {
                    Ok(()) => self.push_output(vec![format!("{} {}d", inst.name, name)]),
                    Err(err) => self.push_error(err.to_string()),
                }
            }
            "delete" => {
                self.modal = Some(Modal::confirm(PendingAction::DeleteInstance {
                    id: inst.id,
                    name: inst.name,
                }));
            }
            _ => {}
        }
    }

    pub(super) fn run_confirmed(&mut self, action: PendingAction) {
        match action {
            PendingAction::DeleteInstance { id, name } => {
                let actions = AdminActions::new(&self.client, &self.email_domain);
                match actions.delete_instance(&mut self.snapshot, &id) {
                    Ok(()) => {
                        self.instances.selected = self.instances.selected.saturating_sub(1);
                        self.push_output(vec![format!("deleted instance {}", name)]);
                    }
                    Err(err) => self.push_error(err.to_string()),
                }
            }
        }
    }

    /// Enter on an empty prompt.
    pub(super) fn run_default_action(&mut self) {
        match self.mode {
            UiMode::Access => self.toggle_selected_workflow(),
            UiMode::Users => {
                // Jump to the selected user's access.
                let Some(id) = self.users.selected_user(&self.snapshot).map(|u| u.id.clone())
                else {
                    return;
                };
                self.access.selection.user_id = Some(id);
                self.access.cursor = 0;
                self.set_mode(UiMode::Access);
            }
            UiMode::Workflows | UiMode::Executions => self.after_listing_change(),
            UiMode::Dashboard => self.open_dashboard(),
            UiMode::Logs | UiMode::Instances => self.refresh_snapshot(),
        }
    }

    pub(super) fn input_hint(&self) -> &'static str {
        match self.mode {
            UiMode::Access => "space: toggle  pgup/pgdn: user  `all`: select all  `help`",
            UiMode::Users => "enter: manage access  `create <email>`  `role <role>`",
            UiMode::Instances => "`create name=.. url=.. key=..`  `delete`",
            UiMode::Workflows | UiMode::Executions => "`search <text>`  `next`  `size 50`",
            UiMode::Dashboard | UiMode::Logs => "tab: next view  `help`",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/dispatch_tests.rs"]
mod tests;

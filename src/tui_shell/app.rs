use crate::access::{BulkError, BulkRequest};
use crate::dashboard::Dashboard;
use crate::listing::execution_counts;
use crate::remote::RemoteClient;
use crate::snapshot::{AdminSnapshot, or_empty};
use crate::sync::{SyncEvent, SyncSubscription};

use super::modal::{ModalOutcome, handle_modal_key};
use super::views::{
    AccessView, DashboardView, ExecutionsView, InstancesView, LogsView, UsersView, WorkflowsView,
};
use super::worker::{BulkOutcome, BulkWorker};
use super::*;

mod dispatch;
mod event_loop;
mod render;

pub(super) use self::event_loop::run_loop;

fn now_ts() -> String {
    OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntryKind {
    Output,
    Error,
}

#[derive(Clone, Debug)]
struct ResultEntry {
    ts: String,
    kind: EntryKind,
    lines: Vec<String>,
}

pub(super) struct App {
    client: RemoteClient,
    email_domain: String,
    snapshot: AdminSnapshot,
    mode: UiMode,

    dashboard: DashboardView,
    workflows: WorkflowsView,
    executions: ExecutionsView,
    access: AccessView,
    users: UsersView,
    logs: LogsView,
    instances: InstancesView,

    worker: BulkWorker,
    sync: Option<SyncSubscription>,
    sync_note: Option<String>,

    input: Input,
    suggestions: Vec<CommandDef>,
    suggestion_selected: usize,

    last_command: Option<String>,
    last_result: Option<ResultEntry>,
    modal: Option<Modal>,

    quit: bool,
}

impl App {
    pub(super) fn load(opts: TuiRunOptions) -> Self {
        let sync = if opts.live {
            let url = opts.client.endpoint().sync_url();
            match SyncSubscription::subscribe(&url, opts.client.session()) {
                Ok(sub) => Some(sub),
                Err(err) => {
                    tracing::warn!(error = %format!("{:#}", err), "sync subscription unavailable");
                    None
                }
            }
        } else {
            None
        };

        let mut workflows = WorkflowsView::default();
        workflows.request.set_size(opts.page_size);
        let mut executions = ExecutionsView::default();
        executions.request.set_size(opts.page_size);

        let mut app = Self {
            worker: BulkWorker::new(opts.client.clone()),
            client: opts.client,
            email_domain: opts.email_domain,
            snapshot: AdminSnapshot::default(),
            mode: UiMode::Dashboard,
            dashboard: DashboardView::default(),
            workflows,
            executions,
            access: AccessView::default(),
            users: UsersView::default(),
            logs: LogsView::default(),
            instances: InstancesView::default(),
            sync,
            sync_note: None,
            input: Input::default(),
            suggestions: Vec::new(),
            suggestion_selected: 0,
            last_command: None,
            last_result: None,
            modal: None,
            quit: false,
        };
        app.open_dashboard();
        app.refresh_all();
        app
    }

    fn view(&self) -> &dyn View {
        match self.mode {
            UiMode::Dashboard => &self.dashboard,
            UiMode::Workflows => &self.workflows,
            UiMode::Executions => &self.executions,
            UiMode::Access => &self.access,
            UiMode::Users => &self.users,
            UiMode::Logs => &self.logs,
            UiMode::Instances => &self.instances,
        }
    }

    fn view_mut(&mut self) -> &mut dyn View {
        match self.mode {
            UiMode::Dashboard => &mut self.dashboard,
            UiMode::Workflows => &mut self.workflows,
            UiMode::Executions => &mut self.executions,
            UiMode::Access => &mut self.access,
            UiMode::Users => &mut self.users,
            UiMode::Logs => &mut self.logs,
            UiMode::Instances => &mut self.instances,
        }
    }

    fn render_ctx(&self) -> RenderCtx<'_> {
        RenderCtx {
            now: OffsetDateTime::now_utc(),
            snapshot: &self.snapshot,
            busy: self.worker.is_busy(),
        }
    }

    fn move_down(&mut self) {
        // Views read the snapshot to bound their cursor; split the borrow.
        let snapshot = std::mem::take(&mut self.snapshot);
        let ctx = RenderCtx {
            now: OffsetDateTime::now_utc(),
            snapshot: &snapshot,
            busy: false,
        };
        self.view_mut().move_down(&ctx);
        self.snapshot = snapshot;
    }

    fn prompt(&self) -> String {
        format!("{}>", self.mode.label())
    }

    fn push_output(&mut self, lines: Vec<String>) {
        self.push_entry(EntryKind::Output, lines);
    }

    fn push_error(&mut self, msg: impl Into<String>) {
        self.push_entry(EntryKind::Error, vec![msg.into()]);
    }

    fn push_entry(&mut self, kind: EntryKind, lines: Vec<String>) {
        self.last_result = Some(ResultEntry {
            ts: now_ts(),
            kind,
            lines,
        });
    }

    fn set_mode(&mut self, mode: UiMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.input.clear();
        self.recompute_suggestions();
        match mode {
            UiMode::Dashboard => self.open_dashboard(),
            UiMode::Workflows | UiMode::Executions => self.refresh_listing(mode),
            _ => {}
        }
        if !mode.is_public() && !self.snapshot.is_current_superadmin() {
            self.push_error("this tab needs the superadmin role; lists may be empty");
        }
    }

    /// Opening the dashboard records a visit, as in the web console.
    fn open_dashboard(&mut self) {
        self.dashboard.data = Dashboard::load(&self.client);
        self.dashboard.loaded_at = now_ts();
    }

    fn refresh_snapshot(&mut self) {
        self.snapshot = AdminSnapshot::load(&self.client);
    }

    fn refresh_listing(&mut self, mode: UiMode) {
        match mode {
            UiMode::Workflows => {
                let q = self.workflows.request.to_query();
                self.workflows.items = or_empty("workflows", self.client.list_workflows(Some(&q)));
                let execs = or_empty("executions", self.client.list_executions(None));
                self.workflows.execution_counts = execution_counts(&execs);
                self.workflows.instances =
                    or_empty("public instances", self.client.list_public_instances());
                self.workflows.loaded_at = now_ts();
            }
            UiMode::Executions => {
                let q = self.executions.request.to_query();
                self.executions.items =
                    or_empty("executions", self.client.list_executions(Some(&q)));
                self.executions.instances =
                    or_empty("public instances", self.client.list_public_instances());
                self.executions.loaded_at = now_ts();
            }
            _ => {}
        }
    }

    fn refresh_all(&mut self) {
        self.refresh_snapshot();
        self.refresh_listing(UiMode::Workflows);
        self.refresh_listing(UiMode::Executions);
        self.dashboard.data = Dashboard::fetch(&self.client);
        self.dashboard.loaded_at = now_ts();
    }

    fn on_sync_event(&mut self, ev: SyncEvent) {
        match ev {
            SyncEvent::Connected => self.sync_note = Some("live".to_string()),
            SyncEvent::Disconnected { reason } => {
                self.sync_note = Some(format!("offline: {}", reason));
            }
            SyncEvent::Sync => {
                tracing::info!("sync notification; refreshing");
                self.refresh_all();
            }
        }
    }

    fn drain_sync(&mut self) {
        let events = match &self.sync {
            Some(sub) => sub.drain_sync().1,
            None => return,
        };
        // Several queued notifications collapse into one refresh.
        let mut refreshed = false;
        for ev in events {
            if ev == SyncEvent::Sync {
                if refreshed {
                    continue;
                }
                refreshed = true;
            }
            self.on_sync_event(ev);
        }
    }

    fn submit_bulk(&mut self, request: Option<BulkRequest>) {
        let Some(request) = request else {
            self.push_output(vec!["nothing to update".to_string()]);
            return;
        };
        let summary = format!("{} {} workflow(s)...", request.action.label(), request.ids.len());
        match self.worker.submit(request) {
            Ok(()) => self.push_output(vec![summary]),
            Err(BulkError::Busy) => self.push_error("an access update is still in flight"),
            Err(err) => self.push_error(err.to_string()),
        }
    }

    fn on_bulk_outcome(&mut self, outcome: BulkOutcome) {
        let BulkOutcome { request, result } = outcome;
        match result {
            Ok(()) => {
                self.snapshot.grants = request.apply_to(&self.snapshot.grants);
                self.push_output(vec![format!(
                    "{}: {} workflow(s) for {}",
                    request.action.label(),
                    request.ids.len(),
                    self.snapshot
                        .user_email(&request.user_id)
                        .unwrap_or(&request.user_id)
                )]);
            }
            Err(err) => self.push_error(format!("access update failed: {}", err)),
        }
    }

    fn recompute_suggestions(&mut self) {
        let raw = self.input.buf.trim_start_matches('/').trim_start();
        let word = raw.split_whitespace().next().unwrap_or("");
        if word.is_empty() || raw.contains(' ') {
            self.suggestions.clear();
            self.suggestion_selected = 0;
            return;
        }
        let mut scored: Vec<(i32, CommandDef)> = commands::command_defs(self.mode)
            .into_iter()
            .map(|d| (suggest::score_command(word, &d), d))
            .filter(|(s, _)| *s > 0)
            .collect();
        sort_scored_suggestions(&mut scored);
        self.suggestions = scored.into_iter().map(|(_, d)| d).collect();
        self.suggestion_selected = 0;
    }

    fn apply_selected_suggestion(&mut self) {
        let Some(def) = self.suggestions.get(self.suggestion_selected).copied() else {
            return;
        };
        self.input.set(format!("{} ", def.name));
        self.recompute_suggestions();
    }

    fn handle_modal(&mut self, key: KeyEvent) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        match handle_modal_key(modal, key) {
            ModalOutcome::Stay => {}
            ModalOutcome::Close => self.modal = None,
            ModalOutcome::Confirmed(action) => {
                self.modal = None;
                self.run_confirmed(action);
            }
        }
    }
}

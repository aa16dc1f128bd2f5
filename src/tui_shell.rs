use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use time::OffsetDateTime;

use crate::tui::TuiRunOptions;

mod app;
use app::App;

mod commands;
use commands::CommandDef;

mod input;
use input::Input;

mod modal;
use modal::{Modal, PendingAction};

mod suggest;
use suggest::sort_scored_suggestions;

mod view;
use view::{RenderCtx, View, render_view_chrome};

mod views;

mod worker;

pub(crate) fn run(opts: TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("console requires an interactive terminal (TTY)");
    }

    // Load before taking over the terminal so a dead proxy is visible in the log.
    let mut app = App::load(opts);

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = app::run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UiMode {
    Dashboard,
    Workflows,
    Executions,
    Access,
    Users,
    Logs,
    Instances,
}

impl UiMode {
    const ALL: [UiMode; 7] = [
        UiMode::Dashboard,
        UiMode::Workflows,
        UiMode::Executions,
        UiMode::Access,
        UiMode::Users,
        UiMode::Logs,
        UiMode::Instances,
    ];

    fn label(self) -> &'static str {
        match self {
            UiMode::Dashboard => "dashboard",
            UiMode::Workflows => "workflows",
            UiMode::Executions => "executions",
            UiMode::Access => "access",
            UiMode::Users => "users",
            UiMode::Logs => "logs",
            UiMode::Instances => "instances",
        }
    }

    fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == s)
    }

    /// Tabs other than these need the superadmin role on the proxy.
    fn is_public(self) -> bool {
        matches!(
            self,
            UiMode::Dashboard | UiMode::Workflows | UiMode::Executions
        )
    }

    fn next(self) -> Self {
        let i = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

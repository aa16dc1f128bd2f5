mod access;
mod dashboard;
mod executions;
mod instances;
mod logs;
mod users;
mod workflows;

pub(super) use access::AccessView;
pub(super) use dashboard::DashboardView;
pub(super) use executions::ExecutionsView;
pub(super) use instances::InstancesView;
pub(super) use logs::LogsView;
pub(super) use users::UsersView;
pub(super) use workflows::WorkflowsView;

use ratatui::style::{Color, Modifier, Style};

fn selected_style() -> Style {
    Style::default().bg(Color::DarkGray)
}

fn header_style() -> Style {
    Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)
}

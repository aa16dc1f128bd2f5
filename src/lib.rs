//! Administration console for a workflow-automation proxy.
//!
//! The library holds the typed REST client, the access-control view-model and
//! the listing/dashboard derivations; the `flowgate` binary drives them from
//! clap subcommands or the interactive console.

pub mod access;
pub mod admin;
pub mod dashboard;
pub mod endpoint;
pub mod forms;
pub mod listing;
pub mod logging;
pub mod model;
pub mod remote;
pub mod snapshot;
pub mod store;
pub mod sync;
pub mod tui;

mod tui_shell;

//! Shared Dioxus UI for the cardroom table client.
//!
//! Platform-agnostic: components, the [`UiMessage`] type, and the session
//! loops in [`app_logic`]. Platform crates supply drawing, alerts and a
//! sleep function.

pub mod app_logic;
pub mod components;

use cardroom_core::protocol::{ActionKind, InputField};
use cardroom_core::replay::ReplayStep;

/// Messages sent from UI components to the background coroutine.
#[derive(Debug, Clone, PartialEq)]
pub enum UiMessage {
    /// A control button was pressed.
    Dispatch(ActionKind),
    /// The user edited an input.
    Input { field: InputField, value: String },
    /// Previous/next in a hand history.
    Replay(ReplayStep),
}

/// State of the table socket, for the connection badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Connecting,
    Connected,
    Reconnecting,
    /// Reconnect attempts ran out.
    Lost,
}

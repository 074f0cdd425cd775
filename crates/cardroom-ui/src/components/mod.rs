pub mod action_panel;
pub mod connection_badge;
pub mod replay_bar;

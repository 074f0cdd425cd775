//! Platform-agnostic session loops for the table and hand-history views.
//!
//! Both are the body of a Dioxus `use_coroutine`. They are parameterised
//! over an async sleep function (`gloo_timers` on web, `tokio::time::sleep`
//! natively) and a draw callback, so platform crates only provide thin
//! adapters.

use std::future::Future;

use cardroom_client::session::{SessionEvent, TableSession};
use cardroom_client::watchdog::Connector;
use cardroom_core::controls::ControlPanel;
use cardroom_core::protocol::Frame;
use cardroom_core::replay::{ReplayCursor, ReplayStatus};
use cardroom_core::style::Style;
use dioxus::prelude::*;
use futures_util::StreamExt;
use tracing::{error, warn};

use crate::{LinkState, UiMessage};

/// Periods of the two presentation timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub draw_ms: u64,
    pub evict_ms: u64,
}

impl Timers {
    pub fn from_style(style: &Style) -> Self {
        Self {
            draw_ms: style.frame_interval_ms(),
            evict_ms: style.shifter_interval_ms(),
        }
    }
}

/// Drive a live table until the UI goes away or reconnecting is abandoned.
///
/// One cooperative loop multiplexes socket events, UI messages, the draw
/// tick and the eviction tick. The control panel signal is republished
/// after every batch and every local edit; drawing always takes the oldest
/// queued frame. A closed socket is reopened inline, so the felt holds its
/// last picture during an outage while the controls stay disabled.
#[allow(clippy::too_many_arguments)]
pub async fn run_table<C, S, Fut, D, N>(
    mut session: TableSession,
    connector: C,
    rx: &mut UnboundedReceiver<UiMessage>,
    mut panel: Signal<ControlPanel>,
    mut link: Signal<LinkState>,
    timers: Timers,
    sleep_ms: S,
    mut draw: D,
    mut notify: N,
) where
    C: Connector,
    S: Fn(u64) -> Fut,
    Fut: Future<Output = ()>,
    D: FnMut(&Frame),
    N: FnMut(&str),
{
    panel.set(session.panel().clone());
    if !session.is_closed() {
        link.set(LinkState::Connected);
    }

    let mut draw_tick = Box::pin(sleep_ms(timers.draw_ms));
    let mut evict_tick = Box::pin(sleep_ms(timers.evict_ms));

    loop {
        tokio::select! {
            event = session.recv() => {
                match event {
                    SessionEvent::Updated { .. } => {
                        panel.set(session.panel().clone());
                        if *link.peek() != LinkState::Connected {
                            link.set(LinkState::Connected);
                        }
                    }
                    SessionEvent::Notice(message) => notify(&message),
                    SessionEvent::Closed => {
                        link.set(LinkState::Reconnecting);
                        panel.set(ControlPanel::new());
                        let outcome = tokio::select! {
                            outcome = session.reconnect(&connector, &sleep_ms) => Some(outcome),
                            _ = discard_input(rx) => None,
                        };
                        match outcome {
                            None => return,
                            Some(Ok(_)) => {
                                link.set(LinkState::Connected);
                                panel.set(session.panel().clone());
                            }
                            Some(Err(e)) => {
                                error!(error = %e, "table view disconnected for good");
                                link.set(LinkState::Lost);
                                return;
                            }
                        }
                    }
                }
            }
            message = rx.next() => {
                match message {
                    Some(UiMessage::Dispatch(kind)) => {
                        if let Err(e) = session.dispatch(kind) {
                            warn!(error = %e, action = kind.tag(), "action not sent");
                        }
                        panel.set(session.panel().clone());
                    }
                    Some(UiMessage::Input { field, value }) => {
                        session.panel_mut().set_input(field, value);
                        panel.set(session.panel().clone());
                    }
                    Some(UiMessage::Replay(_)) => {}
                    None => return,
                }
            }
            _ = &mut draw_tick => {
                draw(session.consume_oldest());
                draw_tick.set(sleep_ms(timers.draw_ms));
            }
            _ = &mut evict_tick => {
                session.evict();
                evict_tick.set(sleep_ms(timers.evict_ms));
            }
        }
    }
}

/// Swallow UI messages while the socket is down; nothing clicked during an
/// outage is sent later. Resolves once the UI goes away.
async fn discard_input(rx: &mut UnboundedReceiver<UiMessage>) {
    while let Some(message) = rx.next().await {
        warn!(?message, "table socket is down, input dropped");
    }
}

/// Drive a hand-history view: redraw the current frame every tick and move
/// the cursor on previous/next.
pub async fn run_replay<S, Fut, D>(
    mut cursor: ReplayCursor<Frame>,
    rx: &mut UnboundedReceiver<UiMessage>,
    mut status: Signal<ReplayStatus>,
    draw_ms: u64,
    sleep_ms: S,
    mut draw: D,
) where
    S: Fn(u64) -> Fut,
    Fut: Future<Output = ()>,
    D: FnMut(&Frame),
{
    status.set(cursor.status());
    let mut draw_tick = Box::pin(sleep_ms(draw_ms));

    loop {
        tokio::select! {
            message = rx.next() => {
                match message {
                    Some(UiMessage::Replay(step)) => {
                        cursor.step(step);
                        status.set(cursor.status());
                    }
                    Some(_) => {}
                    None => return,
                }
            }
            _ = &mut draw_tick => {
                draw(cursor.current());
                draw_tick.set(sleep_ms(draw_ms));
            }
        }
    }
}

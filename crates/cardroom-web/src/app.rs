//! Root component for the browser table client.
//!
//! The page decides the view: a live table (socket, frame queue, controls)
//! or a hand history (fixed frames, previous/next). Both paint the same
//! felt onto one `<canvas>`.

use cardroom_client::net_client::NetClient;
use cardroom_client::session::TableSession;
use cardroom_client::watchdog::{ReconnectPolicy, WsConnector};
use cardroom_core::bootstrap::{Bootstrap, ReplayBootstrap};
use cardroom_core::controls::ControlPanel;
use cardroom_core::felt::Felt;
use cardroom_core::protocol::Frame;
use cardroom_core::replay::ReplayCursor;
use cardroom_ui::app_logic::{Timers, run_replay, run_table};
use cardroom_ui::components::action_panel::ActionPanel;
use cardroom_ui::components::connection_badge::ConnectionBadge;
use cardroom_ui::components::replay_bar::ReplayBar;
use cardroom_ui::{LinkState, UiMessage};
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use tracing::{error, info, warn};

use crate::canvas::WebCanvas;
use crate::page::{self, Page};

const FELT_ID: &str = "felt";
const FELT_WIDTH: u32 = 1024;
const FELT_HEIGHT: u32 = 768;

fn sleep_ms(ms: u64) -> TimeoutFuture {
    TimeoutFuture::new(ms.min(u64::from(u32::MAX)) as u32)
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window()
        && window.alert_with_message(message).is_err()
    {
        warn!(message, "could not show notice");
    }
}

/// Draw callback for the session loops. The canvas is looked up on first
/// use because the coroutine can start before the element is mounted.
fn painter(felt: Felt) -> impl FnMut(&Frame) {
    let mut surface: Option<WebCanvas> = None;
    move |frame| {
        if surface.is_none() {
            surface = WebCanvas::find(FELT_ID);
        }
        if let Some(canvas) = surface.as_mut() {
            felt.draw(canvas, frame);
        }
    }
}

/// Root `<App>` component.
#[component]
pub fn App() -> Element {
    let page = use_hook(|| {
        page::load().map_err(|e| {
            error!(error = %e, "table page is missing its data");
            e.to_string()
        })
    });

    match page {
        Ok(Page::Table(boot)) => rsx! { TableView { boot } },
        Ok(Page::Replay(boot)) => rsx! { ReplayView { boot } },
        Err(message) => rsx! {
            div { class: "p-4 text-red-700", "Could not load the table: {message}" }
        },
    }
}

#[component]
fn TableView(boot: Bootstrap) -> Element {
    let panel = use_signal(|| ControlPanel::from_descriptor(&boot.frame.action));
    let link = use_signal(|| LinkState::Connecting);

    let _coroutine = use_coroutine(move |mut rx: UnboundedReceiver<UiMessage>| {
        let boot = boot.clone();
        async move {
            let url = match page::socket_url(&boot.websocket_path) {
                Ok(url) => url,
                Err(e) => {
                    error!(error = %e, "cannot build the table socket URL");
                    return;
                }
            };
            info!(pk = %boot.pk, %url, "opening table");

            let connector = WsConnector::default();
            let policy = ReconnectPolicy::from_style(&boot.style);
            let session =
                match TableSession::open(&connector, url.clone(), boot.frame.clone(), policy).await
                {
                    Ok(session) => session,
                    Err(e) => {
                        // The session reconnects on its own from here.
                        warn!(error = %e, "first connect failed");
                        TableSession::new(url, NetClient::disconnected(), boot.frame, policy)
                    }
                };

            run_table(
                session,
                connector,
                &mut rx,
                panel,
                link,
                Timers::from_style(&boot.style),
                sleep_ms,
                painter(Felt::new(boot.style)),
                alert,
            )
            .await;
        }
    });

    rsx! {
        div { class: "flex flex-col items-center gap-2 p-2",
            div { class: "flex w-full justify-end",
                ConnectionBadge { link }
            }
            canvas {
                id: FELT_ID,
                width: "{FELT_WIDTH}",
                height: "{FELT_HEIGHT}",
            }
            ActionPanel { panel }
        }
    }
}

#[component]
fn ReplayView(boot: ReplayBootstrap) -> Element {
    let status = use_signal(|| {
        ReplayCursor::new(boot.frames.clone())
            .map(|cursor| cursor.status())
            .unwrap_or_default()
    });

    let _coroutine = use_coroutine(move |mut rx: UnboundedReceiver<UiMessage>| {
        let boot = boot.clone();
        async move {
            let cursor = match ReplayCursor::new(boot.frames) {
                Ok(cursor) => cursor,
                Err(e) => {
                    error!(error = %e, "nothing to replay");
                    return;
                }
            };
            let draw_ms = boot.configuration.frame_interval_ms();
            run_replay(
                cursor,
                &mut rx,
                status,
                draw_ms,
                sleep_ms,
                painter(Felt::new(boot.configuration)),
            )
            .await;
        }
    });

    rsx! {
        div { class: "flex flex-col items-center gap-2 p-2",
            canvas {
                id: FELT_ID,
                width: "{FELT_WIDTH}",
                height: "{FELT_HEIGHT}",
            }
            ReplayBar { status }
        }
    }
}

//! Client orchestrator: connects the table session, the felt renderer and
//! the TUI frontend.
//!
//! This module owns the event loops and drives:
//! - [`cardroom_client::session::TableSession`]: socket, frame queue, controls
//! - [`cardroom_core::felt::Felt`]: drawn into a [`Recorder`] every frame tick
//! - [`crate::tui::Tui`]: ratatui TUI frontend

use std::error::Error;
use std::io;
use std::time::Duration;

use cardroom_client::session::{SessionEvent, TableSession};
use cardroom_client::watchdog::{Connector, ReconnectPolicy};
use cardroom_core::bootstrap::{ConfigError, ReplayBootstrap};
use cardroom_core::felt::{Felt, Recorder};
use cardroom_core::protocol::Frame;
use cardroom_core::replay::ReplayCursor;
use cardroom_core::style::Style;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{debug, error, info, warn};

use crate::tui::{Tui, UserIntent};

/// How often the keyboard is polled.
const INPUT_POLL: Duration = Duration::from_millis(50);

fn sleep_ms(ms: u64) -> tokio::time::Sleep {
    tokio::time::sleep(Duration::from_millis(ms))
}

fn ticker(period_ms: u64) -> Interval {
    let mut tick = interval(Duration::from_millis(period_ms.max(1)));
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tick
}

/// Read a hand history: either a bare JSON array of frames, or an object
/// with `frames` and an optional `configuration` as a hand-history page
/// embeds them. `style`, when given, replaces the file's configuration.
pub fn parse_replay(text: &str, style: Option<Style>) -> Result<ReplayBootstrap, ConfigError> {
    let json = |source: serde_json::Error| ConfigError::Json {
        element: "replay".to_string(),
        source,
    };
    let value: serde_json::Value = serde_json::from_str(text).map_err(json)?;
    let mut boot = match value {
        serde_json::Value::Object(map) => {
            ReplayBootstrap::from_elements(|id| match (id, map.get(id)) {
                (_, Some(value)) => Some(value.to_string()),
                ("configuration", None) => Some("{}".to_string()),
                _ => None,
            })?
        }
        frames => {
            let frames: Vec<Frame> = serde_json::from_value(frames).map_err(json)?;
            if frames.is_empty() {
                return Err(ConfigError::EmptyReplay);
            }
            ReplayBootstrap {
                configuration: Style::default(),
                frames,
            }
        }
    };
    if let Some(style) = style {
        boot.configuration = style;
    }
    Ok(boot)
}

/// Open the table socket, then run the table view until the user quits or
/// reconnecting is abandoned.
pub async fn start_client<C: Connector>(
    url: &str,
    connector: C,
    style: Style,
    seed: Frame,
    policy: ReconnectPolicy,
) -> Result<(), Box<dyn Error>> {
    info!(%url, "opening table");
    let session = TableSession::open(&connector, url, seed, policy).await?;

    let mut tui = Tui::setup()?;
    let result = run_table_loop(&mut tui, session, &connector, Felt::new(style)).await;
    tui.teardown()?;
    result
}

/// Browse a hand history with the arrow keys.
pub async fn start_replay(replay: ReplayBootstrap) -> Result<(), Box<dyn Error>> {
    let cursor = ReplayCursor::new(replay.frames)?;
    info!(frames = cursor.status().total, "opening hand history");

    let mut tui = Tui::setup()?;
    let result = run_replay_loop(&mut tui, cursor, Felt::new(replay.configuration)).await;
    tui.teardown()?;
    result
}

// ---------------------------------------------------------------------------
// Event loops
// ---------------------------------------------------------------------------

async fn run_table_loop<C: Connector>(
    tui: &mut Tui,
    mut session: TableSession,
    connector: &C,
    felt: Felt,
) -> Result<(), Box<dyn Error>> {
    let mut recorder = Recorder::new();
    let mut draw_tick = ticker(felt.style().frame_interval_ms());
    let mut evict_tick = ticker(felt.style().shifter_interval_ms());
    let mut input_tick = ticker(INPUT_POLL.as_millis() as u64);

    tui.set_status(format!("Connected to {}", session.url()));
    tui.on_panel_changed(session.panel());

    loop {
        tokio::select! {
            event = session.recv() => {
                match event {
                    SessionEvent::Updated { .. } => tui.on_panel_changed(session.panel()),
                    SessionEvent::Notice(message) => tui.show_notice(message),
                    SessionEvent::Closed => {
                        tui.set_status("Connection lost, reconnecting…");
                        tui.render_table(session.panel())?;

                        let outcome = tokio::select! {
                            outcome = session.reconnect(connector, sleep_ms) => Some(outcome),
                            quit = quit_requested(tui) => {
                                quit?;
                                None
                            }
                        };
                        match outcome {
                            None => return Ok(()),
                            Some(Ok(attempts)) => {
                                tui.set_status(format!(
                                    "Reconnected to {} after {attempts} attempt(s)",
                                    session.url()
                                ));
                                tui.on_panel_changed(session.panel());
                            }
                            Some(Err(e)) => {
                                error!(error = %e, "giving up on the table");
                                return Err(e.into());
                            }
                        }
                    }
                }
            }

            _ = draw_tick.tick() => {
                felt.draw(&mut recorder, session.consume_oldest());
                tui.set_picture(recorder.take());
                tui.render_table(session.panel())?;
            }

            _ = evict_tick.tick() => {
                session.evict();
            }

            _ = input_tick.tick() => {
                match tui.poll_table_input(session.panel())? {
                    UserIntent::Quit => return Ok(()),
                    UserIntent::Dispatch(kind) => {
                        match session.dispatch(kind) {
                            Ok(command) => debug!(%command, "action sent"),
                            Err(e) => warn!(error = %e, action = kind.tag(), "action not sent"),
                        }
                        tui.render_table(session.panel())?;
                    }
                    UserIntent::Input { field, value } => {
                        session.panel_mut().set_input(field, value);
                        tui.render_table(session.panel())?;
                    }
                    UserIntent::Replay(_) | UserIntent::None => {}
                }
            }
        }
    }
}

/// Resolves once the user presses Esc.
async fn quit_requested(tui: &mut Tui) -> io::Result<()> {
    let mut input_tick = ticker(INPUT_POLL.as_millis() as u64);
    loop {
        input_tick.tick().await;
        if tui.poll_quit()? {
            return Ok(());
        }
    }
}

async fn run_replay_loop(
    tui: &mut Tui,
    mut cursor: ReplayCursor<Frame>,
    felt: Felt,
) -> Result<(), Box<dyn Error>> {
    let mut recorder = Recorder::new();
    let mut draw_tick = ticker(felt.style().frame_interval_ms());
    let mut input_tick = ticker(INPUT_POLL.as_millis() as u64);

    tui.set_status("Hand history");

    loop {
        tokio::select! {
            _ = draw_tick.tick() => {
                felt.draw(&mut recorder, cursor.current());
                tui.set_picture(recorder.take());
                tui.render_replay(&cursor.status())?;
            }

            _ = input_tick.tick() => {
                match tui.poll_replay_input()? {
                    UserIntent::Quit => return Ok(()),
                    UserIntent::Replay(step) => {
                        cursor.step(step);
                        felt.draw(&mut recorder, cursor.current());
                        tui.set_picture(recorder.take());
                        tui.render_replay(&cursor.status())?;
                    }
                    _ => {}
                }
            }
        }
    }
}

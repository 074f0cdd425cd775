//! One table view's worth of client state.
//!
//! [`TableSession`] owns the socket handle, the frame queue and the control
//! panel. The queue and panel outlive any number of sockets: a reconnect
//! swaps the [`NetClient`] and keeps everything else.

use std::future::Future;

use cardroom_core::controls::ControlPanel;
use cardroom_core::frame_queue::FrameQueue;
use cardroom_core::protocol::{ActionKind, Command, Frame, ServerEvent};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::net_client::NetClient;
use crate::transport::TransportError;
use crate::watchdog::{Connector, ReconnectPolicy, Watchdog};

#[derive(Debug, Error)]
pub enum SessionError {
    /// The command was dropped; there is no outbound queue across outages.
    #[error("table socket is closed")]
    SocketClosed,
    #[error("gave up reconnecting after {0} attempts")]
    ReconnectExhausted(u32),
}

/// What one inbound socket event did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Frames were queued and the panel refreshed from the newest one.
    Updated { appended: usize },
    /// A message to show the user right away.
    Notice(String),
    /// The socket closed; reconnect before receiving again.
    Closed,
}

pub struct TableSession {
    url: String,
    net: NetClient,
    frames: FrameQueue<Frame>,
    panel: ControlPanel,
    watchdog: Watchdog,
}

impl TableSession {
    /// Session over an already opened socket, seeded with the frame the page
    /// was rendered with.
    pub fn new(
        url: impl Into<String>,
        net: NetClient,
        seed: Frame,
        policy: ReconnectPolicy,
    ) -> Self {
        let panel = ControlPanel::from_descriptor(&seed.action);
        Self {
            url: url.into(),
            net,
            frames: FrameQueue::new(seed),
            panel,
            watchdog: Watchdog::new(policy),
        }
    }

    /// Open the socket through `connector` and build the session.
    pub async fn open<C: Connector>(
        connector: &C,
        url: impl Into<String>,
        seed: Frame,
        policy: ReconnectPolicy,
    ) -> Result<Self, TransportError> {
        let url = url.into();
        let net = connector.connect(&url).await?;
        info!(url = %url, "table socket open");
        Ok(Self::new(url, net, seed, policy))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    /// Mutable panel, for editing inputs.
    pub fn panel_mut(&mut self) -> &mut ControlPanel {
        &mut self.panel
    }

    pub fn frames(&self) -> &FrameQueue<Frame> {
        &self.frames
    }

    pub fn is_closed(&self) -> bool {
        self.net.is_closed()
    }

    pub fn send(&self, command: Command) -> Result<(), SessionError> {
        if self.net.is_closed() {
            warn!(%command, "dropping command, table socket is closed");
            return Err(SessionError::SocketClosed);
        }
        debug!(%command, "sending");
        self.net
            .send(command)
            .map_err(|_| SessionError::SocketClosed)
    }

    /// Send `kind` with the text of its input, if it has one, and clear
    /// that input.
    pub fn dispatch(&mut self, kind: ActionKind) -> Result<Command, SessionError> {
        let value = kind
            .input()
            .map(|field| self.panel.take_input(field))
            .unwrap_or_default();
        let command = Command::new(kind, value);
        self.send(command.clone())?;
        Ok(command)
    }

    /// Queue a batch and refresh the controls from the newest frame.
    pub fn append_frames(&mut self, frames: Vec<Frame>) -> usize {
        let appended = self.frames.append(frames);
        self.panel.refresh(&self.frames.newest().action);
        debug!(appended, queued = self.frames.len(), "frames received");
        appended
    }

    /// Frame for this draw tick: the oldest one still queued.
    pub fn consume_oldest(&mut self) -> &Frame {
        self.frames.peek_oldest()
    }

    pub fn evict(&mut self) -> bool {
        self.frames.evict_if_safe()
    }

    /// Wait for the next socket event and apply it.
    pub async fn recv(&mut self) -> SessionEvent {
        match self.net.incoming.recv().await {
            Some(ServerEvent::Update { frames }) => SessionEvent::Updated {
                appended: self.append_frames(frames),
            },
            Some(ServerEvent::Notify { message }) => {
                info!(%message, "server notice");
                SessionEvent::Notice(message)
            }
            None => {
                warn!(url = %self.url, "table socket closed");
                SessionEvent::Closed
            }
        }
    }

    /// If the socket is closed, open exactly one replacement and swap it
    /// in. Returns whether a swap happened.
    pub async fn watchdog_tick<C: Connector>(
        &mut self,
        connector: &C,
    ) -> Result<bool, TransportError> {
        if !self.net.is_closed() {
            return Ok(false);
        }
        self.net = connector.connect(&self.url).await?;
        Ok(true)
    }

    /// Reopen a closed socket, backing off between attempts. Returns the
    /// number of attempts it took.
    pub async fn reconnect<C, F, Fut>(
        &mut self,
        connector: &C,
        sleep_ms: F,
    ) -> Result<u32, SessionError>
    where
        C: Connector,
        F: Fn(u64) -> Fut,
        Fut: Future<Output = ()>,
    {
        loop {
            let Some(delay) = self.watchdog.next_delay() else {
                let attempts = self.watchdog.attempts();
                warn!(attempts, "giving up on the table socket");
                return Err(SessionError::ReconnectExhausted(attempts));
            };
            let attempt = self.watchdog.attempts();
            debug!(attempt, delay, "waiting before reconnect");
            sleep_ms(delay).await;

            match self.watchdog_tick(connector).await {
                Ok(_) => {
                    self.watchdog.reset();
                    info!(attempt, url = %self.url, "table socket reopened");
                    return Ok(attempt);
                }
                Err(e) => warn!(attempt, error = %e, "reconnect failed"),
            }
        }
    }
}

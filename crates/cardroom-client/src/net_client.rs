//! Channel-based handle on one table socket.
//!
//! Background reader/writer tasks own the socket; the front end only sees
//! two channels. Inbound text is parsed into [`ServerEvent`]s, outbound
//! [`Command`]s are written as JSON strings.
//!
//! Use [`NetClient::from_transport`] over any
//! [`Transport`](crate::transport::Transport), or
//! [`connect_ws`](NetClient::connect_ws) for a WebSocket.

use cardroom_core::protocol::{Command, ServerEvent};
use tokio::sync::mpsc;

use crate::transport::TransportError;
#[cfg(feature = "native")]
use crate::transport::{Transport, TransportReader, TransportWriter};
#[cfg(any(feature = "native", feature = "web"))]
use cardroom_core::protocol::parse_server_event;
#[cfg(any(feature = "native", feature = "web"))]
use tracing::{debug, error, warn};

/// A connected (or formerly connected) table socket.
///
/// `incoming` closes when the socket does: after the peer hangs up, after a
/// read error, or after a payload that does not parse.
pub struct NetClient {
    pub incoming: mpsc::UnboundedReceiver<ServerEvent>,
    outgoing: mpsc::UnboundedSender<Command>,
}

impl NetClient {
    /// Create a `NetClient` over any [`Transport`], spawning its I/O tasks
    /// on the current tokio runtime.
    #[cfg(feature = "native")]
    pub fn from_transport<T: Transport>(transport: T) -> Self {
        let (reader, writer) = transport.split();

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel::<Command>();

        Self::spawn_reader_task(reader, event_tx);
        Self::spawn_writer_task(writer, command_rx);

        Self {
            incoming: event_rx,
            outgoing: command_tx,
        }
    }

    /// Open a WebSocket to `url`, optionally presenting a session cookie.
    #[cfg(feature = "native")]
    pub async fn connect_ws(url: &str, cookie: Option<&str>) -> Result<Self, TransportError> {
        let transport = crate::ws_transport::WsTransport::connect(url, cookie).await?;
        Ok(Self::from_transport(transport))
    }

    /// Open a browser WebSocket to `url`. Cookies for the page's origin are
    /// sent by the browser itself.
    ///
    /// Uses `gloo-net` and `spawn_local`, so nothing here needs `Send`.
    #[cfg(all(feature = "web", not(feature = "native")))]
    pub async fn connect_ws(url: &str) -> Result<Self, TransportError> {
        use futures_util::{SinkExt, StreamExt};
        use gloo_net::websocket::{Message, futures::WebSocket};

        let ws = WebSocket::open(url).map_err(|e| TransportError::Io(e.to_string()))?;
        let (mut sink, mut stream) = ws.split();

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (command_tx, mut command_rx) = mpsc::unbounded_channel::<Command>();

        wasm_bindgen_futures::spawn_local(async move {
            while let Some(message) = stream.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        if !forward(&text, &event_tx) {
                            break;
                        }
                    }
                    Ok(Message::Bytes(_)) => {}
                    Err(e) => {
                        warn!(error = %e, "table socket read failed");
                        break;
                    }
                }
            }
            debug!("table socket reader finished");
        });

        wasm_bindgen_futures::spawn_local(async move {
            while let Some(command) = command_rx.recv().await {
                let Ok(json) = serde_json::to_string(&command) else {
                    continue;
                };
                if sink.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            incoming: event_rx,
            outgoing: command_tx,
        })
    }

    /// Client over channels whose far ends are driven by something other
    /// than a socket task.
    pub fn from_channels(
        incoming: mpsc::UnboundedReceiver<ServerEvent>,
        outgoing: mpsc::UnboundedSender<Command>,
    ) -> Self {
        Self { incoming, outgoing }
    }

    /// A client whose socket is already gone. The first receive reports the
    /// close, which sends a session straight into its reconnect path.
    pub fn disconnected() -> Self {
        let (_, incoming) = mpsc::unbounded_channel();
        let (outgoing, _) = mpsc::unbounded_channel();
        Self::from_channels(incoming, outgoing)
    }

    /// Queue `command` for the writer task. Fire-and-forget: the next frame
    /// from the server is the only acknowledgement.
    pub fn send(&self, command: Command) -> Result<(), TransportError> {
        self.outgoing
            .send(command)
            .map_err(|_| TransportError::ConnectionClosed)
    }

    /// `true` once the socket has gone away and every event it delivered
    /// has been received.
    pub fn is_closed(&self) -> bool {
        self.outgoing.is_closed() || (self.incoming.is_closed() && self.incoming.is_empty())
    }

    #[cfg(feature = "native")]
    fn spawn_reader_task<R: TransportReader>(
        mut reader: R,
        event_tx: mpsc::UnboundedSender<ServerEvent>,
    ) {
        tokio::spawn(async move {
            loop {
                match reader.recv().await {
                    Ok(Some(text)) => {
                        if !forward(&text, &event_tx) {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!(error = %e, "table socket read failed");
                        break;
                    }
                }
            }
            debug!("table socket reader finished");
        });
    }

    #[cfg(feature = "native")]
    fn spawn_writer_task<W: TransportWriter>(
        mut writer: W,
        mut command_rx: mpsc::UnboundedReceiver<Command>,
    ) {
        tokio::spawn(async move {
            while let Some(command) = command_rx.recv().await {
                let Ok(json) = serde_json::to_string(&command) else {
                    continue;
                };
                if let Err(e) = writer.send(&json).await {
                    warn!(error = %e, %command, "table socket write failed");
                    break;
                }
            }
        });
    }
}

/// Parse one inbound text message and pass it on. `false` ends the reader:
/// either the client is gone or the payload is malformed, and a malformed
/// payload stops processing on this socket.
#[cfg(any(feature = "native", feature = "web"))]
fn forward(text: &str, event_tx: &mpsc::UnboundedSender<ServerEvent>) -> bool {
    match parse_server_event(text) {
        Ok(event) => event_tx.send(event).is_ok(),
        Err(e) => {
            error!(error = %e, "closing table socket after malformed payload");
            false
        }
    }
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;
    use crate::transport::memory::pair;
    use cardroom_core::protocol::ActionKind;

    #[tokio::test]
    async fn commands_are_written_as_json_strings() {
        let (transport, mut peer) = pair();
        let client = NetClient::from_transport(transport);

        client.send(Command::new(ActionKind::Join, "4")).unwrap();
        client.send(Command::bare(ActionKind::Fold)).unwrap();
        assert_eq!(peer.from_client.recv().await.unwrap(), r#""j 4""#);
        assert_eq!(peer.from_client.recv().await.unwrap(), r#""f""#);
    }

    #[tokio::test]
    async fn inbound_events_are_parsed() {
        let (transport, peer) = pair();
        let mut client = NetClient::from_transport(transport);

        peer.push(r#"{"type": "notify", "message": "hello"}"#);
        peer.push(r#"{"type": "update", "frames": [{}, {}]}"#);

        assert_eq!(
            client.incoming.recv().await,
            Some(ServerEvent::Notify {
                message: "hello".into()
            })
        );
        let Some(ServerEvent::Update { frames }) = client.incoming.recv().await else {
            panic!("expected update");
        };
        assert_eq!(frames.len(), 2);
        assert!(!client.is_closed());
    }

    #[test]
    fn disconnected_clients_refuse_commands() {
        let mut client = NetClient::disconnected();
        assert!(client.is_closed());
        assert!(matches!(
            client.send(Command::bare(ActionKind::Leave)),
            Err(TransportError::ConnectionClosed)
        ));
        assert_eq!(
            client.incoming.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        );
    }

    #[tokio::test]
    async fn peer_hangup_closes_the_client() {
        let (transport, peer) = pair();
        let mut client = NetClient::from_transport(transport);
        drop(peer);

        assert_eq!(client.incoming.recv().await, None);
        assert!(client.is_closed());
    }

    #[tokio::test]
    async fn malformed_payload_ends_the_reader() {
        let (transport, peer) = pair();
        let mut client = NetClient::from_transport(transport);

        peer.push("{not json");
        peer.push(r#"{"type": "notify", "message": "never seen"}"#);

        assert_eq!(client.incoming.recv().await, None);
        assert!(client.is_closed());
    }
}

//! Table socket for native targets, over `tokio-tungstenite`.

use std::fmt::Display;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::COOKIE;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::debug;

use crate::transport::{Transport, TransportError, TransportReader, TransportWriter};

type TableStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

fn io_error(e: impl Display) -> TransportError {
    TransportError::Io(e.to_string())
}

/// Upgrade request for `url`. Tables behind a login need the session cookie
/// a browser would send, e.g. `sessionid=...`.
pub fn handshake_request(url: &str, cookie: Option<&str>) -> Result<Request, TransportError> {
    let mut request = url.into_client_request().map_err(io_error)?;
    if let Some(cookie) = cookie {
        let value = HeaderValue::from_str(cookie).map_err(io_error)?;
        request.headers_mut().insert(COOKIE, value);
    }
    Ok(request)
}

pub struct WsTransport {
    stream: TableStream,
}

impl WsTransport {
    /// Open a `ws://` or `wss://` table socket.
    pub async fn connect(url: &str, cookie: Option<&str>) -> Result<Self, TransportError> {
        let request = handshake_request(url, cookie)?;
        let (stream, response) = connect_async(request).await.map_err(io_error)?;
        debug!(status = %response.status(), url, "table socket handshake complete");
        Ok(Self { stream })
    }
}

impl Transport for WsTransport {
    type Reader = TableReader;
    type Writer = TableWriter;

    fn split(self) -> (Self::Reader, Self::Writer) {
        let (sink, stream) = self.stream.split();
        (TableReader { stream }, TableWriter { sink })
    }
}

pub struct TableReader {
    stream: SplitStream<TableStream>,
}

impl TransportReader for TableReader {
    async fn recv(&mut self) -> Result<Option<String>, TransportError> {
        while let Some(message) = self.stream.next().await {
            match message.map_err(io_error)? {
                Message::Text(text) => return Ok(Some(text.to_string())),
                Message::Close(frame) => {
                    if let Some(frame) = frame {
                        debug!(
                            code = %frame.code,
                            reason = %frame.reason,
                            "server closed the table socket"
                        );
                    }
                    return Ok(None);
                }
                // The table only speaks text.
                Message::Binary(_) | Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }
        Ok(None)
    }
}

pub struct TableWriter {
    sink: SplitSink<TableStream, Message>,
}

impl TransportWriter for TableWriter {
    async fn send(&mut self, text: &str) -> Result<(), TransportError> {
        self.sink.send(Message::text(text)).await.map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_rides_on_the_upgrade_request() {
        let request =
            handshake_request("ws://127.0.0.1:8000/ws/cash-game/3/", Some("sessionid=abc"))
                .unwrap();
        assert_eq!(request.uri().path(), "/ws/cash-game/3/");
        assert_eq!(request.headers()[COOKIE], "sessionid=abc");

        let anonymous = handshake_request("wss://cards.example/ws/t/", None).unwrap();
        assert!(anonymous.headers().get(COOKIE).is_none());
    }

    #[test]
    fn bad_urls_and_cookies_are_io_errors() {
        assert!(matches!(
            handshake_request("not a url", None),
            Err(TransportError::Io(_))
        ));
        assert!(matches!(
            handshake_request("ws://table/", Some("bad\ncookie")),
            Err(TransportError::Io(_))
        ));
    }
}

//! Transport abstraction for the table socket.
//!
//! [`NetClient`](crate::net_client::NetClient) only needs text messages in
//! both directions, so anything that can be split into a reader and a
//! writer of strings can carry a table session: a WebSocket in production,
//! an in-memory pipe in tests.

use std::future::Future;

use thiserror::Error;

/// Errors that can occur during transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The remote peer closed the connection.
    #[error("connection closed")]
    ConnectionClosed,

    /// An I/O or protocol-level error.
    #[error("{0}")]
    Io(String),
}

/// Read half of a transport connection.
pub trait TransportReader: Send + 'static {
    /// Receive the next text message.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    fn recv(&mut self) -> impl Future<Output = Result<Option<String>, TransportError>> + Send;
}

/// Write half of a transport connection.
pub trait TransportWriter: Send + 'static {
    fn send(&mut self, text: &str) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// A bidirectional transport that can be split into independent read and
/// write halves, so each half can live in its own task.
pub trait Transport: Send + 'static {
    type Reader: TransportReader;
    type Writer: TransportWriter;

    fn split(self) -> (Self::Reader, Self::Writer);
}

/// In-memory transport for tests: the peer side plays the table server.
#[cfg(test)]
pub(crate) mod memory {
    use tokio::sync::mpsc;

    use super::{Transport, TransportError, TransportReader, TransportWriter};

    pub struct MemoryTransport {
        inbound: mpsc::UnboundedReceiver<String>,
        outbound: mpsc::UnboundedSender<String>,
    }

    /// Server end of a [`MemoryTransport`]. Dropping it closes the socket.
    pub struct Peer {
        pub to_client: mpsc::UnboundedSender<String>,
        pub from_client: mpsc::UnboundedReceiver<String>,
    }

    pub fn pair() -> (MemoryTransport, Peer) {
        let (to_client, inbound) = mpsc::unbounded_channel();
        let (outbound, from_client) = mpsc::unbounded_channel();
        (
            MemoryTransport { inbound, outbound },
            Peer {
                to_client,
                from_client,
            },
        )
    }

    impl Peer {
        pub fn push(&self, text: &str) {
            self.to_client
                .send(text.to_string())
                .expect("client reader dropped");
        }
    }

    pub struct MemoryReader(mpsc::UnboundedReceiver<String>);
    pub struct MemoryWriter(mpsc::UnboundedSender<String>);

    impl Transport for MemoryTransport {
        type Reader = MemoryReader;
        type Writer = MemoryWriter;

        fn split(self) -> (MemoryReader, MemoryWriter) {
            (MemoryReader(self.inbound), MemoryWriter(self.outbound))
        }
    }

    impl TransportReader for MemoryReader {
        async fn recv(&mut self) -> Result<Option<String>, TransportError> {
            Ok(self.0.recv().await)
        }
    }

    impl TransportWriter for MemoryWriter {
        async fn send(&mut self, text: &str) -> Result<(), TransportError> {
            self.0
                .send(text.to_string())
                .map_err(|_| TransportError::ConnectionClosed)
        }
    }
}

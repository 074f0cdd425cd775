//! Reconnect policy for the table socket.
//!
//! A closed socket is replaced as soon as the close is observed, waiting
//! `base_delay_ms` before the first attempt and doubling the wait after
//! every failure. Nothing is replayed after a reconnect: the server's next
//! push is a full snapshot.

use std::future::Future;

use cardroom_core::style::Style;

use crate::net_client::NetClient;
use crate::transport::TransportError;

/// Default cap on the backoff delay.
pub const MAX_RECONNECT_DELAY_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    /// `None` keeps trying for as long as the view is open.
    pub max_attempts: Option<u32>,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            base_delay_ms: 1_000,
            max_delay_ms: MAX_RECONNECT_DELAY_MS,
            max_attempts: None,
        }
    }
}

impl ReconnectPolicy {
    /// Policy whose base delay is the style's `watchdog_timeout`.
    pub fn from_style(style: &Style) -> Self {
        Self {
            base_delay_ms: style.watchdog_interval_ms(),
            ..Self::default()
        }
    }

    pub fn with_max_attempts(self, max_attempts: Option<u32>) -> Self {
        Self {
            max_attempts,
            ..self
        }
    }
}

/// Attempt counter for one outage.
#[derive(Debug, Clone)]
pub struct Watchdog {
    policy: ReconnectPolicy,
    attempts: u32,
}

impl Watchdog {
    pub fn new(policy: ReconnectPolicy) -> Self {
        Self {
            policy,
            attempts: 0,
        }
    }

    /// Attempts made since the last [`reset`](Self::reset).
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Delay before the next attempt, or `None` once the attempt budget is
    /// spent. Counts the attempt.
    pub fn next_delay(&mut self) -> Option<u64> {
        if let Some(max) = self.policy.max_attempts {
            if self.attempts >= max {
                return None;
            }
        }
        let factor = 1u64.checked_shl(self.attempts).unwrap_or(u64::MAX);
        let delay = self
            .policy
            .base_delay_ms
            .saturating_mul(factor)
            .min(self.policy.max_delay_ms);
        self.attempts += 1;
        Some(delay)
    }

    /// Forget the current outage after a successful reconnect.
    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}

/// Opens table sockets. The session holds one and calls it every time the
/// current socket is found closed.
pub trait Connector {
    fn connect(&self, url: &str) -> impl Future<Output = Result<NetClient, TransportError>>;
}

/// [`Connector`] over a real WebSocket.
#[cfg(any(feature = "native", feature = "web"))]
#[derive(Debug, Clone, Default)]
pub struct WsConnector {
    /// Sent as the `Cookie` header on native targets.
    pub cookie: Option<String>,
}

#[cfg(any(feature = "native", feature = "web"))]
impl Connector for WsConnector {
    async fn connect(&self, url: &str) -> Result<NetClient, TransportError> {
        #[cfg(feature = "native")]
        {
            NetClient::connect_ws(url, self.cookie.as_deref()).await
        }
        #[cfg(not(feature = "native"))]
        {
            NetClient::connect_ws(url).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_double_up_to_the_cap() {
        let mut watchdog = Watchdog::new(ReconnectPolicy {
            base_delay_ms: 500,
            max_delay_ms: 3_000,
            max_attempts: None,
        });
        let delays: Vec<_> = (0..6).map(|_| watchdog.next_delay().unwrap()).collect();
        assert_eq!(delays, vec![500, 1_000, 2_000, 3_000, 3_000, 3_000]);
        assert_eq!(watchdog.attempts(), 6);
    }

    #[test]
    fn attempt_budget_runs_out() {
        let mut watchdog = Watchdog::new(ReconnectPolicy::default().with_max_attempts(Some(2)));
        assert_eq!(watchdog.next_delay(), Some(1_000));
        assert_eq!(watchdog.next_delay(), Some(2_000));
        assert_eq!(watchdog.next_delay(), None);

        watchdog.reset();
        assert_eq!(watchdog.next_delay(), Some(1_000));
    }

    #[test]
    fn huge_attempt_counts_saturate() {
        let mut watchdog = Watchdog::new(ReconnectPolicy::default());
        for _ in 0..100 {
            assert!(watchdog.next_delay().unwrap() <= MAX_RECONNECT_DELAY_MS);
        }
    }

    #[test]
    fn base_delay_comes_from_the_style() {
        let style = Style {
            watchdog_timeout: 2.5,
            ..Style::default()
        };
        assert_eq!(ReconnectPolicy::from_style(&style).base_delay_ms, 2_500);
    }
}

pub mod net_client;
pub mod session;
pub mod transport;
pub mod watchdog;

#[cfg(feature = "native")]
pub mod ws_transport;

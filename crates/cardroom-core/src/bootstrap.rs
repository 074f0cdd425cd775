//! Data embedded in the table page before any socket opens.
//!
//! The page carries one JSON `<script>` element per value. Lookups go
//! through a closure so the same parsing serves the DOM and plain files.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::protocol::Frame;
use crate::style::Style;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("page element `{0}` is missing")]
    MissingElement(String),
    #[error("page element `{element}` is not valid JSON: {source}")]
    Json {
        element: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported page scheme `{0}`")]
    UnsupportedScheme(String),
    #[error("hand history has no frames")]
    EmptyReplay,
}

/// Everything a live table view needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Bootstrap {
    /// Table primary key, kept for logging.
    pub pk: String,
    /// Socket path relative to the page host, e.g. `/ws/cash-game/7/`.
    pub websocket_path: String,
    pub style: Style,
    /// Seed frame for the queue.
    pub frame: Frame,
}

impl Bootstrap {
    pub fn from_elements<F>(mut text_of: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let pk: serde_json::Value = element(&mut text_of, "pk")?;
        let pk = match pk {
            serde_json::Value::String(pk) => pk,
            other => other.to_string(),
        };
        Ok(Self {
            pk,
            websocket_path: element(&mut text_of, "websocket_url")?,
            style: element(&mut text_of, "style")?,
            frame: element(&mut text_of, "frame")?,
        })
    }
}

/// A hand-history page: a fixed list of frames.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayBootstrap {
    pub configuration: Style,
    pub frames: Vec<Frame>,
}

impl ReplayBootstrap {
    pub fn from_elements<F>(mut text_of: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let configuration = element(&mut text_of, "configuration")?;
        let frames: Vec<Frame> = element(&mut text_of, "frames")?;
        if frames.is_empty() {
            return Err(ConfigError::EmptyReplay);
        }
        Ok(Self {
            configuration,
            frames,
        })
    }
}

fn element<T, F>(text_of: &mut F, id: &str) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    F: FnMut(&str) -> Option<String>,
{
    let text = text_of(id).ok_or_else(|| ConfigError::MissingElement(id.to_string()))?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        element: id.to_string(),
        source,
    })
}

/// Socket URL on the page's own host: `http:` pages use `ws:`, `https:`
/// pages use `wss:`.
pub fn websocket_url(page_protocol: &str, host: &str, path: &str) -> Result<String, ConfigError> {
    let scheme = match page_protocol.trim_end_matches(':') {
        "http" => "ws",
        "https" => "wss",
        other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
    };
    Ok(format!("{scheme}://{host}{path}"))
}

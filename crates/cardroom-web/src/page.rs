//! Reads the JSON the server embedded in the page.

use cardroom_core::bootstrap::{Bootstrap, ConfigError, ReplayBootstrap, websocket_url};

/// Which view the page was rendered for.
#[derive(Debug, Clone)]
pub enum Page {
    Table(Bootstrap),
    Replay(ReplayBootstrap),
}

fn element_text(id: &str) -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .text_content()
}

/// Hand-history pages carry a `frames` element, table pages a `frame`.
pub fn load() -> Result<Page, ConfigError> {
    if element_text("frames").is_some() {
        ReplayBootstrap::from_elements(element_text).map(Page::Replay)
    } else {
        Bootstrap::from_elements(element_text).map(Page::Table)
    }
}

/// Absolute socket URL for `path` on the page's own host.
pub fn socket_url(path: &str) -> Result<String, ConfigError> {
    let location = web_sys::window()
        .ok_or_else(|| ConfigError::MissingElement("window".to_string()))?
        .location();
    let protocol = location.protocol().unwrap_or_default();
    let host = location.host().unwrap_or_default();
    websocket_url(&protocol, &host, path)
}

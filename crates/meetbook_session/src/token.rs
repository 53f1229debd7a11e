// --- File: crates/meetbook_session/src/token.rs ---

use meetbook_common::models::AccessToken;
use tracing::debug;

/// What the host application hands to a booking session at launch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostContext {
    /// Launch parameter supplied by the host bridge.
    pub start_param: Option<String>,
    /// URL the booking view was opened with.
    pub page_url: Option<String>,
    /// Id of the host user, forwarded with the booking.
    pub user_id: Option<String>,
}

impl HostContext {
    pub fn with_start_param(mut self, start_param: impl Into<String>) -> Self {
        self.start_param = Some(start_param.into());
        self
    }

    pub fn with_page_url(mut self, page_url: impl Into<String>) -> Self {
        self.page_url = Some(page_url.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// The launch parameter if present, otherwise the `token` query parameter of the page URL.
/// Blank values count as absent.
pub fn acquire_token(host: &HostContext) -> Option<AccessToken> {
    if let Some(token) = non_blank(host.start_param.as_deref()) {
        debug!("Token taken from host launch parameter");
        return Some(AccessToken::new(token));
    }

    let token = host.page_url.as_deref().and_then(token_from_url)?;
    debug!("Token taken from page URL");
    Some(AccessToken::new(token))
}

fn token_from_url(url: &str) -> Option<String> {
    let (_, rest) = url.split_once('?')?;
    let query = rest.split('#').next().unwrap_or_default();
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).ok()?;
    pairs
        .into_iter()
        .find(|(key, _)| key == "token")
        .and_then(|(_, value)| non_blank(Some(value.as_str())).map(str::to_string))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

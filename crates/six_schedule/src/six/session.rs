//! Forwarding of caller session cookies onto outbound SIX requests.

use super::error::SixError;
use reqwest::header::{HeaderMap, COOKIE, USER_AGENT};
use reqwest::{Client, Request};

/// Cookies every SIX request must carry, in the order they are checked.
pub const REQUIRED_SESSION_TOKENS: [&str; 2] = ["nissin", "khongguan"];

/// Browser identity sent with every upstream request.
pub const SIX_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Anything that can hand out session token values by cookie name.
pub trait SessionSource {
    fn token(&self, name: &str) -> Option<String>;
}

/// Reads tokens from the `Cookie` header(s) of an incoming request.
impl SessionSource for HeaderMap {
    fn token(&self, name: &str) -> Option<String> {
        self.get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| cookie::Cookie::split_parse(value))
            .filter_map(Result::ok)
            .find(|c| c.name() == name)
            .map(|c| c.value().to_string())
    }
}

/// The full set of required tokens, already checked for presence.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    values: Vec<(&'static str, String)>,
}

impl SessionTokens {
    /// Collects every required token from `source`.
    ///
    /// Fails on the first missing token; later tokens are not looked at.
    pub fn collect(source: &impl SessionSource) -> Result<Self, SixError> {
        let mut values = Vec::with_capacity(REQUIRED_SESSION_TOKENS.len());
        for name in REQUIRED_SESSION_TOKENS {
            let value = source
                .token(name)
                .ok_or(SixError::MissingSessionToken { name })?;
            values.push((name, value));
        }
        Ok(Self { values })
    }

    /// Renders the tokens as a `Cookie` header value.
    pub fn cookie_header(&self) -> String {
        self.values
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl SessionSource for SessionTokens {
    fn token(&self, name: &str) -> Option<String> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.clone())
    }
}

/// Builds a GET request for `target_url` carrying the caller's session cookies.
///
/// Only the presence of each token is checked, never its value.
pub fn build_request(
    client: &Client,
    target_url: &str,
    source: &impl SessionSource,
) -> Result<Request, SixError> {
    let tokens = SessionTokens::collect(source)?;

    let request = client
        .get(target_url)
        .header(COOKIE, tokens.cookie_header())
        .header(USER_AGENT, SIX_USER_AGENT)
        .build()?;

    Ok(request)
}

//! One-shot status messages carried across the post/redirect/get cycle.
//!
//! The message rides in a cookie holding base64url-encoded JSON. The form page
//! shows it once and removes the cookie in the same response.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};

pub const COOKIE_NAME: &str = "intake_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// Cookie that stores this message until the next form render.
    pub fn cookie(&self) -> Cookie<'static> {
        // serializing two plain fields cannot fail
        let json = serde_json::to_vec(self).unwrap_or_default();
        Cookie::build((COOKIE_NAME, URL_SAFE_NO_PAD.encode(json)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    /// Cookie to hand to [`CookieJar::remove`] once the message was shown.
    pub fn removal() -> Cookie<'static> {
        Cookie::build(COOKIE_NAME).path("/").build()
    }

    /// The pending message, if any. A cookie that does not decode is ignored.
    pub fn from_jar(jar: &CookieJar) -> Option<Self> {
        jar.get(COOKIE_NAME).and_then(|cookie| decode(cookie.value()))
    }
}

fn decode(value: &str) -> Option<Flash> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderMap, HeaderValue};

    fn jar_with(cookie: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        CookieJar::from_headers(&headers)
    }

    fn pair(cookie: &Cookie<'_>) -> String {
        format!("{}={}", cookie.name(), cookie.value())
    }

    #[test]
    fn cookie_reads_back_among_others() {
        let flash = Flash::success("Saved. Tracking code: 20240301-001. Rows added: 2.");
        let cookie = flash.cookie();
        assert_eq!(cookie.name(), COOKIE_NAME);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));

        let jar = jar_with(&format!("theme=dark; {}; lang=es", pair(&cookie)));
        assert_eq!(Flash::from_jar(&jar), Some(flash));
    }

    #[test]
    fn message_with_markup_and_accents_survives() {
        let flash = Flash::error("Cliente <b>obligatorio</b>; añadir ñ");
        let jar = jar_with(&pair(&flash.cookie()));
        assert_eq!(Flash::from_jar(&jar), Some(flash));
    }

    #[test]
    fn missing_or_garbled_cookie() {
        assert_eq!(Flash::from_jar(&CookieJar::new()), None);
        assert_eq!(Flash::from_jar(&jar_with("intake_flash=%%%")), None);
        assert_eq!(Flash::from_jar(&jar_with("intake_flash_other=abc")), None);
        assert_eq!(Flash::from_jar(&jar_with("intake_flash=")), None);
    }

    #[test]
    fn removal_targets_the_same_path() {
        let removal = Flash::removal();
        assert_eq!(removal.name(), COOKIE_NAME);
        assert_eq!(removal.path(), Some("/"));
    }
}

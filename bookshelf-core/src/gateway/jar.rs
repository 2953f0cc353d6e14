//! Cookie jar shared between the transport and application code

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use std::borrow::Cow;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use url::Url;

/// Process-wide cookie state for one client.
///
/// The transport stores and sends cookies through the [`CookieStore`] impl.
/// Application code only reads values, and can drop everything at once after
/// logout. `reqwest`'s own [`Jar`] has no removal, so clearing swaps in a
/// fresh one.
#[derive(Debug, Default)]
pub struct SessionJar {
    inner: RwLock<Jar>,
}

impl SessionJar {
    pub fn new() -> Self {
        Self::default()
    }

    fn jar(&self) -> RwLockReadGuard<'_, Jar> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Value of the named cookie as it would be sent to `url`
    pub fn cookie_value(&self, url: &Url, name: &str) -> Option<String> {
        let header = self.jar().cookies(url)?;
        find_cookie(header.to_str().ok()?, name).map(Cow::into_owned)
    }

    /// All cookies sent to `url`, as `name=value` pairs
    pub fn cookie_pairs(&self, url: &Url) -> Vec<String> {
        self.jar()
            .cookies(url)
            .and_then(|header| header.to_str().ok().map(split_pairs))
            .unwrap_or_default()
    }

    /// Add `name=value` pairs scoped to `url`
    pub fn import<I, S>(&self, url: &Url, pairs: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let jar = self.jar();
        let mut added = 0;
        for pair in pairs {
            let pair = pair.as_ref().trim();
            if pair.contains('=') {
                jar.add_cookie_str(&format!("{}; Path=/", pair), url);
                added += 1;
            }
        }
        added
    }

    /// Forget every cookie
    pub fn clear(&self) {
        let mut jar = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *jar = Jar::default();
    }
}

impl CookieStore for SessionJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.jar().set_cookies(cookie_headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar().cookies(url)
    }
}

/// Find a cookie value in a `Cookie` header string such as `a=1; csrftoken=xyz`.
///
/// The value is percent-decoded (`XSRF-TOKEN=abc%3D%3D` reads as `abc==`).
/// A value that does not decode to UTF-8 is returned as sent. Empty values
/// count as absent.
pub fn find_cookie<'a>(header: &'a str, name: &str) -> Option<Cow<'a, str>> {
    let raw = header
        .split(';')
        .filter_map(|part| part.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())?;
    Some(urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw)))
}

fn split_pairs(header: &str) -> Vec<String> {
    header
        .split(';')
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .map(str::to_string)
        .collect()
}

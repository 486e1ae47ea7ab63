//! Visit metadata extraction from HTTP requests.

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use std::convert::Infallible;
use std::net::SocketAddr;

use crate::domain::visit::VisitContext;

/// Picks the best available description of where a visit came from.
///
/// Checked in order:
/// 1. First hop of `X-Forwarded-For`
/// 2. `X-Real-IP`
/// 3. The peer socket address, if the server exposes it
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
/// assert_eq!(client_location(&headers, None).as_deref(), Some("203.0.113.7"));
/// ```
pub fn client_location(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    forwarded
        .or(real_ip)
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

/// Reads the `Referer` header, ignoring values that are not valid UTF-8.
pub fn referrer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Extractor building a [`VisitContext`] from request headers and, when
/// available, the connection's peer address.
pub struct Visitor(pub VisitContext);

impl<S: Send + Sync> FromRequestParts<S> for Visitor {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(Visitor(VisitContext {
            referrer: referrer(&parts.headers),
            location: client_location(&parts.headers, peer),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        "127.0.0.1:12345".parse().unwrap()
    }

    #[test]
    fn test_location_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));

        assert_eq!(
            client_location(&headers, Some(peer())).as_deref(),
            Some("203.0.113.7")
        );
    }

    #[test]
    fn test_location_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));

        assert_eq!(
            client_location(&headers, Some(peer())).as_deref(),
            Some("198.51.100.2")
        );
    }

    #[test]
    fn test_location_falls_back_to_peer() {
        let headers = HeaderMap::new();
        assert_eq!(
            client_location(&headers, Some(peer())).as_deref(),
            Some("127.0.0.1")
        );
    }

    #[test]
    fn test_location_ipv6_peer() {
        let headers = HeaderMap::new();
        let addr: SocketAddr = "[::1]:8080".parse().unwrap();
        assert_eq!(client_location(&headers, Some(addr)).as_deref(), Some("::1"));
    }

    #[test]
    fn test_location_missing_everything() {
        assert!(client_location(&HeaderMap::new(), None).is_none());
    }

    #[test]
    fn test_location_ignores_empty_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        assert!(client_location(&headers, None).is_none());
    }

    #[test]
    fn test_referrer_present() {
        let mut headers = HeaderMap::new();
        headers.insert(header::REFERER, HeaderValue::from_static("https://google.com"));
        assert_eq!(referrer(&headers).as_deref(), Some("https://google.com"));
    }

    #[test]
    fn test_referrer_invalid_utf8() {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_bytes(&[0xFF, 0xFE]) {
            headers.insert(header::REFERER, value);
            assert!(referrer(&headers).is_none());
        }
    }
}

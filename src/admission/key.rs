use std::fmt::Display;
use std::fmt::Formatter;

/// Identity a bucket is keyed by.
///
/// Proxies append to `X-Forwarded-For`, so the first entry is the original
/// client. Without the header the peer socket address is used.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey(String);

impl ClientKey {
    pub const FORWARDED_FOR: &'static str = "x-forwarded-for";

    pub fn resolve(forwarded: Option<&str>, peer: Option<&str>) -> Self {
        forwarded
            .and_then(|header| header.split(',').next())
            .map(str::trim)
            .filter(|first| !first.is_empty())
            .or(peer)
            .map(|key| Self(key.to_owned()))
            .unwrap_or_else(|| Self(String::from("unknown")))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ClientKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "server")]
impl From<&actix_web::dev::ServiceRequest> for ClientKey {
    fn from(req: &actix_web::dev::ServiceRequest) -> Self {
        let peer = req.peer_addr().map(|addr| addr.ip().to_string());
        Self::resolve(
            req.headers()
                .get(Self::FORWARDED_FOR)
                .and_then(|h| h.to_str().ok()),
            peer.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn first_forwarded_entry_wins() {
        let key = ClientKey::resolve(Some(" 203.0.113.7 , 10.0.0.2"), Some("10.0.0.1"));
        assert_eq!(key.as_str(), "203.0.113.7");
    }
    #[test]
    fn falls_back_to_peer() {
        assert_eq!(ClientKey::resolve(None, Some("10.0.0.1")).as_str(), "10.0.0.1");
        assert_eq!(ClientKey::resolve(Some(""), Some("10.0.0.1")).as_str(), "10.0.0.1");
    }
    #[test]
    fn unknown_without_any_address() {
        assert_eq!(ClientKey::resolve(None, None).as_str(), "unknown");
    }
}

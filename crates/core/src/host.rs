//! Request host normalization and main/admin classification.

/// The two public hostnames the site is served under.
#[derive(Debug, Clone)]
pub struct SiteHosts {
    /// Marketing domain, e.g. `drcodezenna.com`. Its `www.` variant is
    /// treated identically.
    pub main_domain: String,
    /// Admin subdomain, e.g. `admin.drcodezenna.com`.
    pub admin_domain: String,
    /// Scheme used when building absolute redirect targets (`https`).
    pub scheme: String,
}

impl SiteHosts {
    pub fn new(main_domain: &str, admin_domain: &str, scheme: &str) -> Self {
        Self {
            main_domain: main_domain.trim().to_ascii_lowercase(),
            admin_domain: admin_domain.trim().to_ascii_lowercase(),
            scheme: scheme.trim().to_ascii_lowercase(),
        }
    }

    /// `<scheme>://<main>`
    pub fn main_origin(&self) -> String {
        format!("{}://{}", self.scheme, self.main_domain)
    }

    /// `<scheme>://<admin>`
    pub fn admin_origin(&self) -> String {
        format!("{}://{}", self.scheme, self.admin_domain)
    }

    /// Classify an already-normalized host (see [`clean_host`]).
    pub fn classify(&self, host: &str) -> HostClass {
        if host == self.admin_domain {
            HostClass::Admin
        } else if host == self.main_domain
            || host.strip_prefix("www.") == Some(self.main_domain.as_str())
        {
            HostClass::Main
        } else {
            HostClass::Other
        }
    }
}

/// Which public site a request is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostClass {
    Main,
    Admin,
    Other,
}

/// Normalize the host a request was addressed to.
///
/// Prefers the forwarded host, then the `Host` header, then the URI
/// authority. Empty values are skipped. The result is lowercased with any
/// port removed; a proxy chain (`a, b`) contributes its first entry.
pub fn clean_host(
    forwarded_host: Option<&str>,
    host_header: Option<&str>,
    uri_authority: Option<&str>,
) -> String {
    let raw = [forwarded_host, host_header, uri_authority]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or("");

    let first = raw.split(',').next().unwrap_or("").trim();
    strip_port(first).to_ascii_lowercase()
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literal: keep the brackets, drop the port.
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    host.split(':').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts() -> SiteHosts {
        SiteHosts::new("drcodezenna.com", "admin.drcodezenna.com", "https")
    }

    #[test]
    fn forwarded_host_wins_over_host_header() {
        let host = clean_host(
            Some("Admin.DrCodeZenna.com:443"),
            Some("internal:3000"),
            None,
        );
        assert_eq!(host, "admin.drcodezenna.com");
    }

    #[test]
    fn empty_forwarded_host_falls_back_to_host_header() {
        assert_eq!(
            clean_host(Some(""), Some("drcodezenna.com:8080"), None),
            "drcodezenna.com"
        );
    }

    #[test]
    fn falls_back_to_uri_authority_then_empty() {
        assert_eq!(
            clean_host(None, None, Some("www.drcodezenna.com")),
            "www.drcodezenna.com"
        );
        assert_eq!(clean_host(None, None, None), "");
    }

    #[test]
    fn proxy_chain_uses_first_entry() {
        assert_eq!(
            clean_host(Some("admin.drcodezenna.com, edge.internal"), None, None),
            "admin.drcodezenna.com"
        );
    }

    #[test]
    fn ipv6_literal_keeps_brackets() {
        assert_eq!(clean_host(None, Some("[::1]:3000"), None), "[::1]");
    }

    #[test]
    fn classifies_main_www_and_admin() {
        let h = hosts();
        assert_eq!(h.classify("drcodezenna.com"), HostClass::Main);
        assert_eq!(h.classify("www.drcodezenna.com"), HostClass::Main);
        assert_eq!(h.classify("admin.drcodezenna.com"), HostClass::Admin);
        assert_eq!(h.classify("localhost"), HostClass::Other);
        assert_eq!(h.classify("www.admin.drcodezenna.com"), HostClass::Other);
    }

    #[test]
    fn configured_domains_are_normalized() {
        let h = SiteHosts::new(" DrCodeZenna.com ", "ADMIN.drcodezenna.com", "HTTPS");
        assert_eq!(h.main_origin(), "https://drcodezenna.com");
        assert_eq!(h.admin_origin(), "https://admin.drcodezenna.com");
    }
}

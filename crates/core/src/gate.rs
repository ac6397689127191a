//! Host routing and admin access decision table.
//!
//! The gate is split in two so the session cookie is only inspected when it
//! matters:
//!
//! 1. [`route`] looks at the host class and path alone and either settles the
//!    request (pass or canonical-host redirect) or marks it [`Route::Gated`].
//! 2. [`gate`] maps the decoded [`SessionState`] of a gated request to a
//!    final [`Decision`].
//!
//! [`decide`] composes both for callers that already hold a session state.
//! Every function here is pure; the HTTP middleware lives in the API crate.

use url::form_urlencoded;

use crate::host::{HostClass, SiteHosts};
use crate::roles::Role;

/// Path prefix of the admin dashboard.
pub const PROTECTED_PREFIX: &str = "/admin";
/// Sign-in page. Always reachable on the admin host.
pub const SIGNIN_PATH: &str = "/auth/signin";
/// Forbidden page. Always reachable on the admin host.
pub const FORBIDDEN_PATH: &str = "/403";
/// Query parameter carrying the post-sign-in destination.
pub const CALLBACK_PARAM: &str = "callbackUrl";

/// Session token as seen by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No session cookie on the request.
    NoToken,
    /// Signature and expiry checked; carries the decoded role claim.
    Valid(Role),
    /// Cookie present but malformed, expired, or signed with another key.
    Invalid,
}

/// Outcome of the host/path stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Pass,
    RedirectToMain,
    RedirectToAdminRoot,
    /// Admin host, protected path: the session decides.
    Gated,
}

/// Final outcome for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Pass,
    /// 308 to the main domain root.
    RedirectToMain,
    /// 308 to the protected prefix on the admin host.
    RedirectToAdminRoot,
    /// 307 to the sign-in page with a callback to the original URL.
    RedirectToSignIn,
    /// Serve the forbidden page in place, URL unchanged.
    RewriteForbidden,
}

/// `true` for `prefix` itself and anything below it (`prefix/...`).
fn under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub fn is_protected(path: &str) -> bool {
    under(path, PROTECTED_PREFIX)
}

/// Paths that must never be redirected on the admin host.
pub fn is_exempt(path: &str) -> bool {
    under(path, SIGNIN_PATH) || path == FORBIDDEN_PATH
}

/// Paths the gate runs for at all. Anything else bypasses it.
pub fn is_gate_path(path: &str) -> bool {
    path == "/" || is_protected(path) || is_exempt(path)
}

/// Host/path stage of the decision table.
pub fn route(class: HostClass, path: &str) -> Route {
    if !is_gate_path(path) {
        return Route::Pass;
    }

    match class {
        HostClass::Admin if is_exempt(path) => Route::Pass,
        HostClass::Admin if path == "/" => Route::RedirectToAdminRoot,
        HostClass::Admin if is_protected(path) => Route::Gated,
        HostClass::Main if is_protected(path) => Route::RedirectToMain,
        _ => Route::Pass,
    }
}

/// Session stage of the decision table.
///
/// An invalid token is handled exactly like a missing one.
pub fn gate(session: &SessionState) -> Decision {
    match session {
        SessionState::NoToken | SessionState::Invalid => Decision::RedirectToSignIn,
        SessionState::Valid(role) if role.is_admin() => Decision::Pass,
        SessionState::Valid(_) => Decision::RewriteForbidden,
    }
}

/// Full decision for a request whose session state is already known.
pub fn decide(class: HostClass, path: &str, session: &SessionState) -> Decision {
    match route(class, path) {
        Route::Pass => Decision::Pass,
        Route::RedirectToMain => Decision::RedirectToMain,
        Route::RedirectToAdminRoot => Decision::RedirectToAdminRoot,
        Route::Gated => gate(session),
    }
}

/// Absolute URL of the request as the browser addressed it on the admin host.
pub fn admin_request_url(hosts: &SiteHosts, path: &str, query: Option<&str>) -> String {
    match query.filter(|q| !q.is_empty()) {
        Some(q) => format!("{}{path}?{q}", hosts.admin_origin()),
        None => format!("{}{path}", hosts.admin_origin()),
    }
}

/// Sign-in URL whose callback returns the user to `return_to`.
pub fn signin_url(hosts: &SiteHosts, return_to: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(return_to.as_bytes()).collect();
    format!(
        "{}{SIGNIN_PATH}?{CALLBACK_PARAM}={encoded}",
        hosts.admin_origin()
    )
}

/// `Location` for redirect decisions; `None` for pass and rewrite.
pub fn redirect_location(
    decision: Decision,
    hosts: &SiteHosts,
    path: &str,
    query: Option<&str>,
) -> Option<String> {
    match decision {
        Decision::RedirectToMain => Some(format!("{}/", hosts.main_origin())),
        Decision::RedirectToAdminRoot => {
            Some(format!("{}{PROTECTED_PREFIX}", hosts.admin_origin()))
        }
        Decision::RedirectToSignIn => Some(signin_url(
            hosts,
            &admin_request_url(hosts, path, query),
        )),
        Decision::Pass | Decision::RewriteForbidden => None,
    }
}

/// Resolve a post-sign-in callback to a safe destination on the admin host.
///
/// Accepts absolute URLs on the admin origin and local absolute paths;
/// anything else (other hosts, protocol-relative `//x`, garbage) falls back
/// to the dashboard root.
pub fn safe_callback(hosts: &SiteHosts, callback: Option<&str>) -> String {
    let fallback = format!("{}{PROTECTED_PREFIX}", hosts.admin_origin());
    let Some(cb) = callback.map(str::trim).filter(|c| !c.is_empty()) else {
        return fallback;
    };

    if cb.starts_with('/') && !cb.starts_with("//") && !cb.starts_with("/\\") {
        return format!("{}{cb}", hosts.admin_origin());
    }

    match url::Url::parse(cb) {
        Ok(parsed)
            if parsed.scheme() == hosts.scheme
                && parsed.host_str() == Some(hosts.admin_domain.as_str())
                && parsed.port().is_none() =>
        {
            parsed.to_string()
        }
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn hosts() -> SiteHosts {
        SiteHosts::new("drcodezenna.com", "admin.drcodezenna.com", "https")
    }

    fn admin() -> SessionState {
        SessionState::Valid(Role::Admin)
    }

    #[test]
    fn protected_prefix_is_segment_aware() {
        assert!(is_protected("/admin"));
        assert!(is_protected("/admin/"));
        assert!(is_protected("/admin/posts/12"));
        assert!(!is_protected("/administrator"));
        assert!(!is_protected("/blog/admin"));
    }

    #[test]
    fn main_and_www_redirect_every_protected_path() {
        for path in ["/admin", "/admin/", "/admin/posts", "/admin/a/b/c"] {
            for session in [SessionState::NoToken, SessionState::Invalid, admin()] {
                assert_eq!(
                    decide(HostClass::Main, path, &session),
                    Decision::RedirectToMain
                );
            }
        }
    }

    #[test]
    fn admin_root_redirects_to_dashboard() {
        assert_eq!(route(HostClass::Admin, "/"), Route::RedirectToAdminRoot);
        assert_eq!(
            decide(HostClass::Admin, "/", &SessionState::NoToken),
            Decision::RedirectToAdminRoot
        );
    }

    #[test]
    fn exempt_paths_pass_on_admin_host() {
        for path in ["/auth/signin", "/auth/signin/error", "/403"] {
            assert_eq!(route(HostClass::Admin, path), Route::Pass);
        }
        assert_eq!(route(HostClass::Admin, "/403/extra"), Route::Pass);
    }

    #[test]
    fn unmatched_paths_bypass_the_gate() {
        assert_eq!(route(HostClass::Admin, "/blog"), Route::Pass);
        assert_eq!(route(HostClass::Admin, "/api/v1/blog"), Route::Pass);
        assert_eq!(route(HostClass::Main, "/"), Route::Pass);
        assert_eq!(route(HostClass::Other, "/admin"), Route::Pass);
    }

    #[test]
    fn gate_outcomes_per_session_state() {
        assert_eq!(gate(&SessionState::NoToken), Decision::RedirectToSignIn);
        assert_eq!(gate(&SessionState::Invalid), Decision::RedirectToSignIn);
        assert_eq!(gate(&admin()), Decision::Pass);
        assert_eq!(
            gate(&SessionState::Valid(Role::Other("user".into()))),
            Decision::RewriteForbidden
        );
        assert_eq!(
            gate(&SessionState::Valid(Role::Missing)),
            Decision::RewriteForbidden
        );
    }

    #[test]
    fn decision_is_stable_across_repeated_calls() {
        let session = SessionState::Valid(Role::Other("user".into()));
        let first = decide(HostClass::Admin, "/admin/posts", &session);
        let second = decide(HostClass::Admin, "/admin/posts", &session);
        assert_eq!(first, second);
        assert_matches!(first, Decision::RewriteForbidden);
    }

    #[test]
    fn signin_location_encodes_original_url() {
        let location =
            redirect_location(Decision::RedirectToSignIn, &hosts(), "/admin", None).unwrap();
        assert_eq!(
            location,
            "https://admin.drcodezenna.com/auth/signin?callbackUrl=https%3A%2F%2Fadmin.drcodezenna.com%2Fadmin"
        );
    }

    #[test]
    fn signin_callback_keeps_query_string() {
        let location = redirect_location(
            Decision::RedirectToSignIn,
            &hosts(),
            "/admin/posts",
            Some("page=2&q=a b"),
        )
        .unwrap();
        let (_, encoded) = location.split_once("callbackUrl=").unwrap();
        let decoded: String = form_urlencoded::parse(format!("x={encoded}").as_bytes())
            .next()
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(
            decoded,
            "https://admin.drcodezenna.com/admin/posts?page=2&q=a b"
        );
    }

    #[test]
    fn canonical_redirect_locations() {
        let h = hosts();
        assert_eq!(
            redirect_location(Decision::RedirectToMain, &h, "/admin/posts", None).as_deref(),
            Some("https://drcodezenna.com/")
        );
        assert_eq!(
            redirect_location(Decision::RedirectToAdminRoot, &h, "/", None).as_deref(),
            Some("https://admin.drcodezenna.com/admin")
        );
        assert_eq!(redirect_location(Decision::Pass, &h, "/admin", None), None);
        assert_eq!(
            redirect_location(Decision::RewriteForbidden, &h, "/admin", None),
            None
        );
    }

    #[test]
    fn safe_callback_accepts_admin_origin_and_local_paths() {
        let h = hosts();
        assert_eq!(
            safe_callback(&h, Some("https://admin.drcodezenna.com/admin/posts?x=1")),
            "https://admin.drcodezenna.com/admin/posts?x=1"
        );
        assert_eq!(
            safe_callback(&h, Some("/admin/subscribers")),
            "https://admin.drcodezenna.com/admin/subscribers"
        );
    }

    #[test]
    fn safe_callback_rejects_foreign_destinations() {
        let h = hosts();
        let fallback = "https://admin.drcodezenna.com/admin";
        assert_eq!(safe_callback(&h, Some("https://evil.example/admin")), fallback);
        assert_eq!(safe_callback(&h, Some("//evil.example/admin")), fallback);
        assert_eq!(safe_callback(&h, Some("http://admin.drcodezenna.com/admin")), fallback);
        assert_eq!(safe_callback(&h, Some("not a url")), fallback);
        assert_eq!(safe_callback(&h, None), fallback);
    }
}

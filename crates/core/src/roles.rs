//! Role names carried in session tokens.

/// The only role allowed through the admin gate.
pub const ROLE_ADMIN: &str = "admin";

/// Role decoded from a session token's `role` claim.
///
/// The claim is untrusted input: anything other than the exact string
/// `"admin"` (including an absent claim) is kept as a non-admin variant so
/// callers must match on it explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    Other(String),
    Missing,
}

impl Role {
    /// Interpret a raw `role` claim.
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some(ROLE_ADMIN) => Role::Admin,
            Some(other) => Role::Other(other.to_string()),
            None => Role::Missing,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Claim string to embed when issuing a token for this role.
    pub fn as_claim(&self) -> Option<&str> {
        match self {
            Role::Admin => Some(ROLE_ADMIN),
            Role::Other(name) => Some(name),
            Role::Missing => None,
        }
    }
}

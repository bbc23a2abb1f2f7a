//! Identity-to-role lookup and role capabilities.
//!
//! This is a config lookup, not an authentication system: exact plaintext
//! match, no hashing, no sessions, no expiry. The user list is injected
//! from configuration so no credential ever lives in code.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What an authenticated identity may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full control: add products, receive and dispatch stock.
    Owner,
    /// Floor staff: dispatch only.
    User,
}

impl Role {
    pub fn can_add_products(self) -> bool {
        matches!(self, Role::Owner)
    }

    pub fn can_receive_stock(self) -> bool {
        matches!(self, Role::Owner)
    }

    /// Everyone may dispatch; viewing, search, and export are always open.
    pub fn can_dispatch_stock(self) -> bool {
        true
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Owner => write!(f, "owner"),
            Role::User => write!(f, "user"),
        }
    }
}

/// One configured identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntry {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// The injected identity→role mapping.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    users: Vec<UserEntry>,
}

impl AccessPolicy {
    pub fn new(users: Vec<UserEntry>) -> Self {
        Self { users }
    }

    /// Grant a role on exact username/password match.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<Role> {
        self.users
            .iter()
            .find(|user| user.username == username && user.password == password)
            .map(|user| user.role)
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> AccessPolicy {
        AccessPolicy::new(vec![
            UserEntry {
                username: "meera".to_string(),
                password: "shop-owner".to_string(),
                role: Role::Owner,
            },
            UserEntry {
                username: "dev".to_string(),
                password: "floor".to_string(),
                role: Role::User,
            },
        ])
    }

    #[test]
    fn test_exact_match_grants_the_configured_role() {
        assert_eq!(policy().authenticate("meera", "shop-owner"), Some(Role::Owner));
        assert_eq!(policy().authenticate("dev", "floor"), Some(Role::User));
    }

    #[test]
    fn test_wrong_password_or_unknown_user_grants_nothing() {
        assert_eq!(policy().authenticate("meera", "floor"), None);
        assert_eq!(policy().authenticate("nobody", "shop-owner"), None);
        // Case matters: this is an exact lookup
        assert_eq!(policy().authenticate("Meera", "shop-owner"), None);
    }

    #[test]
    fn test_role_capabilities() {
        assert!(Role::Owner.can_add_products());
        assert!(Role::Owner.can_receive_stock());
        assert!(Role::Owner.can_dispatch_stock());

        assert!(!Role::User.can_add_products());
        assert!(!Role::User.can_receive_stock());
        assert!(Role::User.can_dispatch_stock());
    }
}

/// Actor identity and the authorization predicate
///
/// An [`Actor`] is the authenticated identity behind a request: a user id and
/// a role, derived from a verified session token. It lives only for the
/// request that produced it and is never persisted.
///
/// The single authorization rule of the system lives here as well: an actor
/// may access or mutate a resource owned by user `U` iff it *is* `U` or it is
/// an admin. The predicate itself is a pure function; repositories fold the
/// equivalent condition into their SQL filters so that the check and the data
/// access happen in one atomic statement.
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::{Actor, Role};
///
/// let owner = Actor::new(7, Role::Member);
/// let admin = Actor::new(1, Role::Admin);
/// let stranger = Actor::new(8, Role::Member);
///
/// assert!(owner.authorizes(7));
/// assert!(admin.authorizes(7));
/// assert!(!stranger.authorizes(7));
/// ```

use serde::{Deserialize, Serialize};

/// User role
///
/// Stored in Postgres as the `user_role` enum. `Member` is the sign-up
/// default; role transitions happen only through the dedicated admin-gated
/// role-update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular user; may only act on resources they own
    Member,

    /// Administrator; may act on any user's resources
    Admin,
}

impl Role {
    /// Role as its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
        }
    }

    /// Parses a role from its string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "member" => Some(Role::Member),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// The authenticated identity making a request
///
/// Constructed by the request authenticator from a verified token and
/// attached to the request's extensions; never mutated afterward and never
/// shared across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// User id of the caller
    pub id: i64,

    /// Role of the caller
    pub role: Role,
}

impl Actor {
    /// Creates an actor from an id and role
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    /// Whether this actor holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The owner-or-admin rule: may this actor access a resource owned by
    /// `owner_id`?
    ///
    /// Repositories express the same condition as a SQL filter
    /// (`owner = actor_id OR actor_role = 'admin'`); this function is the
    /// reference form used for reasoning and tests.
    pub fn authorizes(&self, owner_id: i64) -> bool {
        self.id == owner_id || self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Member.as_str(), "member");
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("member"), Some(Role::Member));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("root"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("Admin"), None);
    }

    #[test]
    fn test_owner_may_access_own_resource() {
        let actor = Actor::new(42, Role::Member);
        assert!(actor.authorizes(42));
        assert!(!actor.authorizes(43));
    }

    #[test]
    fn test_admin_may_access_any_resource() {
        let actor = Actor::new(1, Role::Admin);
        assert!(actor.authorizes(1));
        assert!(actor.authorizes(999));
    }

    proptest! {
        /// The predicate holds exactly when the actor owns the resource or is
        /// an admin, for arbitrary (actor, owner, role) triples.
        #[test]
        fn prop_authorizes_is_owner_or_admin(
            actor_id in 1i64..10_000,
            owner_id in 1i64..10_000,
            is_admin in any::<bool>(),
        ) {
            let role = if is_admin { Role::Admin } else { Role::Member };
            let actor = Actor::new(actor_id, role);

            prop_assert_eq!(
                actor.authorizes(owner_id),
                actor_id == owner_id || is_admin
            );
        }
    }
}

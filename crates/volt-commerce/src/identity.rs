//! Request identity.
//!
//! Every cart operation acts on behalf of a resolved identity: either a
//! signed-in user or a guest carrying a session token. The enum makes
//! "exactly one of the two" structural; the session layer that mints
//! tokens for fresh guests lives outside this crate.

use crate::ids::{SessionToken, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The identity a request acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identity {
    /// A signed-in user.
    User(UserId),
    /// A guest identified by an opaque session token.
    Guest(SessionToken),
}

impl Identity {
    /// The user ID, when the identity is a signed-in user.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Identity::User(id) => Some(id),
            Identity::Guest(_) => None,
        }
    }

    /// Whether this identity is an anonymous guest.
    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest(_))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::User(id) => write!(f, "user:{id}"),
            Identity::Guest(token) => write!(f, "guest:{token}"),
        }
    }
}

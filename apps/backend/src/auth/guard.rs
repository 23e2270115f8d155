//! Owner-or-admin gate for recipe mutations.

use uuid::Uuid;

use super::claims::IdentityClaims;

/// Mutations that require ownership. Create and read never reach the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerOp {
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Deny,
}

impl Decision {
    pub fn is_permitted(self) -> bool {
        matches!(self, Decision::Permit)
    }
}

/// Permit iff the caller is an admin or the recipe's author.
///
/// The operation is part of the signature so call sites name what they are
/// gating; it does not change the outcome.
pub fn authorize(claims: &IdentityClaims, owner: Uuid, _op: OwnerOp) -> Decision {
    if claims.is_admin() || claims.sub == owner {
        Decision::Permit
    } else {
        Decision::Deny
    }
}

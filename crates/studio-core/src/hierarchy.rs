//! Ordered role hierarchy and rank derivation.

use std::fmt;

use crate::{Error, Result, Role};

/// Ordinal position of a role inside a [`RoleHierarchy`].
///
/// Ranks are derived when a decision is made and are never persisted or sent
/// over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(u8);

impl Rank {
    /// Returns the numeric value of this rank.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable ordering of every [`Role`], lowest privilege first.
///
/// The last role of the ordering is the supreme role: it is exempt from rank
/// checks when assigning roles or deleting accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleHierarchy {
    order: [Role; Role::COUNT],
}

impl RoleHierarchy {
    /// Creates a hierarchy from an explicit ordering.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidHierarchy`] unless `order` lists every role
    /// exactly once.
    ///
    /// [`ErrorKind::InvalidHierarchy`]: crate::ErrorKind::InvalidHierarchy
    pub fn new(order: &[Role]) -> Result<Self> {
        if order.len() != Role::COUNT {
            return Err(Error::invalid_hierarchy(format!(
                "expected {} roles, got {}",
                Role::COUNT,
                order.len()
            )));
        }

        for role in Role::ALL {
            let occurrences = order.iter().filter(|r| **r == role).count();
            if occurrences != 1 {
                return Err(Error::invalid_hierarchy(format!(
                    "role '{role}' appears {occurrences} times"
                )));
            }
        }

        let mut fixed = Role::ALL;
        fixed.copy_from_slice(order);
        Ok(Self { order: fixed })
    }

    /// Returns the rank of `role`.
    pub fn rank(&self, role: Role) -> Rank {
        let position = self
            .order
            .iter()
            .position(|r| *r == role)
            .unwrap_or_default();

        Rank(position as u8)
    }

    /// Returns the role with the highest rank.
    #[inline]
    pub fn supreme(&self) -> Role {
        self.order[self.order.len() - 1]
    }

    /// Returns whether `role` is the role with the highest rank.
    #[inline]
    pub fn is_supreme(&self, role: Role) -> bool {
        role == self.supreme()
    }

    /// Returns whether `role` ranks strictly above `other`.
    #[inline]
    pub fn outranks(&self, role: Role, other: Role) -> bool {
        self.rank(role) > self.rank(other)
    }

    /// Returns whether `role` ranks at or above `minimum`.
    #[inline]
    pub fn is_at_least(&self, role: Role, minimum: Role) -> bool {
        self.rank(role) >= self.rank(minimum)
    }

    /// Iterates roles from the lowest to the highest rank.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.order.iter().copied()
    }
}

impl Default for RoleHierarchy {
    /// `user < dev_tester < developer < staff < admin < ceo`.
    fn default() -> Self {
        Self { order: Role::ALL }
    }
}

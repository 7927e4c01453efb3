// SPDX-License-Identifier: MPL-2.0
//! Opaque identity newtypes backed by random UUIDs.

use serde::{Deserialize, Serialize};

macro_rules! impl_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(uuid::Uuid);

            impl $name {
                /// Generates a fresh identity.
                #[must_use]
                pub fn new() -> Self {
                    Self(uuid::Uuid::new_v4())
                }

                #[must_use]
                pub fn as_uuid(&self) -> uuid::Uuid {
                    self.0
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl std::str::FromStr for $name {
                type Err = uuid::Error;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    uuid::Uuid::parse_str(s).map(Self)
                }
            }
        )*
    };
}

impl_id! {
    /// Identity of an entry in a reorderable media list.
    MediaId,
    /// Identity of a catalog collection.
    CollectionId,
    /// Identity of an admin invitation.
    InvitationId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_unique() {
        let a = MediaId::new();
        let b = MediaId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn display_and_parse_round_trip() {
        let id = CollectionId::new();
        let parsed: CollectionId = id.to_string().parse().expect("valid uuid");
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<InvitationId>().is_err());
    }
}

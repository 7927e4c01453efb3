// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration for application navigation.

/// Screens the user can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Storefront,
    Dashboard,
    CollectionForm,
    Invitations,
    Signup,
}

impl Screen {
    /// Screens that need an admin context.
    #[must_use]
    pub fn requires_admin(self) -> bool {
        matches!(
            self,
            Screen::Dashboard | Screen::CollectionForm | Screen::Invitations
        )
    }
}

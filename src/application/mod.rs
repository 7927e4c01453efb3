// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`inquiry`]: Messaging deep link offered to shoppers
//! - [`upload`]: Unique object names and media kind detection for uploads
//! - [`signup`]: Invitation redemption into an admin account
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer uses application layer services
//!
//! # Example
//!
//! ```ignore
//! use boutique_showcase::application::port::CatalogStore;
//! use boutique_showcase::infrastructure::catalog::TomlCatalogStore;
//!
//! let store = TomlCatalogStore::new(data_dir.join("catalog.toml"));
//! let newest_first = store.list()?;
//! ```

pub mod inquiry;
pub mod port;
pub mod signup;
pub mod upload;

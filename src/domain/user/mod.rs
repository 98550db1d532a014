//! User domain
//!
//! Canonical user record, filter request, write-side inputs and the
//! directory access trait.

mod entity;
mod filter;
mod repository;

pub use entity::{DirectoryUser, NewUser, UserUpdate};
pub use filter::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, UserFilter};
pub use repository::UserDirectory;

#[cfg(test)]
pub use repository::MockUserDirectory;

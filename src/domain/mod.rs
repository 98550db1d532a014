//! Domain layer - canonical types and traits for the user directory

mod error;
pub mod user;

pub use error::DirectoryError;
pub use user::{DirectoryUser, NewUser, UserDirectory, UserFilter, UserUpdate};

#[cfg(test)]
pub use user::MockUserDirectory;

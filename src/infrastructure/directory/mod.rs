//! Directory query core: predicate compilation, pagination, attribute
//! normalization and the service facade over the two backing sources.

mod attributes;
mod query;
mod replica;
mod service;

pub use attributes::{ATTR_COUNTRY, ATTR_PHONE, ATTR_PHOTO, UserAttributes};
pub use query::{SqlParam, compile_filter, paginate, rebind};
pub use replica::{PostgresReplica, ReplicaRow, map_rows};
pub use service::DirectoryService;

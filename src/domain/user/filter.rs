//! Filter request for listing directory users

use serde::Deserialize;

/// Default page number applied when the caller leaves the page unset.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size applied when the caller leaves the size unset.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Structured filter for list queries.
///
/// Each optional predicate compiles into exactly one `AND` condition, in the
/// fixed order role, first name, last name, email, enabled. The `enabled`
/// predicate is an explicit tri-state: `None` does not filter at all, while
/// `Some(true)` / `Some(false)` both produce a predicate. Page numbers are
/// 1-based; zero means "unset" and is replaced by the defaults during
/// normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserFilter {
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub enabled: Option<bool>,
    pub page: u32,
    pub size: u32,
}

impl UserFilter {
    /// Replace unset page/size with the defaults, in place, so downstream
    /// response metadata reflects the effective values used.
    pub fn normalize(&mut self) {
        if self.page == 0 {
            self.page = DEFAULT_PAGE;
        }
        if self.size == 0 {
            self.size = DEFAULT_PAGE_SIZE;
        }
    }

    /// Row offset for the normalized page, `(page - 1) * size`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.size)
    }
}

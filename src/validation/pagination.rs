//! Normalization of caller-supplied paging inputs.

use crate::db::Page;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Clamp raw page/limit values into a usable [`Page`].
///
/// Missing or non-positive `page` becomes 1. Missing or non-positive `limit`
/// becomes the default of 10; larger values are capped at 100.
pub fn normalize_pagination(page: Option<i64>, limit: Option<i64>) -> Page {
    let number = match page {
        Some(p) if p >= 1 => u32::try_from(p).unwrap_or(u32::MAX),
        _ => DEFAULT_PAGE,
    };
    let limit = match limit {
        Some(l) if l >= 1 => u32::try_from(l).unwrap_or(MAX_LIMIT).min(MAX_LIMIT),
        _ => DEFAULT_LIMIT,
    };
    Page { number, limit }
}

//! Query types for pagination, sorting and search.
//!
//! Sort column and direction are closed enums. Caller-supplied strings are
//! resolved against a fixed whitelist here, so only the static column names
//! and keywords below can ever reach an ORDER BY clause.

/// Whitelisted sort columns for user listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Name,
    Email,
    #[default]
    CreatedAt,
    ApplicationId,
}

impl SortField {
    /// Resolve a requested sort key. Unknown or missing keys fall back to `created_at`.
    pub fn resolve(requested: Option<&str>) -> Self {
        match requested {
            Some("name") => SortField::Name,
            Some("email") => SortField::Email,
            Some("created_at") => SortField::CreatedAt,
            Some("aadhaar_application_id") => SortField::ApplicationId,
            _ => SortField::default(),
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::CreatedAt => "created_at",
            SortField::ApplicationId => "aadhaar_application_id",
        }
    }
}

/// Sort order for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Resolve a requested order, case-insensitively. Anything unrecognised is descending.
    pub fn resolve(requested: Option<&str>) -> Self {
        match requested.map(str::to_ascii_lowercase).as_deref() {
            Some("asc") | Some("ascending") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// A normalized page request. `number` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub limit: u32,
}

impl Page {
    /// Rows to skip: `(number - 1) * limit`.
    pub fn offset(&self) -> u64 {
        u64::from(self.number.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Number of pages needed for `total` rows; zero rows means zero pages.
    pub fn total_pages(&self, total: u64) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        total.div_ceil(u64::from(self.limit))
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            limit: 10,
        }
    }
}

/// Query for users - pagination + sort + optional search.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub page: Page,
    pub sort_by: SortField,
    pub order: SortOrder,
    /// Case-insensitive substring matched against name, email or application ID.
    pub search: Option<String>,
}

impl UserQuery {
    /// Build a query from raw sort inputs, resolving them through the whitelists.
    pub fn new(page: Page, sort_by: Option<&str>, order: Option<&str>, search: Option<&str>) -> Self {
        Self {
            page,
            sort_by: SortField::resolve(sort_by),
            order: SortOrder::resolve(order),
            search: search
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
        }
    }
}

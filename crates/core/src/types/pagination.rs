//! Vendor list query state and server-driven pagination.

use serde::{Deserialize, Serialize};

/// Page size used when none is requested.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Page metadata returned by the backend. Trusted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            total: 0,
            pages: 0,
        }
    }
}

impl Pagination {
    /// Prev is disabled on the first page.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Next is disabled on (or past) the last page the server reported.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

/// Vendor status filter. `All` sends no `status` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorStatusFilter {
    #[default]
    All,
    Approved,
    Pending,
    Suspended,
}

impl VendorStatusFilter {
    pub const ALL: [Self; 4] = [Self::All, Self::Approved, Self::Pending, Self::Suspended];

    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Suspended => "suspended",
        }
    }

    /// Tab label. Approved vendors are shown as "Active".
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Approved => "Active",
            Self::Pending => "Pending",
            Self::Suspended => "Suspended",
        }
    }
}

impl std::str::FromStr for VendorStatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s.trim())
            .ok_or_else(|| format!("invalid status filter: {s}"))
    }
}

/// What the vendor list is currently showing.
///
/// Changing the search term or the status filter always returns to page 1;
/// moving between pages keeps both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorListQuery {
    pub page: u32,
    pub limit: u32,
    pub status: VendorStatusFilter,
    pub search: String,
}

impl Default for VendorListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            status: VendorStatusFilter::All,
            search: String::new(),
        }
    }
}

impl VendorListQuery {
    /// Build from raw request values, falling back to defaults for zero pages
    /// or limits.
    #[must_use]
    pub fn new(
        page: Option<u32>,
        limit: Option<u32>,
        status: VendorStatusFilter,
        search: Option<&str>,
    ) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(1),
            limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_PAGE_LIMIT),
            status,
            search: search.map(str::trim).unwrap_or_default().to_owned(),
        }
    }

    #[must_use]
    pub fn with_search(&self, search: &str) -> Self {
        Self {
            page: 1,
            search: search.trim().to_owned(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_status(&self, status: VendorStatusFilter) -> Self {
        Self {
            page: 1,
            status,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// The next page, if the server reported one.
    #[must_use]
    pub fn next_page(&self, pagination: &Pagination) -> Option<Self> {
        pagination
            .has_next()
            .then(|| self.with_page(pagination.page + 1))
    }

    /// The previous page, unless already on the first.
    #[must_use]
    pub fn previous_page(&self, pagination: &Pagination) -> Option<Self> {
        pagination
            .has_previous()
            .then(|| self.with_page(pagination.page - 1))
    }

    /// Backend query parameters. `status` and `search` are omitted when unset.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if self.status != VendorStatusFilter::All {
            pairs.push(("status", self.status.as_str().to_owned()));
        }
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        pairs
    }
}

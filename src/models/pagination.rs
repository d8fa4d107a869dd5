use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Query string of every gateway list page.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

impl PaginationParams {
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page,
            per_page,
            search: None,
        }
    }

    pub fn get_page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn get_per_page(&self, default: u32) -> u32 {
        self.per_page.unwrap_or(default).clamp(1, 100)
    }

    pub fn get_search(&self) -> &str {
        self.search.as_deref().map(str::trim).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationInfo {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl PaginationInfo {
    /// `total_pages = ceil(total / per_page)`, never less than one.
    pub fn new(current_page: u32, per_page: u32, total: u64) -> Self {
        Self {
            current_page,
            per_page,
            total,
            total_pages: total_pages(total, per_page),
        }
    }
}

pub fn total_pages(total: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    total.div_ceil(per_page).max(1) as u32
}

/// One rendered row: serial number (reset per page) plus the record.
#[derive(Debug, Clone, Serialize)]
pub struct Row<T> {
    pub serial: usize,
    #[serde(flatten)]
    pub item: T,
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<Row<T>>,
    pub pagination: PaginationInfo,
}

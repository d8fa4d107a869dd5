use serde::Serialize;

use crate::models::{PaginationInfo, total_pages};

/// Page position owned by a list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    pub items_per_page: u32,
    pub total_items: u64,
}

impl PageState {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_items: 0,
        }
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_items, self.items_per_page)
    }

    pub fn set_page(&mut self, page: u32) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    /// Changing the page size always goes back to page one.
    pub fn set_items_per_page(&mut self, items_per_page: u32) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
    }

    pub fn info(&self) -> PaginationInfo {
        PaginationInfo::new(self.current_page, self.items_per_page, self.total_items)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationEvent {
    PageChange(u32),
    ItemsPerPageChange(u32),
}

/// The pagination bar. A view over numbers the page already computed; its
/// only own state is whether the page-size dropdown is open.
#[derive(Debug, Clone, Serialize)]
pub struct PaginationControl {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
    pub items_per_page_options: Vec<u32>,
    pub dropdown_open: bool,
}

impl PaginationControl {
    pub fn new(state: &PageState, options: &[u32]) -> Self {
        Self {
            current_page: state.current_page,
            total_pages: state.total_pages(),
            total_items: state.total_items,
            items_per_page: state.items_per_page,
            items_per_page_options: options.to_vec(),
            dropdown_open: false,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn click_page(&self, page: u32) -> Option<PaginationEvent> {
        let page = page.clamp(1, self.total_pages);
        (page != self.current_page).then_some(PaginationEvent::PageChange(page))
    }

    pub fn previous(&self) -> Option<PaginationEvent> {
        self.has_previous()
            .then(|| PaginationEvent::PageChange(self.current_page - 1))
    }

    pub fn next(&self) -> Option<PaginationEvent> {
        self.has_next()
            .then(|| PaginationEvent::PageChange(self.current_page + 1))
    }

    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
    }

    /// Picking a size closes the dropdown; sizes not offered are ignored.
    pub fn choose_items_per_page(&mut self, size: u32) -> Option<PaginationEvent> {
        self.dropdown_open = false;
        if !self.items_per_page_options.contains(&size) || size == self.items_per_page {
            return None;
        }
        Some(PaginationEvent::ItemsPerPageChange(size))
    }

    /// Page buttons to show: at most `width` numbers centred on the current page.
    pub fn visible_pages(&self, width: u32) -> Vec<u32> {
        let width = width.max(1).min(self.total_pages);
        let half = width / 2;
        let start = self
            .current_page
            .saturating_sub(half)
            .max(1)
            .min(self.total_pages - width + 1);
        (start..start + width).collect()
    }

    /// 1-based inclusive item range on the current page, `(0, 0)` when empty.
    pub fn showing_range(&self) -> (u64, u64) {
        if self.total_items == 0 {
            return (0, 0);
        }
        let per_page = u64::from(self.items_per_page);
        let first = u64::from(self.current_page - 1) * per_page + 1;
        let last = (first + per_page - 1).min(self.total_items);
        (first, last)
    }

    pub fn range_label(&self) -> String {
        let (first, last) = self.showing_range();
        format!("Showing {first}-{last} of {}", self.total_items)
    }
}

//! Controller behind every CRUD list page.
//!
//! One `ListPage<R, B>` owns the loaded rows, pagination, search term and the
//! two dialogs for resource `R`, and talks to the backend only through
//! [`ResourceBackend`]. Failures are turned into toasts; the page never loses
//! rows or form input because a call failed.

use serde::Serialize;

use crate::config::DashboardConfig;
use crate::dashboard::dialog::{ConfirmDialog, FormDialog, FormMode};
use crate::dashboard::pagination::{PageState, PaginationControl, PaginationEvent};
use crate::dashboard::search::{Debouncer, Ticket, filter_loaded};
use crate::dashboard::toast::{Notifier, ToastQueue};
use crate::error::{AppError, AppResult};
use crate::external::{Ack, ListQuery, Resource, ResourceBackend};
use crate::models::{PaginatedResponse, PaginationInfo, Row};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PendingAction {
    Delete { id: String },
    Toggle { id: String, active: bool },
}

/// A search refetch waiting for input to settle.
#[must_use]
#[derive(Debug)]
pub struct SearchFetch {
    ticket: Option<Ticket>,
}

pub struct ListPage<R: Resource, B> {
    backend: B,
    items: Vec<R::Item>,
    page: PageState,
    page_size_options: Vec<u32>,
    search: String,
    debouncer: Option<Debouncer>,
    form: FormDialog<R::Form>,
    confirm: ConfirmDialog<PendingAction>,
    toasts: ToastQueue,
}

impl<R: Resource, B: ResourceBackend<R>> ListPage<R, B> {
    pub fn new(backend: B, config: &DashboardConfig) -> Self {
        Self {
            backend,
            items: Vec::new(),
            page: PageState::new(config.default_page_size),
            page_size_options: config.page_size_options.clone(),
            search: String::new(),
            debouncer: Debouncer::for_resource::<R>(config),
            form: FormDialog::Closed,
            confirm: ConfirmDialog::default(),
            toasts: ToastQueue::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.page.total_items
    }

    pub fn page_state(&self) -> &PageState {
        &self.page
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn form(&self) -> &FormDialog<R::Form> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormDialog<R::Form> {
        &mut self.form
    }

    pub fn confirm_dialog(&self) -> &ConfirmDialog<PendingAction> {
        &self.confirm
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    /// Positions the page without a round trip, e.g. from a query string.
    /// The page number is not clamped until the total is known.
    pub fn seek(&mut self, page: u32, items_per_page: u32, search: &str) {
        self.page.items_per_page = items_per_page.max(1);
        self.page.current_page = page.max(1);
        self.search = search.trim().to_string();
    }

    fn query(&self) -> ListQuery {
        ListQuery::new(self.page.current_page, self.page.items_per_page).with_search(&self.search)
    }

    /// Fetches the current page. On failure the previous rows stay.
    pub async fn load(&mut self) -> AppResult<()> {
        match self.backend.list(&self.query()).await {
            Ok(listing) => {
                log::debug!(
                    "Loaded {} {} rows (total {})",
                    listing.data.len(),
                    R::SLUG,
                    listing.total
                );
                self.items = listing.data;
                self.page.total_items = listing.total;
                Ok(())
            }
            Err(e) => {
                self.toasts.error(e.toast_message());
                Err(e)
            }
        }
    }

    /// One keystroke in the search box. Records the term and, on
    /// server-searched pages, hands back the fetch it schedules. A later
    /// keystroke supersedes that fetch.
    pub fn type_search(&mut self, term: &str) -> Option<SearchFetch> {
        self.search = term.trim().to_string();
        R::SERVER_SEARCH.then(|| SearchFetch {
            ticket: self.debouncer.as_ref().map(Debouncer::input),
        })
    }

    /// Runs a scheduled search once input settles: back to page one, then
    /// refetch. `Ok(false)` when a newer keystroke took over; nothing is
    /// fetched then.
    pub async fn run_search(&mut self, fetch: SearchFetch) -> AppResult<bool> {
        if let Some(ticket) = fetch.ticket
            && !ticket.settled().await
        {
            log::debug!("Superseded {} search skipped", R::SLUG);
            return Ok(false);
        }
        self.page.current_page = 1;
        self.load().await?;
        Ok(true)
    }

    /// Updates the search term. Server-searched pages restart at page one and
    /// refetch once input settles; other pages just filter what is loaded.
    pub async fn search(&mut self, term: &str) -> AppResult<()> {
        match self.type_search(term) {
            Some(fetch) => self.run_search(fetch).await.map(|_| ()),
            None => Ok(()),
        }
    }

    pub async fn go_to_page(&mut self, page: u32) -> AppResult<()> {
        self.page.set_page(page);
        self.load().await
    }

    pub async fn set_items_per_page(&mut self, items_per_page: u32) -> AppResult<()> {
        self.page.set_items_per_page(items_per_page);
        self.load().await
    }

    pub async fn apply(&mut self, event: PaginationEvent) -> AppResult<()> {
        match event {
            PaginationEvent::PageChange(page) => self.go_to_page(page).await,
            PaginationEvent::ItemsPerPageChange(size) => self.set_items_per_page(size).await,
        }
    }

    /// Rows as displayed, serial numbers restarting at 1 on every page.
    pub fn rows(&self) -> Vec<Row<&R::Item>> {
        let visible: Vec<&R::Item> = if R::SERVER_SEARCH {
            self.items.iter().collect()
        } else {
            filter_loaded::<R>(&self.items, &self.search)
        };
        visible
            .into_iter()
            .enumerate()
            .map(|(index, item)| Row {
                serial: index + 1,
                item,
            })
            .collect()
    }

    pub fn pagination(&self) -> PaginationControl {
        PaginationControl::new(&self.page, &self.page_size_options)
    }

    pub fn pagination_info(&self) -> PaginationInfo {
        self.page.info()
    }

    pub fn response(&self) -> PaginatedResponse<&R::Item> {
        PaginatedResponse {
            items: self.rows(),
            pagination: self.pagination_info(),
        }
    }

    fn find(&self, id: &str) -> Option<&R::Item> {
        self.items.iter().find(|item| R::id(item) == id)
    }

    pub fn open_create(&mut self, values: R::Form) {
        self.form.open(FormMode::Create, values);
    }

    /// Opens the edit dialog pre-filled from the loaded row.
    pub fn open_edit(&mut self, id: &str) -> AppResult<()> {
        let values = self
            .find(id)
            .and_then(R::edit_form)
            .ok_or_else(|| AppError::NotFound(format!("{} not found", R::LABEL)))?;
        self.form.open(FormMode::Edit(id.to_string()), values);
        Ok(())
    }

    /// Opens the edit dialog with caller-supplied values.
    pub fn open_edit_with(&mut self, id: &str, values: R::Form) {
        self.form.open(FormMode::Edit(id.to_string()), values);
    }

    pub fn blur(&mut self, field: &str) {
        self.form.blur(field);
    }

    pub fn close_form(&mut self) {
        self.form.close();
    }

    /// Validates, saves and refetches. Invalid input never reaches the
    /// backend; a rejected save keeps the dialog open with its values.
    pub async fn submit(&mut self) -> AppResult<Ack> {
        if let Some(values) = self.form.values_mut() {
            *values = R::prepare(values.clone());
        }
        let validated = self
            .form
            .validate()
            .map(|(mode, values)| (mode.clone(), values.clone()));
        let Some((mode, values)) = validated else {
            return Err(match self.form.errors() {
                Some(errors) => {
                    log::warn!("Rejected {} form: {errors}", R::SLUG);
                    AppError::ValidationError(errors.clone())
                }
                None => AppError::InternalError("No form is open".to_string()),
            });
        };

        let (result, verb) = match &mode {
            FormMode::Create => (self.backend.create(&values).await, "created"),
            FormMode::Edit(id) => (self.backend.update(id, &values).await, "updated"),
        };

        match result {
            Ok(ack) => {
                self.form.close();
                self.toasts
                    .success(format!("{} {verb} successfully", R::LABEL));
                // Already toasted by load; the save itself succeeded.
                let _ = self.load().await;
                Ok(ack)
            }
            Err(e) => {
                self.toasts.error(e.toast_message());
                Err(e)
            }
        }
    }

    pub fn request_delete(&mut self, id: &str) {
        self.confirm.request(
            PendingAction::Delete { id: id.to_string() },
            format!("Are you sure you want to delete this {}?", R::LABEL.to_lowercase()),
        );
    }

    /// Asks to flip the row's active flag.
    pub fn request_toggle(&mut self, id: &str) -> AppResult<()> {
        let active = self
            .find(id)
            .and_then(R::active_flag)
            .ok_or_else(|| AppError::NotFound(format!("{} not found", R::LABEL)))?;
        self.request_set_active(id, !active);
        Ok(())
    }

    /// Asks to set the active flag of a row that may not be loaded.
    pub fn request_set_active(&mut self, id: &str, active: bool) {
        let verb = if active { "activate" } else { "deactivate" };
        self.confirm.request(
            PendingAction::Toggle {
                id: id.to_string(),
                active,
            },
            format!("Are you sure you want to {verb} this {}?", R::LABEL.to_lowercase()),
        );
    }

    pub fn cancel_confirm(&mut self) {
        self.confirm.cancel();
    }

    /// Runs the confirmed action; `None` when nothing was pending.
    pub async fn confirm(&mut self) -> AppResult<Option<Ack>> {
        let Some(action) = self.confirm.confirm() else {
            return Ok(None);
        };
        let result = match &action {
            PendingAction::Delete { id } => self.backend.delete(id).await,
            PendingAction::Toggle { id, active } => self.backend.set_active(id, *active).await,
        };

        match (action, result) {
            (PendingAction::Delete { id }, Ok(ack)) => {
                let before = self.items.len();
                self.items.retain(|item| R::id(item) != id);
                if self.items.len() < before {
                    self.page.total_items = self.page.total_items.saturating_sub(1);
                }
                self.toasts
                    .success(format!("{} deleted successfully", R::LABEL));
                Ok(Some(ack))
            }
            (PendingAction::Toggle { .. }, Ok(ack)) => {
                self.toasts.success(ack.message.clone());
                let _ = self.load().await;
                Ok(Some(ack))
            }
            (_, Err(e)) => {
                self.toasts.error(e.toast_message());
                Err(e)
            }
        }
    }
}

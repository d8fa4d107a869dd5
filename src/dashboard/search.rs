use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::config::DashboardConfig;
use crate::external::Resource;

/// Case-insensitive substring match against any of `fields`.
pub fn matches_term(fields: &[&str], term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&term))
}

/// Filters the rows that are already loaded. Rows on other pages are never
/// seen, so a term matching only those returns nothing.
pub fn filter_loaded<'a, R: Resource>(items: &'a [R::Item], term: &str) -> Vec<&'a R::Item> {
    items
        .iter()
        .filter(|item| matches_term(&R::search_fields(item), term))
        .collect()
}

/// Coalesces bursts of input: only the last call within the delay settles.
#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Debouncer for `R`'s search box, if that page debounces at all.
    pub fn for_resource<R: Resource>(config: &DashboardConfig) -> Option<Self> {
        R::DEBOUNCE_SEARCH.then(|| Self::new(Duration::from_millis(config.search_debounce_ms)))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Registers one input. Every earlier ticket is superseded.
    pub fn input(&self) -> Ticket {
        Ticket {
            delay: self.delay,
            generation: self.generation.clone(),
            mine: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Waits out the delay; `true` when no newer call arrived meanwhile.
    pub async fn settle(&self) -> bool {
        self.input().settled().await
    }
}

/// One input's claim on a [`Debouncer`].
#[derive(Debug)]
pub struct Ticket {
    delay: Duration,
    generation: Arc<AtomicU64>,
    mine: u64,
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.mine
    }

    /// `true` when this is still the latest input once the delay has passed.
    /// A ticket that is already stale returns at once.
    pub async fn settled(self) -> bool {
        if !self.is_current() {
            return false;
        }
        tokio::time::sleep(self.delay).await;
        self.is_current()
    }
}

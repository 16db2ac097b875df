/// Incremental pagination over the launches endpoint
///
/// Keeps an explicit page counter and the pages fetched so far. The
/// application asks for a page index, runs the fetch as a task and reports
/// the outcome back here; rendering reads the flattened sequence.
use std::collections::BTreeMap;

use super::data::LaunchRecord;
use crate::api::FetchError;

#[derive(Debug, Default)]
pub struct Paginator {
    /// Pages received so far, keyed by 1-based page index
    pages: BTreeMap<u32, Vec<LaunchRecord>>,
    /// Number of pages requested (the page counter)
    size: u32,
    /// Page currently being fetched
    in_flight: Option<u32>,
    /// Last fetch failure, cleared by the next successful page
    error: Option<FetchError>,
}

impl Paginator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the first page. Returns the page index to fetch.
    pub fn start(&mut self) -> Option<u32> {
        if self.size > 0 {
            return None;
        }
        self.request(1)
    }

    /// Request the page after the last one asked for.
    ///
    /// Refused while a page is in flight. A page that failed is asked for
    /// again instead of skipping past it.
    pub fn load_more(&mut self) -> Option<u32> {
        if self.in_flight.is_some() {
            tracing::debug!(page = ?self.in_flight, "load more ignored, fetch in flight");
            return None;
        }

        let next = match self.first_missing() {
            Some(missing) => missing,
            None => self.size + 1,
        };
        self.request(next)
    }

    fn request(&mut self, page: u32) -> Option<u32> {
        self.size = self.size.max(page);
        self.in_flight = Some(page);
        tracing::debug!(page, size = self.size, "requesting launches page");
        Some(page)
    }

    fn first_missing(&self) -> Option<u32> {
        (1..=self.size).find(|index| !self.pages.contains_key(index))
    }

    pub fn page_loaded(&mut self, page: u32, records: Vec<LaunchRecord>) {
        if self.in_flight != Some(page) {
            tracing::warn!(page, expected = ?self.in_flight, "dropping unexpected page");
            return;
        }

        tracing::debug!(page, records = records.len(), "launches page loaded");
        self.in_flight = None;
        self.error = None;
        self.pages.insert(page, records);
    }

    pub fn page_failed(&mut self, page: u32, error: FetchError) {
        if self.in_flight != Some(page) {
            tracing::warn!(page, %error, "dropping failure for unexpected page");
            return;
        }

        tracing::debug!(page, %error, "launches page failed");
        self.in_flight = None;
        self.error = Some(error);
    }

    /// Every record fetched so far, pages in index order
    pub fn flattened(&self) -> impl Iterator<Item = &LaunchRecord> {
        self.pages.values().flatten()
    }

    /// Look up a loaded launch by flight number
    pub fn find(&self, flight_number: u32) -> Option<&LaunchRecord> {
        self.flattened()
            .find(|record| record.flight_number == flight_number)
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn is_validating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn total_items(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    /// No more data: the first page came back empty, or the most recent
    /// page holds fewer records than a full page.
    pub fn is_reaching_end(&self, page_size: usize) -> bool {
        let first_empty = self
            .pages
            .get(&1)
            .map(|page| page.is_empty())
            .unwrap_or(false);
        let last_short = self
            .pages
            .values()
            .next_back()
            .map(|page| page.len() < page_size)
            .unwrap_or(false);

        first_empty || last_short
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::fixtures::launch;

    fn page(range: std::ops::Range<u32>) -> Vec<LaunchRecord> {
        range.map(|n| launch(n, &format!("mission {n}"))).collect()
    }

    fn flight_numbers(paginator: &Paginator) -> Vec<u32> {
        paginator.flattened().map(|r| r.flight_number).collect()
    }

    #[test]
    fn test_start_requests_first_page_once() {
        let mut paginator = Paginator::new();

        assert_eq!(paginator.start(), Some(1));
        assert!(paginator.is_validating());
        assert_eq!(paginator.start(), None);
        assert_eq!(paginator.size(), 1);
    }

    #[test]
    fn test_flattened_is_concatenation_in_fetch_order() {
        let mut paginator = Paginator::new();
        paginator.start();
        paginator.page_loaded(1, vec![launch(90, "a"), launch(95, "b"), launch(80, "c")]);

        assert_eq!(paginator.load_more(), Some(2));
        paginator.page_loaded(2, vec![launch(70, "d"), launch(95, "b")]);

        // No reordering and no deduplication across pages
        assert_eq!(flight_numbers(&paginator), vec![90, 95, 80, 70, 95]);
        assert_eq!(paginator.total_items(), 5);
    }

    #[test]
    fn test_load_more_refused_while_in_flight() {
        let mut paginator = Paginator::new();
        paginator.start();

        assert_eq!(paginator.load_more(), None);
        paginator.page_loaded(1, page(0..12));
        assert_eq!(paginator.load_more(), Some(2));
        assert_eq!(paginator.load_more(), None);
        assert_eq!(paginator.size(), 2);
    }

    #[test]
    fn test_error_keeps_existing_data() {
        let mut paginator = Paginator::new();
        paginator.start();
        paginator.page_loaded(1, page(0..12));
        paginator.load_more();
        paginator.page_failed(2, FetchError::Status(500));

        assert!(paginator.error().is_some());
        assert!(!paginator.is_validating());
        assert_eq!(paginator.total_items(), 12);
    }

    #[test]
    fn test_failed_page_is_requested_again() {
        let mut paginator = Paginator::new();
        paginator.start();
        paginator.page_failed(1, FetchError::Transport("offline".to_string()));

        assert_eq!(paginator.load_more(), Some(1));
        paginator.page_loaded(1, page(0..3));
        assert!(paginator.error().is_none());
        assert_eq!(paginator.size(), 1);
    }

    #[test]
    fn test_unexpected_page_is_dropped() {
        let mut paginator = Paginator::new();
        paginator.start();
        paginator.page_loaded(3, page(0..12));

        assert_eq!(paginator.total_items(), 0);
        assert!(paginator.is_validating());
    }

    #[test]
    fn test_reaching_end() {
        let mut paginator = Paginator::new();
        assert!(!paginator.is_reaching_end(12));

        paginator.start();
        paginator.page_loaded(1, page(0..12));
        assert!(!paginator.is_reaching_end(12));

        paginator.load_more();
        paginator.page_loaded(2, page(12..17));
        assert!(paginator.is_reaching_end(12));
    }

    #[test]
    fn test_empty_first_page_is_end() {
        let mut paginator = Paginator::new();
        paginator.start();
        paginator.page_loaded(1, Vec::new());

        assert!(paginator.is_reaching_end(12));
    }

    #[test]
    fn test_find_by_flight_number() {
        let mut paginator = Paginator::new();
        paginator.start();
        paginator.page_loaded(1, page(1..4));

        assert_eq!(paginator.find(2).map(|r| r.flight_number), Some(2));
        assert!(paginator.find(40).is_none());
    }
}

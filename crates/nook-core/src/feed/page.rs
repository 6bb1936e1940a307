use crate::ports::FeedQuery;

/// Where the feed is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// Nothing requested yet.
    Idle,
    LoadingInitial,
    Ready,
    LoadingMore,
    /// The server reported no further pages.
    Exhausted,
}

/// Pagination bookkeeping for the active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    /// Last page committed to the collection (1-based).
    pub current_page: u32,
    pub page_size: u32,
    pub has_next_page: bool,
    pub is_loading_initial: bool,
    pub is_loading_more: bool,
    pub filter: FeedQuery,
}

impl PageState {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size,
            has_next_page: false,
            is_loading_initial: false,
            is_loading_more: false,
            filter: FeedQuery::default(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading_initial || self.is_loading_more
    }

    pub(crate) fn reset(&mut self, filter: FeedQuery) {
        self.current_page = 1;
        self.has_next_page = false;
        self.is_loading_initial = true;
        self.is_loading_more = false;
        self.filter = filter;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Initial,
    More,
}

/// Identifies one page request. A response is only applied while its ticket
/// is still the one in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    /// Bumped on every mount/filter change.
    pub generation: u64,
    pub page: u32,
    pub kind: RequestKind,
}

/// What happened to a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page was committed; `received` posts were added.
    Applied { page: u32, received: usize },
    /// The response belonged to a superseded request and was dropped.
    Discarded,
    /// No request was made (already loading, exhausted, or not near the bottom).
    Skipped,
}

use crate::domain::{Comment, Post};
use crate::error::ApiError;
use crate::ports::{FeedQuery, PostPage, PostQuery};

use super::page::{FeedPhase, PageOutcome, PageState, RequestKind, RequestTicket};

/// The feed collection plus its pagination state machine.
///
/// Posts are kept in server order. Pages are only ever appended, and
/// mutations replace a post in place, so the order never changes within a
/// generation.
#[derive(Debug, Clone)]
pub struct FeedState {
    posts: Vec<Post>,
    page: PageState,
    phase: FeedPhase,
    generation: u64,
    in_flight: Option<RequestTicket>,
}

impl FeedState {
    pub fn new(page_size: u32) -> Self {
        Self {
            posts: Vec::new(),
            page: PageState::new(page_size),
            phase: FeedPhase::Idle,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn phase(&self) -> FeedPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start over from page 1 for `filter`. Used on mount and on every filter
    /// change; any request still in flight is superseded.
    pub fn begin_initial(&mut self, filter: FeedQuery) -> RequestTicket {
        self.generation += 1;
        self.posts.clear();
        self.page.reset(filter);
        self.phase = FeedPhase::LoadingInitial;

        let ticket = RequestTicket {
            generation: self.generation,
            page: 1,
            kind: RequestKind::Initial,
        };
        self.in_flight = Some(ticket);
        ticket
    }

    pub fn can_load_more(&self) -> bool {
        self.phase == FeedPhase::Ready
            && self.page.has_next_page
            && !self.page.is_loading()
            && self.in_flight.is_none()
    }

    /// Request the page after the last committed one, unless a fetch is
    /// already running or there is nothing more to load.
    pub fn begin_more(&mut self) -> Option<RequestTicket> {
        if !self.can_load_more() {
            return None;
        }

        self.page.is_loading_more = true;
        self.phase = FeedPhase::LoadingMore;

        let ticket = RequestTicket {
            generation: self.generation,
            page: self.page.current_page + 1,
            kind: RequestKind::More,
        };
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// API parameters for a ticket issued by this state.
    pub fn query_for(&self, ticket: &RequestTicket) -> PostQuery {
        PostQuery {
            page: ticket.page,
            limit: self.page.page_size,
            filter: self.page.filter.clone(),
        }
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.in_flight.as_ref() == Some(ticket)
    }

    /// Apply the outcome of a page request.
    ///
    /// Stale tickets are dropped whatever the result. A failure leaves the
    /// committed page and the collection untouched and is handed back.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<PostPage, ApiError>,
    ) -> Result<PageOutcome, ApiError> {
        if !self.is_current(&ticket) {
            return Ok(PageOutcome::Discarded);
        }
        self.in_flight = None;

        match ticket.kind {
            RequestKind::Initial => self.page.is_loading_initial = false,
            RequestKind::More => self.page.is_loading_more = false,
        }

        match result {
            Ok(page) => {
                let received = page.posts.len();
                match ticket.kind {
                    RequestKind::Initial => self.posts = page.posts,
                    RequestKind::More => self.posts.extend(page.posts),
                }
                self.page.current_page = ticket.page;
                self.page.has_next_page = page.has_next_page;
                self.phase = if page.has_next_page {
                    FeedPhase::Ready
                } else {
                    FeedPhase::Exhausted
                };
                Ok(PageOutcome::Applied {
                    page: ticket.page,
                    received,
                })
            }
            Err(err) => {
                // After a failed initial load `has_next_page` is still false from
                // the reset, so only a mount or filter change can fetch again.
                self.phase = FeedPhase::Ready;
                Err(err)
            }
        }
    }

    /// Set `user_id`'s like on a post. `None` when the post is not in the feed,
    /// otherwise whether the like set changed.
    pub fn set_liked(&mut self, post_id: &str, user_id: &str, liked: bool) -> Option<bool> {
        let post = self.posts.iter_mut().find(|p| p.id == post_id)?;
        Some(post.set_liked(user_id, liked))
    }

    /// Append a server-confirmed comment. Returns false if the post is gone.
    pub fn append_comment(&mut self, post_id: &str, comment: Comment) -> bool {
        match self.posts.iter_mut().find(|p| p.id == post_id) {
            Some(post) => {
                post.comments.push(comment);
                true
            }
            None => false,
        }
    }
}

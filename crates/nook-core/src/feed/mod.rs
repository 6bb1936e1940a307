//! The feed: paginated post state, infinite scroll, and optimistic
//! like/comment reconciliation against the Post API.
//!
//! [`FeedState`] is the synchronous state machine. It never performs I/O:
//! callers `begin_*` a request, receive a [`RequestTicket`], run the request,
//! and hand the result back with [`FeedState::complete`]. Tickets from a
//! superseded generation are discarded there.
//!
//! [`FeedController`] drives the state machine against the ports.

mod controller;
mod page;
mod scroll;
mod state;


pub use controller::{FeedConfig, FeedController, LikeFailurePolicy, DEFAULT_PAGE_SIZE};
pub use page::{FeedPhase, PageOutcome, PageState, RequestKind, RequestTicket};
pub use scroll::{NEAR_BOTTOM_THRESHOLD, ScrollMetrics, is_near_bottom, should_fetch_next};
pub use state::FeedState;

pub use crate::ports::FeedQuery;

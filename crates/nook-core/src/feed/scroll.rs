//! Near-bottom detection, decoupled from any real viewport.

use super::page::PageState;

/// Distance from the bottom of the document, in pixels, at which the next
/// page is requested.
pub const NEAR_BOTTOM_THRESHOLD: f64 = 300.0;

/// One scroll position report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_position: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_position: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            scroll_position,
            viewport_height,
            document_height,
        }
    }

    /// A viewport resting at the very end of the document.
    pub fn at_bottom(document_height: f64, viewport_height: f64) -> Self {
        Self::new(
            (document_height - viewport_height).max(0.0),
            viewport_height,
            document_height,
        )
    }

    pub fn is_near_bottom(&self) -> bool {
        is_near_bottom(
            self.scroll_position,
            self.viewport_height,
            self.document_height,
        )
    }
}

pub fn is_near_bottom(scroll_position: f64, viewport_height: f64, document_height: f64) -> bool {
    scroll_position + viewport_height >= document_height - NEAR_BOTTOM_THRESHOLD
}

/// True when a scroll report should trigger loading the next page.
pub fn should_fetch_next(
    scroll_position: f64,
    viewport_height: f64,
    document_height: f64,
    state: &PageState,
) -> bool {
    state.has_next_page
        && !state.is_loading()
        && is_near_bottom(scroll_position, viewport_height, document_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(has_next_page: bool) -> PageState {
        PageState {
            has_next_page,
            ..PageState::new(10)
        }
    }

    #[test]
    fn test_far_from_bottom_does_not_fetch() {
        assert!(!should_fetch_next(0.0, 800.0, 5000.0, &ready(true)));
    }

    #[test]
    fn test_within_threshold_fetches() {
        // 4000 + 800 = 4800, 200px from the end.
        assert!(should_fetch_next(4000.0, 800.0, 5000.0, &ready(true)));
        assert!(should_fetch_next(4200.0, 800.0, 5000.0, &ready(true)));
    }

    #[test]
    fn test_exhausted_feed_does_not_fetch() {
        assert!(!should_fetch_next(4200.0, 800.0, 5000.0, &ready(false)));
    }

    #[test]
    fn test_loading_suppresses_fetch() {
        let mut state = ready(true);
        state.is_loading_more = true;
        assert!(!should_fetch_next(4200.0, 800.0, 5000.0, &state));

        state.is_loading_more = false;
        state.is_loading_initial = true;
        assert!(!should_fetch_next(4200.0, 800.0, 5000.0, &state));
    }

    #[test]
    fn test_short_document_is_always_near_bottom() {
        let metrics = ScrollMetrics::at_bottom(400.0, 800.0);
        assert_eq!(metrics.scroll_position, 0.0);
        assert!(metrics.is_near_bottom());
    }
}

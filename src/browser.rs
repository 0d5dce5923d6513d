//! The post browser: a list/detail state machine over the post source.
//!
//! ```text
//!            select(id)
//!   Listing ───────────▶ Viewing(id)
//!      ▲                     │
//!      └──────── back ───────┘
//! ```
//!
//! Each state entry issues its own fetches and gets a fresh [`Ticket`]:
//!
//! - **Listing** fetches the whole collection once and paginates locally.
//! - **Viewing** fetches the post and its comments under one shared ticket.
//!   Both must succeed; if either fails the view shows an error and whatever
//!   the other request returned is dropped.
//!
//! Returning to Listing is a fresh entry: the collection is fetched again
//! and the page cursor starts over at 1. Opening a post always re-fetches.
//!
//! ## Stale results
//!
//! The browser holds no handle on in-flight requests. A completion is applied
//! only if its ticket equals the ticket of the current state and that state
//! is still waiting for that kind of result; anything else is logged and
//! dropped. This covers a late collection arriving after a post was opened,
//! a late detail arriving after "back" or after another post was opened, and
//! duplicate deliveries.

use crate::pagination::Paginator;
use crate::source::{FetchCompletion, FetchKind, FetchRequest, FetchResult, Ticket, TicketCounter};
use crate::types::{Comment, PostDetail, PostSummary};

/// Progress of a load.
#[derive(Debug, Clone, PartialEq)]
pub enum Load<T> {
    Loading,
    Failed,
    Ready(T),
}

impl<T> Load<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// A loaded post together with its comments.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPage {
    pub post: PostDetail,
    pub comments: Vec<Comment>,
}

/// Listing state: the paginated collection.
#[derive(Debug, Clone)]
pub struct Listing {
    ticket: Ticket,
    load: Load<Paginator<PostSummary>>,
}

impl Listing {
    pub fn load(&self) -> &Load<Paginator<PostSummary>> {
        &self.load
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }
}

/// Viewing state: one post and its comments.
#[derive(Debug, Clone)]
pub struct Viewing {
    post_id: u64,
    ticket: Ticket,
    pending_post: Option<PostDetail>,
    pending_comments: Option<Vec<Comment>>,
    load: Load<PostPage>,
}

impl Viewing {
    pub fn post_id(&self) -> u64 {
        self.post_id
    }

    pub fn load(&self) -> &Load<PostPage> {
        &self.load
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Promote to Ready once both halves have arrived.
    fn try_finish(&mut self) {
        match (self.pending_post.take(), self.pending_comments.take()) {
            (Some(post), Some(comments)) => {
                self.load = Load::Ready(PostPage { post, comments });
            }
            (post, comments) => {
                self.pending_post = post;
                self.pending_comments = comments;
            }
        }
    }

    fn fail(&mut self) {
        self.pending_post = None;
        self.pending_comments = None;
        self.load = Load::Failed;
    }
}

#[derive(Debug, Clone)]
pub enum BrowserState {
    Listing(Listing),
    Viewing(Viewing),
}

/// Post browser for one mount of the Posts view.
#[derive(Debug, Clone)]
pub struct PostBrowser {
    page_size: usize,
    state: BrowserState,
}

impl PostBrowser {
    /// Mount in Listing and return the collection request to run.
    pub fn mount(page_size: usize, tickets: &mut TicketCounter) -> (Self, FetchRequest) {
        let (listing, request) = Self::enter_listing(tickets);
        let browser = Self {
            page_size,
            state: BrowserState::Listing(listing),
        };
        (browser, request)
    }

    fn enter_listing(tickets: &mut TicketCounter) -> (Listing, FetchRequest) {
        let ticket = tickets.issue();
        tracing::debug!(ticket = ticket.value(), "listing: fetching posts");
        let listing = Listing {
            ticket,
            load: Load::Loading,
        };
        (listing, FetchRequest { ticket, kind: FetchKind::Posts })
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    /// The listing, if that is the current state.
    pub fn listing(&self) -> Option<&Listing> {
        match &self.state {
            BrowserState::Listing(listing) => Some(listing),
            BrowserState::Viewing(_) => None,
        }
    }

    /// The detail view, if that is the current state.
    pub fn viewing(&self) -> Option<&Viewing> {
        match &self.state {
            BrowserState::Viewing(viewing) => Some(viewing),
            BrowserState::Listing(_) => None,
        }
    }

    /// Open a post from the loaded listing.
    ///
    /// Only valid while Listing with the collection loaded; otherwise nothing
    /// happens and no requests are returned.
    pub fn select(&mut self, post_id: u64, tickets: &mut TicketCounter) -> Vec<FetchRequest> {
        let BrowserState::Listing(listing) = &self.state else {
            tracing::debug!(post_id, "select ignored: not listing");
            return Vec::new();
        };
        if listing.load.ready().is_none() {
            tracing::debug!(post_id, "select ignored: posts not loaded");
            return Vec::new();
        }

        let ticket = tickets.issue();
        tracing::debug!(post_id, ticket = ticket.value(), "viewing: fetching post and comments");
        self.state = BrowserState::Viewing(Viewing {
            post_id,
            ticket,
            pending_post: None,
            pending_comments: None,
            load: Load::Loading,
        });
        vec![
            FetchRequest { ticket, kind: FetchKind::Post(post_id) },
            FetchRequest { ticket, kind: FetchKind::Comments(post_id) },
        ]
    }

    /// Leave the detail view. Returns the collection request for the fresh
    /// listing, or `None` when already listing.
    pub fn back(&mut self, tickets: &mut TicketCounter) -> Option<FetchRequest> {
        if !matches!(self.state, BrowserState::Viewing(_)) {
            return None;
        }
        let (listing, request) = Self::enter_listing(tickets);
        self.state = BrowserState::Listing(listing);
        Some(request)
    }

    /// Change the listing page. Returns `false` when not listing, not loaded,
    /// or `page` is out of range.
    pub fn go_to(&mut self, page: usize) -> bool {
        match &mut self.state {
            BrowserState::Listing(Listing {
                load: Load::Ready(pages),
                ..
            }) => pages.go_to(page),
            _ => false,
        }
    }

    /// Apply a fetch result. Returns whether it changed state.
    pub fn complete(&mut self, completion: FetchCompletion) -> bool {
        let FetchCompletion { ticket, result } = completion;
        let page_size = self.page_size;

        match (&mut self.state, result) {
            (BrowserState::Listing(listing), FetchResult::Posts(result))
                if listing.ticket == ticket && listing.load.is_loading() =>
            {
                listing.load = match result {
                    Ok(posts) => {
                        tracing::debug!(count = posts.len(), "listing: posts loaded");
                        Load::Ready(Paginator::new(posts, page_size))
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "listing: failed to load posts");
                        Load::Failed
                    }
                };
                true
            }
            (BrowserState::Viewing(viewing), FetchResult::Post(result))
                if viewing.ticket == ticket
                    && viewing.load.is_loading()
                    && viewing.pending_post.is_none() =>
            {
                match result {
                    Ok(post) => {
                        viewing.pending_post = Some(post);
                        viewing.try_finish();
                    }
                    Err(e) => {
                        tracing::warn!(post_id = viewing.post_id, error = %e, "viewing: failed to load post");
                        viewing.fail();
                    }
                }
                true
            }
            (BrowserState::Viewing(viewing), FetchResult::Comments(result))
                if viewing.ticket == ticket
                    && viewing.load.is_loading()
                    && viewing.pending_comments.is_none() =>
            {
                match result {
                    Ok(comments) => {
                        viewing.pending_comments = Some(comments);
                        viewing.try_finish();
                    }
                    Err(e) => {
                        tracing::warn!(post_id = viewing.post_id, error = %e, "viewing: failed to load comments");
                        viewing.fail();
                    }
                }
                true
            }
            _ => {
                tracing::debug!(ticket = ticket.value(), "discarding stale fetch result");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SourceError, execute};
    use crate::test_helpers::{FixtureSource, sample_posts};

    fn mounted(page_size: usize) -> (PostBrowser, FetchRequest, TicketCounter) {
        let mut tickets = TicketCounter::new();
        let (browser, request) = PostBrowser::mount(page_size, &mut tickets);
        (browser, request, tickets)
    }

    fn posts_done(ticket: Ticket, n: usize) -> FetchCompletion {
        FetchCompletion {
            ticket,
            result: FetchResult::Posts(Ok(sample_posts(n))),
        }
    }

    fn loaded(n: usize) -> (PostBrowser, TicketCounter) {
        let (mut browser, request, tickets) = mounted(10);
        assert!(browser.complete(posts_done(request.ticket, n)));
        (browser, tickets)
    }

    // =========================================================================
    // Listing
    // =========================================================================

    #[test]
    fn mount_starts_loading_with_one_request() {
        let (browser, request, _) = mounted(10);
        assert_eq!(request.kind, FetchKind::Posts);
        let listing = browser.listing().unwrap();
        assert!(listing.load().is_loading());
        assert_eq!(listing.ticket(), request.ticket);
    }

    #[test]
    fn listing_paginates_loaded_posts() {
        let (mut browser, _) = loaded(23);
        let pages = browser.listing().unwrap().load().ready().unwrap();
        assert_eq!(pages.total_pages(), 3);
        assert_eq!(pages.current_items().len(), 10);
        assert!(!pages.has_previous());
        assert!(pages.has_next());

        assert!(browser.go_to(3));
        let pages = browser.listing().unwrap().load().ready().unwrap();
        assert_eq!(pages.current_items().len(), 3);
        assert!(!pages.has_next());
    }

    #[test]
    fn listing_failure_is_terminal() {
        let (mut browser, request, _) = mounted(10);
        let failed = FetchCompletion {
            ticket: request.ticket,
            result: FetchResult::Posts(Err(SourceError::Unavailable("down".into()))),
        };
        assert!(browser.complete(failed));
        assert!(browser.listing().unwrap().load().is_failed());

        // A second delivery for the same ticket changes nothing.
        assert!(!browser.complete(posts_done(request.ticket, 5)));
        assert!(browser.listing().unwrap().load().is_failed());
    }

    #[test]
    fn go_to_before_load_is_rejected() {
        let (mut browser, _, _) = mounted(10);
        assert!(!browser.go_to(1));
    }

    #[test]
    fn go_to_out_of_range_keeps_page() {
        let (mut browser, _) = loaded(23);
        assert!(browser.go_to(2));
        assert!(!browser.go_to(0));
        assert!(!browser.go_to(4));
        let pages = browser.listing().unwrap().load().ready().unwrap();
        assert_eq!(pages.page_index(), 2);
    }

    #[test]
    fn configured_page_size_is_used() {
        let mut tickets = TicketCounter::new();
        let (mut browser, request) = PostBrowser::mount(4, &mut tickets);
        browser.complete(posts_done(request.ticket, 10));
        let pages = browser.listing().unwrap().load().ready().unwrap();
        assert_eq!(pages.total_pages(), 3);
        assert_eq!(pages.current_items().len(), 4);
    }

    // =========================================================================
    // Viewing
    // =========================================================================

    #[test]
    fn select_issues_post_and_comments_under_one_ticket() {
        let (mut browser, mut tickets) = loaded(5);
        let requests = browser.select(3, &mut tickets);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].ticket, requests[1].ticket);
        assert_eq!(requests[0].kind, FetchKind::Post(3));
        assert_eq!(requests[1].kind, FetchKind::Comments(3));

        let viewing = browser.viewing().unwrap();
        assert_eq!(viewing.post_id(), 3);
        assert!(viewing.load().is_loading());
    }

    #[test]
    fn select_before_listing_loads_is_ignored() {
        let (mut browser, _, mut tickets) = mounted(10);
        assert!(browser.select(1, &mut tickets).is_empty());
        assert!(browser.listing().is_some());
    }

    #[test]
    fn detail_waits_for_both_halves_in_any_order() {
        let source = FixtureSource::with_posts(5);
        let (mut browser, mut tickets) = loaded(5);
        let requests = browser.select(2, &mut tickets);

        // Comments first, then post.
        assert!(browser.complete(execute(&source, requests[1])));
        assert!(browser.viewing().unwrap().load().is_loading());
        assert!(browser.complete(execute(&source, requests[0])));

        let page = browser.viewing().unwrap().load().ready().unwrap();
        assert_eq!(page.post.id, 2);
        assert_eq!(page.comments.len(), 2);
    }

    #[test]
    fn one_failed_half_discards_the_other() {
        let source = FixtureSource::with_posts(5).failing_comments();
        let (mut browser, mut tickets) = loaded(5);
        let requests = browser.select(2, &mut tickets);

        assert!(browser.complete(execute(&source, requests[0])));
        assert!(browser.complete(execute(&source, requests[1])));

        let viewing = browser.viewing().unwrap();
        assert!(viewing.load().is_failed());
        assert!(viewing.pending_post.is_none());
    }

    #[test]
    fn late_half_after_failure_is_dropped() {
        let source = FixtureSource::with_posts(5).failing_posts_detail();
        let (mut browser, mut tickets) = loaded(5);
        let requests = browser.select(2, &mut tickets);

        assert!(browser.complete(execute(&source, requests[0])));
        assert!(!browser.complete(execute(&source, requests[1])));
        assert!(browser.viewing().unwrap().load().is_failed());
    }

    #[test]
    fn back_refetches_and_resets_page() {
        let (mut browser, mut tickets) = loaded(23);
        browser.go_to(3);
        browser.select(21, &mut tickets);

        let request = browser.back(&mut tickets).unwrap();
        assert_eq!(request.kind, FetchKind::Posts);
        assert!(browser.listing().unwrap().load().is_loading());

        browser.complete(posts_done(request.ticket, 23));
        let pages = browser.listing().unwrap().load().ready().unwrap();
        assert_eq!(pages.page_index(), 1);
    }

    #[test]
    fn back_while_listing_is_a_no_op() {
        let (mut browser, mut tickets) = loaded(5);
        assert!(browser.back(&mut tickets).is_none());
    }

    // =========================================================================
    // Stale results
    // =========================================================================

    #[test]
    fn detail_result_after_back_is_dropped() {
        let source = FixtureSource::with_posts(5);
        let (mut browser, mut tickets) = loaded(5);
        let requests = browser.select(2, &mut tickets);
        let listing_request = browser.back(&mut tickets).unwrap();

        assert!(!browser.complete(execute(&source, requests[0])));
        assert!(!browser.complete(execute(&source, requests[1])));
        assert!(browser.listing().unwrap().load().is_loading());

        assert!(browser.complete(posts_done(listing_request.ticket, 5)));
    }

    #[test]
    fn result_for_previously_opened_post_is_dropped() {
        let source = FixtureSource::with_posts(5);
        let (mut browser, mut tickets) = loaded(5);
        let first = browser.select(1, &mut tickets);
        let back = browser.back(&mut tickets).unwrap();
        browser.complete(posts_done(back.ticket, 5));
        let second = browser.select(4, &mut tickets);

        assert!(!browser.complete(execute(&source, first[0])));
        assert!(!browser.complete(execute(&source, first[1])));
        assert!(browser.viewing().unwrap().load().is_loading());

        browser.complete(execute(&source, second[0]));
        browser.complete(execute(&source, second[1]));
        let page = browser.viewing().unwrap().load().ready().unwrap();
        assert_eq!(page.post.id, 4);
    }

    #[test]
    fn stale_listing_result_does_not_clobber_detail() {
        let (mut browser, request, mut tickets) = mounted(10);
        browser.complete(posts_done(request.ticket, 5));
        browser.select(2, &mut tickets);

        assert!(!browser.complete(posts_done(request.ticket, 5)));
        assert!(browser.viewing().is_some());
    }
}

//! The application shell.
//!
//! [`App`] owns every piece of runtime state: the router and its location
//! subscription, the mounted post browser, the sidebar widgets, the store,
//! and the post source. All mutation goes through it, one event at a time.
//!
//! ## Event flow
//!
//! ```text
//! Location::set_fragment ──▶ Subscription ──▶ App::pump ──▶ Router::navigate ──▶ re-render
//!                                                 │
//! App::dispatch(UserEvent) ───────────────────────┤
//!                                                 ▼
//!                                   pending FetchRequests ──▶ source::execute
//!                                                 ▲                  │
//!                                                 └── App::deliver ◀─┘
//! ```
//!
//! Fetches are queued, not run inline. [`App::settle`] drains the queue
//! synchronously; tests use [`App::take_requests`] and [`App::deliver`] to
//! interleave completions with navigation.

use crate::browser::PostBrowser;
use crate::config::AppConfig;
use crate::location::{Location, Subscription};
use crate::render::{self, PageContext};
use crate::router::{Route, Router, ViewTag};
use crate::source::{self, FetchCompletion, FetchRequest, PostSource, TicketCounter};
use crate::store::KeyValueStore;
use crate::widgets::{CommentBox, EngagementCounter, FramePlayback, Polarity};
use maud::Markup;
use std::collections::VecDeque;

/// A user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    /// Open a post from the listing.
    SelectPost(u64),
    /// Leave the post detail view.
    Back,
    /// Jump to a listing page.
    GoToPage(usize),
    /// Replace the comment draft.
    EditDraft(String),
    SubmitComment,
    Like,
    Dislike,
}

pub struct App<S, P> {
    config: AppConfig,
    location: Location,
    subscription: Option<Subscription>,
    router: Router,
    browser: Option<PostBrowser>,
    tickets: TicketCounter,
    pending: VecDeque<FetchRequest>,
    comment_box: CommentBox,
    like: EngagementCounter<FramePlayback>,
    dislike: EngagementCounter<FramePlayback>,
    store: S,
    source: P,
    renders: u64,
}

impl<S: KeyValueStore, P: PostSource> App<S, P> {
    /// Start the app at the location's current fragment.
    ///
    /// Subscribes to the location, resolves the initial route, loads the
    /// widgets from the store, mounts the post browser if the initial route
    /// is Posts, and performs the first render.
    pub fn start(config: AppConfig, store: S, source: P, mut location: Location) -> Self {
        let subscription = location.subscribe();
        let router = Router::new(config.app_title.clone(), location.fragment());
        let comment_box = CommentBox::load(&store);
        let like = EngagementCounter::load(Polarity::Like, &store, FramePlayback::default());
        let dislike = EngagementCounter::load(Polarity::Dislike, &store, FramePlayback::default());

        let mut app = Self {
            config,
            location,
            subscription: Some(subscription),
            router,
            browser: None,
            tickets: TicketCounter::new(),
            pending: VecDeque::new(),
            comment_box,
            like,
            dislike,
            store,
            source,
            renders: 0,
        };
        app.sync_browser(None);
        app.rerender();
        app
    }

    /// Tear down the location subscription. Later fragment changes are no
    /// longer observed.
    pub fn shutdown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.location.unsubscribe(subscription);
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Change the host fragment and process the resulting notification.
    pub fn navigate(&mut self, fragment: &str) {
        self.location.set_fragment(fragment);
        self.pump();
    }

    /// Process queued fragment-change notifications in receipt order.
    /// Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let changes = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => return 0,
        };
        for change in &changes {
            let previous = self.router.navigate(&change.new_fragment);
            self.sync_browser(Some(previous));
            self.rerender();
        }
        changes.len()
    }

    /// Mount or unmount the post browser to match the current route.
    fn sync_browser(&mut self, previous: Option<Route>) {
        let on_posts = self.router.current().view == ViewTag::Posts;
        let was_on_posts = previous.is_some_and(|r| r.view == ViewTag::Posts);

        if on_posts && !(was_on_posts && self.browser.is_some()) {
            let (browser, request) = PostBrowser::mount(self.config.posts.page_size, &mut self.tickets);
            self.browser = Some(browser);
            self.pending.push_back(request);
        } else if !on_posts && self.browser.take().is_some() {
            tracing::debug!("post browser unmounted");
        }
    }

    // =========================================================================
    // User events
    // =========================================================================

    /// Apply a user interaction. Returns whether it changed anything.
    pub fn dispatch(&mut self, event: UserEvent) -> bool {
        let changed = match event {
            UserEvent::SelectPost(id) => match self.browser.as_mut() {
                Some(browser) => {
                    let requests = browser.select(id, &mut self.tickets);
                    let changed = !requests.is_empty();
                    self.pending.extend(requests);
                    changed
                }
                None => false,
            },
            UserEvent::Back => match self.browser.as_mut() {
                Some(browser) => match browser.back(&mut self.tickets) {
                    Some(request) => {
                        self.pending.push_back(request);
                        true
                    }
                    None => false,
                },
                None => false,
            },
            UserEvent::GoToPage(page) => self
                .browser
                .as_mut()
                .is_some_and(|browser| browser.go_to(page)),
            UserEvent::EditDraft(draft) => {
                self.comment_box.set_draft(draft);
                true
            }
            UserEvent::SubmitComment => self.comment_box.submit(&mut self.store),
            UserEvent::Like => {
                self.like.increment(&mut self.store);
                true
            }
            UserEvent::Dislike => {
                self.dislike.increment(&mut self.store);
                true
            }
        };
        if changed {
            self.rerender();
        }
        changed
    }

    // =========================================================================
    // Fetches
    // =========================================================================

    /// Take every queued fetch request, oldest first.
    pub fn take_requests(&mut self) -> Vec<FetchRequest> {
        self.pending.drain(..).collect()
    }

    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    /// Feed a fetch result back in. Results for a browser that has since
    /// been unmounted, or for a superseded state, are dropped.
    pub fn deliver(&mut self, completion: FetchCompletion) -> bool {
        let applied = match self.browser.as_mut() {
            Some(browser) => browser.complete(completion),
            None => {
                tracing::debug!(
                    ticket = completion.ticket.value(),
                    "discarding fetch result: posts view not mounted"
                );
                false
            }
        };
        if applied {
            self.rerender();
        }
        applied
    }

    /// Run queued fetches against the source until none remain.
    pub fn settle(&mut self) {
        while let Some(request) = self.pending.pop_front() {
            let completion = source::execute(&self.source, request);
            self.deliver(completion);
        }
    }

    // =========================================================================
    // Rendering and accessors
    // =========================================================================

    fn rerender(&mut self) {
        self.renders += 1;
    }

    /// Number of renders performed so far, including the initial one.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Build the current page.
    pub fn render(&self) -> Markup {
        let ctx = PageContext {
            title: self.router.title(),
            app_title: self.router.app_title(),
            footer: &self.config.footer,
            route: self.router.current(),
            routes: self.router.routes(),
            browser: self.browser.as_ref(),
            comment_box: &self.comment_box,
            counters: [
                (Polarity::Like, self.like.count()),
                (Polarity::Dislike, self.dislike.count()),
            ],
        };
        render::render_page(&ctx)
    }

    pub fn route(&self) -> &Route {
        self.router.current()
    }

    pub fn title(&self) -> &str {
        self.router.title()
    }

    pub fn fragment(&self) -> &str {
        self.location.fragment()
    }

    pub fn browser(&self) -> Option<&PostBrowser> {
        self.browser.as_ref()
    }

    pub fn comment_box(&self) -> &CommentBox {
        &self.comment_box
    }

    pub fn counter(&self, polarity: Polarity) -> &EngagementCounter<FramePlayback> {
        match polarity {
            Polarity::Like => &self.like,
            Polarity::Dislike => &self.dislike,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    /// Mutable access to the host location, for changing the fragment
    /// without immediately pumping.
    pub fn location_mut(&mut self) -> &mut Location {
        &mut self.location
    }
}

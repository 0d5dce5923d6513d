//! # hashnav
//!
//! A hash-routed single-page application modelled headlessly: a handful of
//! static pages, a paginated post browser backed by a remote JSON API, and a
//! sidebar with a comment box and like/dislike counters persisted in a
//! key-value store. Pages render to HTML with Maud.
//!
//! # Architecture: One Owner, Injected Boundaries
//!
//! Everything the browser would normally provide is reached through a small
//! interface, and [`app::App`] owns one of each:
//!
//! ```text
//! Location (URL fragment)  ──notifications──▶  App  ──▶  render::render_page
//! KeyValueStore            ◀──get/set──────────  │
//! PostSource               ◀──FetchRequest───────┘──▶ FetchCompletion ──▶ App::deliver
//! ```
//!
//! - **Swappable hosts**: the binary uses [`source::HttpPostSource`] and
//!   [`store::FileStore`]; tests use fixture sources and [`store::MemoryStore`].
//! - **Deterministic ordering**: fetches are queued as data, so tests decide
//!   exactly when each completion lands relative to navigation.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Application shell: owns state, dispatches user events, routes fetch results |
//! | [`router`] | Static route table, fragment resolution, page titles |
//! | [`location`] | Host URL fragment with change subscriptions |
//! | [`browser`] | Post list/detail state machine with stale-result rejection |
//! | [`pagination`] | Fixed-size page window over an in-memory list |
//! | [`source`] | Post source trait, fetch tickets, HTTP client |
//! | [`store`] | Key-value store trait, JSON helpers, memory and file stores |
//! | [`widgets`] | Comment box and like/dislike counters |
//! | [`render`] | Maud page composition and embedded markdown pages |
//! | [`types`] | Post, comment, and API wire types |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`script`] | Event script parser for the `run` command |
//! | [`output`] | CLI status formatting |
//! | [`logging`] | `tracing-subscriber` setup for the binary |
//!
//! # Design Decisions
//!
//! ## Tickets Instead of Cancellation
//!
//! A fetch cannot be cancelled once issued. Every request the post browser
//! makes carries a [`source::Ticket`]; a completion is applied only if its
//! ticket matches the browser's current state and that state is still waiting
//! for it. Leaving the posts view drops the browser entirely, so nothing can
//! land on an unmounted view. The two detail fetches (post and comments) share
//! one ticket and the view becomes ready only when both have arrived.
//!
//! ## Store Passed Per Call
//!
//! Widgets never hold the store. The shell passes `&mut dyn KeyValueStore`
//! into each write, which keeps ownership in one place and lets every widget
//! be tested against a plain in-memory map.
//!
//! ## Fragment Is Not Updated for Detail Views
//!
//! Opening a post switches the browser to its detail state but leaves the
//! fragment at `#/posts`, matching the links the listing renders. A reload
//! returns to the listing.

pub mod app;
pub mod browser;
pub mod config;
pub mod location;
pub mod logging;
pub mod output;
pub mod pagination;
pub mod render;
pub mod router;
pub mod script;
pub mod source;
pub mod store;
pub mod types;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_helpers;

//! End-to-end tests through the public API.
//!
//! Drives [`App`] with an in-test post source and a file-backed store, the
//! same way the `run` command does, and checks both the state and the
//! rendered HTML.
//!
//! Run with: cargo test --test end_to_end

use hashnav::app::{App, UserEvent};
use hashnav::config::AppConfig;
use hashnav::location::Location;
use hashnav::router::ViewTag;
use hashnav::script::{self, Step};
use hashnav::source::{self, PostSource, SourceError};
use hashnav::store::{FileStore, KeyValueStore, MemoryStore};
use hashnav::types::{Comment, PostDetail, PostSummary};
use hashnav::widgets::Polarity;

/// Serves `count` posts with ids 1..=count and two comments per post.
struct ScriptedSource {
    count: u64,
}

impl PostSource for ScriptedSource {
    fn posts(&self) -> Result<Vec<PostSummary>, SourceError> {
        Ok((1..=self.count)
            .map(|id| PostSummary {
                id,
                title: format!("Title {id}"),
            })
            .collect())
    }

    fn post(&self, id: u64) -> Result<PostDetail, SourceError> {
        if id == 0 || id > self.count {
            return Err(SourceError::Status(404));
        }
        Ok(PostDetail {
            id,
            title: format!("Title {id}"),
            body: format!("Body {id}"),
        })
    }

    fn comments(&self, post_id: u64) -> Result<Vec<Comment>, SourceError> {
        Ok(vec![
            Comment {
                id: post_id * 10,
                body: "nice".into(),
                author: "Grace Hopper".into(),
            },
            Comment {
                id: post_id * 10 + 1,
                body: "agreed".into(),
                author: "Linus Torvalds".into(),
            },
        ])
    }
}

fn start(fragment: &str) -> App<MemoryStore, ScriptedSource> {
    App::start(
        AppConfig::default(),
        MemoryStore::new(),
        ScriptedSource { count: 23 },
        Location::new(fragment),
    )
}

#[test]
fn listing_paginates_23_posts() {
    let mut app = start("#/posts");
    assert!(app.render().into_string().contains("Loading..."));
    app.settle();

    let html = app.render().into_string();
    assert!(html.contains("Page 1 of 3"));
    assert!(html.contains("Title 10"));
    assert!(!html.contains("Title 11 "));
    assert!(html.contains(r#"<button data-page="0" disabled>Former</button>"#));
    assert!(html.contains(r#"<button data-page="2"> Next</button>"#));

    assert!(app.dispatch(UserEvent::GoToPage(3)));
    let pages = app
        .browser()
        .and_then(|b| b.listing())
        .and_then(|l| l.load().ready())
        .unwrap();
    assert_eq!(pages.current_items().len(), 3);
    assert!(!pages.has_next());
    assert!(pages.has_previous());

    let html = app.render().into_string();
    assert!(html.contains("Page 3 of 3"));
    assert!(html.contains(r#"<button data-page="4" disabled> Next</button>"#));
}

#[test]
fn detail_view_and_back() {
    let mut app = start("#/posts");
    app.settle();
    app.dispatch(UserEvent::GoToPage(2));
    app.dispatch(UserEvent::SelectPost(14));
    app.settle();

    let html = app.render().into_string();
    assert!(html.contains("<h3>Title 14</h3>"));
    assert!(html.contains("<strong>Grace Hopper</strong>: nice"));
    assert_eq!(app.fragment(), "#/posts");

    app.dispatch(UserEvent::Back);
    app.settle();
    let pages = app
        .browser()
        .and_then(|b| b.listing())
        .and_then(|l| l.load().ready())
        .unwrap();
    assert_eq!(pages.page_index(), 1);
}

#[test]
fn stale_listing_result_is_discarded() {
    let mut app = start("#/posts");
    let first = app.take_requests();

    app.navigate("#/contact");
    app.navigate("#/posts");
    let completion = source::execute(app.source(), first[0]);
    assert!(!app.deliver(completion));
    assert!(app.browser().unwrap().listing().unwrap().load().is_loading());

    app.settle();
    assert!(app.browser().unwrap().listing().unwrap().load().ready().is_some());
}

#[test]
fn stale_detail_result_is_discarded() {
    let mut app = start("#/posts");
    app.settle();
    app.dispatch(UserEvent::SelectPost(3));
    let detail = app.take_requests();
    assert_eq!(detail.len(), 2);

    app.dispatch(UserEvent::Back);
    for request in detail {
        let completion = source::execute(app.source(), request);
        assert!(!app.deliver(completion));
    }
    assert!(app.browser().unwrap().listing().is_some());
}

#[test]
fn unknown_routes_and_titles() {
    let mut app = start("");
    assert_eq!(app.title(), "Home - App");
    app.navigate("#/missing");
    assert_eq!(app.route().view, ViewTag::NotFound);
    assert!(app.render().into_string().contains("<title>Page not found - App</title>"));
    app.navigate("#/about");
    assert_eq!(app.title(), "About - App");
}

#[test]
fn widgets_persist_across_restarts() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let mut app = App::start(
        AppConfig::default(),
        FileStore::open(&path),
        ScriptedSource { count: 0 },
        Location::new("#/"),
    );
    app.dispatch(UserEvent::EditDraft("first!".into()));
    app.dispatch(UserEvent::SubmitComment);
    app.dispatch(UserEvent::Like);
    app.dispatch(UserEvent::Like);
    app.dispatch(UserEvent::Dislike);
    app.shutdown();

    let reopened = FileStore::open(&path);
    assert_eq!(reopened.get("likeCount").as_deref(), Some("2"));

    let app = App::start(
        AppConfig::default(),
        reopened,
        ScriptedSource { count: 0 },
        Location::new("#/"),
    );
    assert_eq!(app.comment_box().comments(), ["first!".to_string()]);
    assert_eq!(app.counter(Polarity::Like).count(), 2);
    assert_eq!(app.counter(Polarity::Dislike).count(), 1);
}

#[test]
fn replaying_a_script() {
    let steps = script::parse("#/posts\npage 2\nopen 12\ncomment hello\nlike\n").unwrap();
    let mut app = start("#/");
    for step in steps {
        match step {
            Step::Navigate(fragment) => app.navigate(&fragment),
            Step::Events(events) => {
                for event in events {
                    app.dispatch(event);
                }
            }
        }
        app.settle();
    }

    let viewing = app.browser().unwrap().viewing().unwrap();
    assert_eq!(viewing.post_id(), 12);
    assert_eq!(viewing.load().ready().unwrap().comments.len(), 2);
    assert_eq!(app.comment_box().comments().len(), 1);
    assert_eq!(app.counter(Polarity::Like).count(), 1);
}

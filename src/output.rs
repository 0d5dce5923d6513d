//! CLI output formatting.
//!
//! Each `format_*` function is pure and returns lines for testability; the
//! `print_*` wrappers write them to stdout.
//!
//! # Status Format
//!
//! ```text
//! Posts - App  [#/posts]
//!     Page 1 of 3 (23 posts)
//!     001 Post 1  (#1)
//!     002 Post 2  (#2)
//!     ...
//!     [Former disabled] [Next]
//! Sidebar
//!     Comments: 2
//!     Like: 4  Dislike: 1
//! ```
//!
//! The listing index is the 1-based position on the current page; the id in
//! parentheses is what `open <id>` takes.

use crate::app::App;
use crate::browser::{BrowserState, Load};
use crate::source::PostSource;
use crate::store::KeyValueStore;
use crate::widgets::Polarity;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn control(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("[{label} disabled]")
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

/// Lines describing the app's current state.
pub fn format_status<S: KeyValueStore, P: PostSource>(app: &App<S, P>) -> Vec<String> {
    let mut lines = vec![format!("{}  [{}]", app.title(), app.fragment())];

    if let Some(browser) = app.browser() {
        match browser.state() {
            BrowserState::Listing(listing) => match listing.load() {
                Load::Loading => lines.push(format!("{}Loading...", indent(1))),
                Load::Failed => lines.push(format!("{}Error loading posts!", indent(1))),
                Load::Ready(pages) => {
                    lines.push(format!(
                        "{}Page {} of {} ({} posts)",
                        indent(1),
                        pages.page_index(),
                        pages.total_pages(),
                        pages.total_items()
                    ));
                    for (pos, post) in pages.current_items().iter().enumerate() {
                        lines.push(format!(
                            "{}{} {}  (#{})",
                            indent(1),
                            format_index(pos + 1),
                            post.title,
                            post.id
                        ));
                    }
                    lines.push(format!(
                        "{}{} {}",
                        indent(1),
                        control("Former", pages.has_previous()),
                        control("Next", pages.has_next())
                    ));
                }
            },
            BrowserState::Viewing(viewing) => match viewing.load() {
                Load::Loading => lines.push(format!("{}Loading...", indent(1))),
                Load::Failed => lines.push(format!("{}Error loading post!", indent(1))),
                Load::Ready(page) => {
                    lines.push(format!("{}{}  (#{})", indent(1), page.post.title, page.post.id));
                    lines.push(format!("{}{}", indent(2), truncate(&page.post.body, 72)));
                    lines.push(format!("{}Comments: {}", indent(1), page.comments.len()));
                    for comment in &page.comments {
                        lines.push(format!(
                            "{}{}: {}",
                            indent(2),
                            comment.author,
                            truncate(&comment.body, 60)
                        ));
                    }
                }
            },
        }
    }

    lines.push("Sidebar".to_string());
    lines.push(format!(
        "{}Comments: {}",
        indent(1),
        app.comment_box().comments().len()
    ));
    lines.push(format!(
        "{}Like: {}  Dislike: {}",
        indent(1),
        app.counter(Polarity::Like).count(),
        app.counter(Polarity::Dislike).count()
    ));
    lines
}

pub fn print_status<S: KeyValueStore, P: PostSource>(app: &App<S, P>) {
    for line in format_status(app) {
        println!("{}", line);
    }
}

/// Lines listing every stored user comment.
pub fn format_comments(comments: &[String]) -> Vec<String> {
    if comments.is_empty() {
        return vec!["No comments".to_string()];
    }
    let mut lines = vec![format!("Comments ({})", comments.len())];
    for (pos, comment) in comments.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(pos + 1), comment));
    }
    lines
}

pub fn print_comments(comments: &[String]) {
    for line in format_comments(comments) {
        println!("{}", line);
    }
}

//! Shared test utilities: an in-memory post source and data builders.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let source = FixtureSource::with_posts(23);
//! let mut app = App::start(AppConfig::default(), MemoryStore::new(), source, Location::new("#/posts"));
//! app.settle();
//! ```

use std::cell::Cell;

use crate::source::{PostSource, SourceError};
use crate::types::{Comment, PostDetail, PostSummary};

/// `n` post summaries with ids `1..=n` and titles `"Post {id}"`.
pub fn sample_posts(n: usize) -> Vec<PostSummary> {
    (1..=n as u64)
        .map(|id| PostSummary {
            id,
            title: format!("Post {id}"),
        })
        .collect()
}

/// In-memory [`PostSource`] with switchable failures and call counting.
///
/// Every post has a body `"Body of post {id}"` and two comments.
#[derive(Debug, Default)]
pub struct FixtureSource {
    count: usize,
    fail_posts: bool,
    fail_post: bool,
    fail_comments: bool,
    calls: Cell<usize>,
}

impl FixtureSource {
    pub fn with_posts(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// `posts()` fails.
    pub fn failing_posts(mut self) -> Self {
        self.fail_posts = true;
        self
    }

    /// `post(id)` fails.
    pub fn failing_posts_detail(mut self) -> Self {
        self.fail_post = true;
        self
    }

    /// `comments(id)` fails.
    pub fn failing_comments(mut self) -> Self {
        self.fail_comments = true;
        self
    }

    /// Total number of source calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn record(&self) {
        self.calls.set(self.calls.get() + 1);
    }

    fn known(&self, id: u64) -> Result<(), SourceError> {
        if id == 0 || id > self.count as u64 {
            return Err(SourceError::Status(404));
        }
        Ok(())
    }
}

impl PostSource for FixtureSource {
    fn posts(&self) -> Result<Vec<PostSummary>, SourceError> {
        self.record();
        if self.fail_posts {
            return Err(SourceError::Unavailable("posts offline".into()));
        }
        Ok(sample_posts(self.count))
    }

    fn post(&self, id: u64) -> Result<PostDetail, SourceError> {
        self.record();
        if self.fail_post {
            return Err(SourceError::Unavailable("post offline".into()));
        }
        self.known(id)?;
        Ok(PostDetail {
            id,
            title: format!("Post {id}"),
            body: format!("Body of post {id}"),
        })
    }

    fn comments(&self, post_id: u64) -> Result<Vec<Comment>, SourceError> {
        self.record();
        if self.fail_comments {
            return Err(SourceError::Unavailable("comments offline".into()));
        }
        self.known(post_id)?;
        Ok(vec![
            Comment {
                id: post_id * 100 + 1,
                body: format!("First on {post_id}"),
                author: "Ada Lovelace".into(),
            },
            Comment {
                id: post_id * 100 + 2,
                body: format!("Second on {post_id}"),
                author: "Alan Turing".into(),
            },
        ])
    }
}

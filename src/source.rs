//! Remote post source.
//!
//! [`PostSource`] is the boundary to the read-only posts API. The post
//! browser never calls it directly: it emits [`FetchRequest`]s, the shell
//! runs them through [`execute`], and the resulting [`FetchCompletion`]s are
//! fed back into the browser. Every request carries the [`Ticket`] of the
//! state that issued it so late results can be recognized and dropped.
//!
//! ## Endpoints
//!
//! ```text
//! GET {base}/posts                →  { posts: [{ id, title, body, ... }] }
//! GET {base}/posts/{id}           →  { id, title, body, ... }
//! GET {base}/posts/{id}/comments  →  { comments: [{ id, body, user: { fullName } }] }
//! ```
//!
//! Non-2xx statuses and undecodable bodies are both errors; callers treat
//! every [`SourceError`] the same way.

use crate::types::{CommentCollection, PostCollection, WirePost};
use crate::types::{Comment, PostDetail, PostSummary};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Read-only provider of posts and comments.
pub trait PostSource {
    fn posts(&self) -> Result<Vec<PostSummary>, SourceError>;
    fn post(&self, id: u64) -> Result<PostDetail, SourceError>;
    fn comments(&self, post_id: u64) -> Result<Vec<Comment>, SourceError>;
}

// =============================================================================
// Requests and completions
// =============================================================================

/// Identity of an outstanding fetch. Issued from a [`TicketCounter`], so two
/// tickets from the same counter never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic ticket issuer. The shell owns one for its whole lifetime so
/// tickets stay unique across post browser mounts.
#[derive(Debug, Default)]
pub struct TicketCounter {
    next: u64,
}

impl TicketCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Ticket {
        self.next += 1;
        Ticket(self.next)
    }
}

/// What to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Posts,
    Post(u64),
    Comments(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: Ticket,
    pub kind: FetchKind,
}

/// Outcome of one [`FetchRequest`].
#[derive(Debug)]
pub enum FetchResult {
    Posts(Result<Vec<PostSummary>, SourceError>),
    Post(Result<PostDetail, SourceError>),
    Comments(Result<Vec<Comment>, SourceError>),
}

impl FetchResult {
    pub fn is_ok(&self) -> bool {
        match self {
            Self::Posts(r) => r.is_ok(),
            Self::Post(r) => r.is_ok(),
            Self::Comments(r) => r.is_ok(),
        }
    }
}

#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: Ticket,
    pub result: FetchResult,
}

/// Run one request against a source.
pub fn execute(source: &dyn PostSource, request: FetchRequest) -> FetchCompletion {
    let result = match request.kind {
        FetchKind::Posts => FetchResult::Posts(source.posts()),
        FetchKind::Post(id) => FetchResult::Post(source.post(id)),
        FetchKind::Comments(id) => FetchResult::Comments(source.comments(id)),
    };
    if !result.is_ok() {
        tracing::debug!(ticket = request.ticket.value(), kind = ?request.kind, "fetch failed");
    }
    FetchCompletion {
        ticket: request.ticket,
        result,
    }
}

// =============================================================================
// HTTP source
// =============================================================================

/// [`PostSource`] backed by the HTTP JSON API.
///
/// No request timeout is configured: a request runs until the server answers
/// or the connection fails.
pub struct HttpPostSource {
    client: Client,
    base_url: String,
}

impl HttpPostSource {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(None).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, format!("hashnav/{}", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .send()?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl PostSource for HttpPostSource {
    fn posts(&self) -> Result<Vec<PostSummary>, SourceError> {
        let collection: PostCollection = self.get_json("/posts")?;
        Ok(collection.posts.into_iter().map(Into::into).collect())
    }

    fn post(&self, id: u64) -> Result<PostDetail, SourceError> {
        let post: WirePost = self.get_json(&format!("/posts/{id}"))?;
        Ok(post.into())
    }

    fn comments(&self, post_id: u64) -> Result<Vec<Comment>, SourceError> {
        let collection: CommentCollection = self.get_json(&format!("/posts/{post_id}/comments"))?;
        Ok(collection.comments.into_iter().map(Into::into).collect())
    }
}

//! Post and comment types shared by the source, browser, and renderer.
//!
//! The wire structs mirror the JSON the posts API returns and are only used
//! by [`crate::source`]. Everything past the source boundary works with the
//! narrowed domain types, which carry just the fields a view needs.

use serde::{Deserialize, Serialize};

/// A post as shown in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: u64,
    pub title: String,
}

/// A single post as shown in the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: u64,
    pub title: String,
    pub body: String,
}

/// A comment attached to a post, with the author's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub body: String,
    pub author: String,
}

// =============================================================================
// Wire shapes
// =============================================================================

/// `GET /posts` response. Extra fields (`total`, `skip`, `limit`, ...) are
/// ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct PostCollection {
    pub posts: Vec<WirePost>,
}

/// `GET /posts/{id}` response, and each element of [`PostCollection::posts`].
#[derive(Debug, Deserialize)]
pub(crate) struct WirePost {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// `GET /posts/{id}/comments` response.
#[derive(Debug, Deserialize)]
pub(crate) struct CommentCollection {
    pub comments: Vec<WireComment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireComment {
    pub id: u64,
    pub body: String,
    pub user: WireUser,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUser {
    #[serde(rename = "fullName")]
    pub full_name: String,
}

impl From<WirePost> for PostSummary {
    fn from(post: WirePost) -> Self {
        Self {
            id: post.id,
            title: post.title,
        }
    }
}

impl From<WirePost> for PostDetail {
    fn from(post: WirePost) -> Self {
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
        }
    }
}

impl From<WireComment> for Comment {
    fn from(comment: WireComment) -> Self {
        Self {
            id: comment.id,
            body: comment.body,
            author: comment.user.full_name,
        }
    }
}

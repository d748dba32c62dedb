//! Blog post records and their external (wire) representation.
//!
//! The stored shape keeps the author as a first/last name pair; callers only
//! ever see the rendered [`PostView`], where the author is one string.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-assigned post identifier.
///
/// A time-ordered UUIDv7; the text form is the hyphenated UUID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

/// An id string that does not have the shape of a [`PostId`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed post id: {0:?}")]
pub struct MalformedId(pub String);

impl FromStr for PostId {
    type Err = MalformedId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|_| MalformedId(s.to_owned()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self { first_name: first_name.into(), last_name: last_name.into() }
    }

    /// `"<first> <last>"`, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_owned()
    }
}

/// A validated post that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPost {
    pub author: Author,
    pub title: String,
    pub content: String,
    /// Defaults to the insertion time when absent.
    pub created: Option<DateTime<Utc>>,
}

/// A stored post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlogPost {
    pub id: PostId,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    pub fn new(id: PostId, post: NewPost, now: DateTime<Utc>) -> Self {
        Self {
            id,
            author: post.author,
            title: post.title,
            content: post.content,
            created: post.created.unwrap_or(now),
        }
    }

    /// The external representation. Every read path goes through here.
    pub fn view(&self) -> PostView {
        PostView {
            id: self.id,
            author: self.author.full_name(),
            title: self.title.clone(),
            content: self.content.clone(),
            created: self.created,
        }
    }
}

/// What callers see for a single post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    pub id: PostId,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

/// Body of `GET /posts`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostList {
    pub posts: Vec<PostView>,
}

//! Request schema for `POST /posts`.
//!
//! Every field is optional at the serde level so that a missing field
//! reaches [`CreatePost::validate`] and gets reported by name, instead of
//! surfacing as a generic decode error.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::{Author, NewPost};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub author: Option<AuthorInput>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A required field of the create request, in the order they are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Title,
    Content,
}

impl Field {
    /// The field's path in the request body.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "author.firstName",
            Self::LastName  => "author.lastName",
            Self::Title     => "title",
            Self::Content   => "content",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CreatePost {
    /// Checks required fields and produces a storable post, or the first
    /// field that is missing or blank.
    pub fn validate(self) -> Result<NewPost, Field> {
        let author = self.author.unwrap_or_default();
        let first_name = required(author.first_name, Field::FirstName)?;
        let last_name = required(author.last_name, Field::LastName)?;
        let title = required(self.title, Field::Title)?;
        let content = required(self.content, Field::Content)?;

        Ok(NewPost {
            author: Author { first_name, last_name },
            title,
            content,
            created: self.created,
        })
    }
}

fn required(value: Option<String>, field: Field) -> Result<String, Field> {
    value.filter(|v| !v.trim().is_empty()).ok_or(field)
}

//! Shared fixtures: random posts, seeding, and in-process requests.

#![allow(dead_code)]

use std::sync::Arc;

use bytes::Bytes;
use chrono::{Duration, Utc};
use http::Method;
use quill::model::{Author, NewPost};
use quill::store::{MemoryStore, PostStore, SharedStore};
use quill::{PostsApi, Response, Router};
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};

const FIRST_NAMES: &[&str] = &["Ada", "Alan", "Barbara", "Edsger", "Grace", "Ken", "Margaret", "Niklaus"];
const LAST_NAMES: &[&str] = &["Lovelace", "Turing", "Liskov", "Dijkstra", "Hopper", "Thompson", "Hamilton", "Wirth"];
const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "amet", "consectetur", "adipiscing", "elit", "sed", "tempor",
    "incididunt", "labore", "dolore", "magna", "aliqua", "veniam", "nostrud", "ullamco",
];

fn pick(words: &[&'static str]) -> &'static str {
    words.choose(&mut rand::thread_rng()).copied().unwrap_or("lorem")
}

fn sentence() -> String {
    let len = rand::thread_rng().gen_range(4..10);
    let mut s = (0..len).map(|_| pick(WORDS)).collect::<Vec<_>>().join(" ");
    s[..1].make_ascii_uppercase();
    s.push('.');
    s
}

/// A random valid post: author name, one title word, a three-sentence
/// paragraph, a timestamp within the last day.
pub fn new_post() -> NewPost {
    let minutes = rand::thread_rng().gen_range(1..24 * 60);
    NewPost {
        author: Author::new(pick(FIRST_NAMES), pick(LAST_NAMES)),
        title: pick(WORDS).to_owned(),
        content: (0..3).map(|_| sentence()).collect::<Vec<_>>().join(" "),
        created: Some(Utc::now() - Duration::minutes(minutes)),
    }
}

/// The JSON body `POST /posts` expects for `post`.
pub fn create_body(post: &NewPost) -> Value {
    json!({
        "author": { "firstName": post.author.first_name, "lastName": post.author.last_name },
        "title": post.title,
        "content": post.content,
    })
}

pub struct TestApp {
    pub store: SharedStore,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store: SharedStore = Arc::new(MemoryStore::named("test"));
        let router = PostsApi::new(Arc::clone(&store)).router();
        Self { store, router }
    }

    /// Inserts `n` random posts straight into the store.
    pub async fn seed(&self, n: usize) {
        let posts = (0..n).map(|_| new_post()).collect();
        self.store.insert_many(posts).await.unwrap();
    }

    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Response {
        let body = match body {
            Some(v) => Bytes::from(serde_json::to_vec(&v).unwrap()),
            None => Bytes::new(),
        };
        let req = http::Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        self.router.handle(req).await
    }

    pub async fn count(&self) -> usize {
        self.store.count().await.unwrap()
    }
}

pub fn json_body(res: &Response) -> Value {
    serde_json::from_slice(res.body()).unwrap()
}

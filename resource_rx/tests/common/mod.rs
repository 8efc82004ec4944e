#![allow(dead_code)]

use resource_rx::{MergeParams, Resource, ResourceError};
use tracing_subscriber::EnvFilter;

/// Routes the crate's logs to the test output. `RUST_LOG=resource_rx=debug`
/// shows settlements and discarded fetches; silent by default.
pub fn tracing_init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// Query parameters of the article listing used across the integration tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArticleQuery {
    pub author: Option<String>,
    pub page: u32,
}

impl MergeParams for ArticleQuery {
    fn merged(self, overrides: Self) -> Self {
        ArticleQuery {
            author: overrides.author.or(self.author),
            page: if overrides.page == 0 { self.page } else { overrides.page },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Article {
    pub id: u64,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArticleMeta {
    Total(usize),
    Failed(ResourceError),
}

impl From<ResourceError> for ArticleMeta {
    fn from(error: ResourceError) -> Self {
        ArticleMeta::Failed(error)
    }
}

pub type ArticleResource = Resource<Vec<Article>, ArticleQuery, ArticleMeta>;

pub fn query_by(author: &str) -> ArticleQuery {
    ArticleQuery {
        author: Some(author.to_string()),
        page: 1,
    }
}

pub fn page(page: u32) -> ArticleQuery {
    ArticleQuery { author: None, page }
}

pub fn articles(titles: &[&str]) -> Vec<Article> {
    titles
        .iter()
        .zip(1..)
        .map(|(title, id)| Article {
            id,
            title: title.to_string(),
        })
        .collect()
}

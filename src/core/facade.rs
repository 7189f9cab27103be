use crate::core::query::Pagination;
use crate::error::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

/// GitLab caps `per_page` at 100.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// One response of a paged list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Value of `X-Next-Page`; `None` on the last page.
    pub next_page: Option<u32>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next_page: None }
    }
}

/// The authenticated HTTP + JSON layer every resource client goes through.
///
/// Paths are relative to the API root (`/projects/1/merge_requests`).
#[async_trait]
pub trait HttpFacade: Send + Sync {
    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Send;

    async fn get_page<T>(&self, path: &str, page: Pagination) -> Result<Page<T>>
    where
        T: DeserializeOwned + Send;

    /// Walks every page of `path` and returns the items in server order.
    async fn get_paged_list<T>(&self, path: &str, per_page: u32) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let current: Page<T> = self.get_page(path, Pagination { page, per_page }).await?;

            debug!("{path}: page {page} returned {} items", current.items.len());
            items.extend(current.items);

            // never walk backwards, a misbehaving server must not loop us forever
            match current.next_page {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        Ok(items)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send;

    async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send;

    async fn delete(&self, path: &str) -> Result<()>;
}

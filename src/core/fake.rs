//! Recording stand-in for the HTTP facade, used by the resource client tests.

use crate::core::facade::{HttpFacade, Page};
use crate::core::query::Pagination;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(String),
    GetPage(String, Pagination),
    Post(String, Value),
    Put(String, Value),
    Delete(String),
}

impl Call {
    pub fn path(&self) -> &str {
        match self {
            Call::Get(p) | Call::GetPage(p, _) | Call::Post(p, _) | Call::Put(p, _) | Call::Delete(p) => p,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Page(Value, Option<u32>),
    Status(u16, String),
    Empty,
}

#[derive(Default)]
pub struct FakeFacade {
    calls: Mutex<Vec<Call>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl FakeFacade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Reply {
        self.calls.lock().unwrap().push(call.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no reply queued for {call:?}"))
    }
}

fn decode<T: DeserializeOwned>(reply: Reply) -> Result<T> {
    match reply {
        Reply::Json(v) | Reply::Page(v, _) => serde_json::from_value(v).map_err(Error::from),
        Reply::Status(status, message) => Err(Error::Api { status, message }),
        Reply::Empty => serde_json::from_value(Value::Null).map_err(Error::from),
    }
}

#[async_trait]
impl HttpFacade for FakeFacade {
    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        decode(self.record(Call::Get(path.to_owned())))
    }

    async fn get_page<T>(&self, path: &str, page: Pagination) -> Result<Page<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.record(Call::GetPage(path.to_owned(), page)) {
            Reply::Page(v, next_page) => Ok(Page {
                items: serde_json::from_value(v)?,
                next_page,
            }),
            other => decode(other).map(Page::last),
        }
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let body = serde_json::to_value(body)?;
        decode(self.record(Call::Post(path.to_owned(), body)))
    }

    async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let body = serde_json::to_value(body)?;
        decode(self.record(Call::Put(path.to_owned(), body)))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        match self.record(Call::Delete(path.to_owned())) {
            Reply::Status(status, message) => Err(Error::Api { status, message }),
            _ => Ok(()),
        }
    }
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn paged_list_follows_next_page() {
        let fake = FakeFacade::new()
            .reply(Reply::Page(serde_json::json!([1, 2]), Some(2)))
            .reply(Reply::Page(serde_json::json!([3]), Some(3)))
            .reply(Reply::Page(serde_json::json!([4, 5]), None));

        let items: Vec<u32> = fake.get_paged_list("/merge_requests", 2).await.unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            fake.calls(),
            vec![
                Call::GetPage("/merge_requests".into(), Pagination { page: 1, per_page: 2 }),
                Call::GetPage("/merge_requests".into(), Pagination { page: 2, per_page: 2 }),
                Call::GetPage("/merge_requests".into(), Pagination { page: 3, per_page: 2 }),
            ]
        );
    }

    #[tokio::test]
    async fn paged_list_stops_when_next_page_goes_backwards() {
        let fake = FakeFacade::new()
            .reply(Reply::Page(serde_json::json!([1]), Some(2)))
            .reply(Reply::Page(serde_json::json!([2]), Some(1)));

        let items: Vec<u32> = fake.get_paged_list("/merge_requests", 1).await.unwrap();

        assert_eq!(items, vec![1, 2]);
        assert_eq!(fake.calls().len(), 2);
    }

    #[tokio::test]
    async fn paged_list_propagates_api_error() {
        let fake = FakeFacade::new()
            .reply(Reply::Page(serde_json::json!([1]), Some(2)))
            .reply(Reply::Status(500, "Internal Server Error".into()));

        let err = fake.get_paged_list::<u32>("/merge_requests", 1).await.unwrap_err();

        assert_eq!(err.status(), Some(500));
    }
}

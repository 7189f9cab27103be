use url::form_urlencoded;

/// Anything that knows how to lay itself out as query parameters.
pub trait ToQuery {
    fn to_query(&self, pairs: &mut QueryPairs);
}

impl ToQuery for () {
    fn to_query(&self, _pairs: &mut QueryPairs) {}
}

impl<T: ToQuery + ?Sized> ToQuery for &T {
    fn to_query(&self, pairs: &mut QueryPairs) {
        (**self).to_query(pairs)
    }
}

/// Ordered `key=value` collector. Order of insertion is the order in the url.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryPairs {
    pairs: Vec<(String, String)>,
}

impl QueryPairs {
    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((key.to_owned(), value.to_string()));
        self
    }

    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// GitLab takes multi-valued filters (labels) as a single comma separated value.
    pub fn push_list<V: AsRef<str>>(&mut self, key: &str, values: &[V]) -> &mut Self {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .join(",");
            self.push(key, joined);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, String)> {
        self.pairs.iter()
    }
}

/// Page cursor appended by the facade when walking a paged list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl ToQuery for Pagination {
    fn to_query(&self, pairs: &mut QueryPairs) {
        pairs.push("page", self.page).push("per_page", self.per_page);
    }
}

/// Appends the serialized `options` to `base_path`.
pub fn build_query<Q: ToQuery + ?Sized>(base_path: &str, options: &Q) -> String {
    let mut pairs = QueryPairs::default();
    options.to_query(&mut pairs);

    if pairs.is_empty() {
        return base_path.to_owned();
    }

    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter())
        .finish();

    let separator = if base_path.contains('?') { '&' } else { '?' };

    format!("{base_path}{separator}{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Filters {
        state: Option<&'static str>,
        labels: Vec<&'static str>,
        search: Option<&'static str>,
    }

    impl ToQuery for Filters {
        fn to_query(&self, pairs: &mut QueryPairs) {
            pairs
                .push_opt("state", self.state)
                .push_list("labels", &self.labels)
                .push_opt("search", self.search);
        }
    }

    #[test]
    fn empty_options_leave_path_untouched() {
        assert_eq!(build_query("/merge_requests", &()), "/merge_requests");

        let filters = Filters { state: None, labels: vec![], search: None };
        assert_eq!(build_query("/merge_requests", &filters), "/merge_requests");
    }

    #[test]
    fn present_fields_only() {
        let filters = Filters {
            state: Some("opened"),
            labels: vec!["bug", "backend"],
            search: None,
        };

        assert_eq!(
            build_query("/merge_requests", &filters),
            "/merge_requests?state=opened&labels=bug%2Cbackend"
        );
    }

    #[test]
    fn values_are_encoded() {
        let filters = Filters {
            state: None,
            labels: vec![],
            search: Some("fix & test"),
        };

        assert_eq!(
            build_query("/merge_requests", &filters),
            "/merge_requests?search=fix+%26+test"
        );
    }

    #[test]
    fn existing_query_is_continued() {
        let page = Pagination { page: 2, per_page: 50 };

        assert_eq!(
            build_query("/merge_requests?state=opened", &page),
            "/merge_requests?state=opened&page=2&per_page=50"
        );
    }
}

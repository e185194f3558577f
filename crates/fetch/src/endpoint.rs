use holonet_model::ResourceKind;

/// Collection endpoint for one resource: `<base>/<resource>/[?search=<query>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEndpoint {
    base: String,
    resource: String,
}

impl CollectionEndpoint {
    #[must_use]
    pub fn new(api_base: &str, resource: impl Into<String>) -> Self {
        Self {
            base: api_base.trim_end_matches('/').to_string(),
            resource: resource.into().trim_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn for_kind(api_base: &str, kind: ResourceKind) -> Self {
        Self::new(api_base, kind.path())
    }

    /// Unfiltered listing address
    #[must_use]
    pub fn root(&self) -> String {
        format!("{}/{}/", self.base, self.resource)
    }

    /// Listing address for `query`; an empty query means no filter.
    #[must_use]
    pub fn url_for(&self, query: &str) -> String {
        let mut url = self.root();
        if !query.is_empty() {
            url.push_str("?search=");
            url.push_str(&urlencoding::encode(query));
        }
        url
    }
}

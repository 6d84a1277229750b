//! Entry query builder and validation.

use super::ContentfulError;

/// Include depth the Delivery API applies when none is given.
pub const DEFAULT_INCLUDE: u8 = 1;

/// Maximum include depth accepted by the Delivery API.
pub const MAX_INCLUDE: u8 = 10;

/// Maximum page size accepted by the Delivery API.
pub const MAX_LIMIT: u32 = 1000;

/// Parameters for `GET /entries`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryQuery {
    pub content_type: String,
    /// `(field, value)` equality filters, sent as `fields.<field>=<value>`.
    pub filters: Vec<(String, String)>,
    /// Sort keys, e.g. `-sys.createdAt`. Joined with commas.
    pub order: Vec<String>,
    pub include: u8,
    pub limit: Option<u32>,
}

impl EntryQuery {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            filters: Vec::new(),
            order: Vec::new(),
            include: DEFAULT_INCLUDE,
            limit: None,
        }
    }

    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, key: impl Into<String>) -> Self {
        self.order.push(key.into());
        self
    }

    pub fn include(mut self, depth: u8) -> Self {
        self.include = depth;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Validate the query parameters.
    ///
    /// Returns an error if any parameters are out of range or empty.
    pub fn validate(&self) -> Result<(), ContentfulError> {
        if self.content_type.trim().is_empty() {
            return Err(ContentfulError::InvalidQuery("content type cannot be empty".to_string()));
        }

        if self.include > MAX_INCLUDE {
            return Err(ContentfulError::InvalidQuery(format!(
                "include depth {} exceeds {}",
                self.include, MAX_INCLUDE
            )));
        }

        if let Some(limit) = self.limit
            && !(1..=MAX_LIMIT).contains(&limit)
        {
            return Err(ContentfulError::InvalidQuery(format!("limit must be 1-{MAX_LIMIT}")));
        }

        if let Some((field, _)) = self.filters.iter().find(|(field, _)| field.is_empty()) {
            return Err(ContentfulError::InvalidQuery(format!("empty filter field name: {field:?}")));
        }

        Ok(())
    }

    /// Query string pairs in a stable order.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("content_type".to_string(), self.content_type.clone())];

        for (field, value) in &self.filters {
            params.push((format!("fields.{field}"), value.clone()));
        }

        if !self.order.is_empty() {
            params.push(("order".to_string(), self.order.join(",")));
        }

        params.push(("include".to_string(), self.include.to_string()));

        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_query() {
        let query = EntryQuery::new("blogPost").order_by("-sys.createdAt").include(2).limit(10);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_empty_content_type() {
        assert!(matches!(EntryQuery::new(" ").validate(), Err(ContentfulError::InvalidQuery(_))));
    }

    #[test]
    fn test_include_too_deep() {
        let query = EntryQuery::new("photo").include(11);
        assert!(matches!(query.validate(), Err(ContentfulError::InvalidQuery(_))));
    }

    #[test]
    fn test_limit_bounds() {
        assert!(EntryQuery::new("photo").limit(0).validate().is_err());
        assert!(EntryQuery::new("photo").limit(1001).validate().is_err());
        assert!(EntryQuery::new("photo").limit(1000).validate().is_ok());
    }

    #[test]
    fn test_params() {
        let query = EntryQuery::new("photo")
            .field_eq("slug", "bison-fog")
            .order_by("-fields.dateTaken")
            .order_by("-sys.createdAt")
            .limit(1);

        assert_eq!(
            query.to_params(),
            vec![
                ("content_type".to_string(), "photo".to_string()),
                ("fields.slug".to_string(), "bison-fog".to_string()),
                ("order".to_string(), "-fields.dateTaken,-sys.createdAt".to_string()),
                ("include".to_string(), "1".to_string()),
                ("limit".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_defaults() {
        let params = EntryQuery::new("park").to_params();
        assert!(!params.iter().any(|(k, _)| k == "order" || k == "limit"));
        assert!(params.contains(&("include".to_string(), DEFAULT_INCLUDE.to_string())));
    }
}

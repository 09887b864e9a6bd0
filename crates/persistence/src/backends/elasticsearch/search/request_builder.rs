//! Elasticsearch Query DSL builder.
//!
//! Translates a [`ListLogsQuery`] into a [`SearchRequest`].

use serde_json::{Map, Value, json};

use crate::core::SearchRequest;
use crate::error::ConfigurationError;
use crate::tenant::TenantId;
use crate::types::{Dimension, ListLogsQuery, SortField, SortSpec, TimeRange};

use super::super::config::{SearchSettings, TENANT_PLACEHOLDER};

/// Builds Elasticsearch search requests for log listings.
///
/// The builder holds only settings, so one instance can serve every request.
#[derive(Debug, Clone)]
pub struct SearchBuilder {
    index_pattern: String,
    timestamp_field: String,
    dimensions_field: String,
    region: Option<String>,
}

impl SearchBuilder {
    /// Creates a builder, rejecting settings that could never produce a
    /// tenant-scoped index.
    pub fn new(settings: &SearchSettings) -> Result<Self, ConfigurationError> {
        settings.validate()?;

        Ok(Self {
            index_pattern: settings.index_pattern.clone(),
            timestamp_field: settings.timestamp_field.clone(),
            dimensions_field: settings.dimensions_field.clone(),
            region: settings.region.clone(),
        })
    }

    /// Returns the index name for a tenant.
    pub fn index_name(&self, tenant_id: &TenantId) -> Result<String, ConfigurationError> {
        if tenant_id.is_empty() {
            return Err(ConfigurationError::EmptyTenant);
        }
        Ok(self
            .index_pattern
            .replace(TENANT_PLACEHOLDER, tenant_id.as_str()))
    }

    /// Builds the search request for a query.
    pub fn build(&self, query: &ListLogsQuery) -> Result<SearchRequest, ConfigurationError> {
        let index_name = self.index_name(&query.tenant_id)?;

        let mut filter_clauses = Vec::new();

        if let Some(ref region) = self.region {
            filter_clauses.push(json!({ "term": { "region": region } }));
        }

        if let Some(ref dimensions) = query.dimensions {
            filter_clauses.extend(dimensions.iter().map(|d| self.dimension_clause(d)));
        }

        if let Some(range) = self.range_clause(&query.time_range) {
            filter_clauses.push(range);
        }

        let sort_clauses = query
            .sort_by
            .as_ref()
            .map(|specs| specs.iter().map(|s| self.sort_clause(s)).collect());

        Ok(SearchRequest {
            index_name,
            size: query.limit,
            from: query.offset.filter(|&offset| offset > 0),
            filter_clauses,
            sort_clauses,
        })
    }

    fn dimension_field(&self, name: &str) -> String {
        format!("{}.{}", self.dimensions_field, name)
    }

    fn dimension_clause(&self, dimension: &Dimension) -> Value {
        let field = self.dimension_field(&dimension.name);
        match dimension.values {
            Some(ref values) => json!({ "terms": { field: values } }),
            None => json!({ "exists": { "field": field } }),
        }
    }

    fn range_clause(&self, range: &TimeRange) -> Option<Value> {
        if range.is_unbounded() {
            return None;
        }

        let mut bounds = Map::new();
        if let Some(start) = range.start() {
            bounds.insert("gte".to_string(), json!(start));
        }
        if let Some(end) = range.end() {
            bounds.insert("lte".to_string(), json!(end));
        }
        bounds.insert("format".to_string(), json!("epoch_second"));

        Some(json!({ "range": { self.timestamp_field.as_str(): bounds } }))
    }

    fn sort_clause(&self, spec: &SortSpec) -> Value {
        let field = match spec.field {
            SortField::Timestamp => self.timestamp_field.as_str(),
        };
        json!({ field: { "order": spec.direction.as_str() } })
    }
}

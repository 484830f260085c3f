//! Filter and ordering builders for mesh searches.
//!
//! These only render to the wire syntax (Mongo-style JSON for filters,
//! `{"field": 1}` maps for ordering); anything producing the same strings
//! can stand in for them.

use serde_json::{Map, Value};

fn object(field: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(field.to_string(), value);
    Value::Object(map)
}

fn comparison(field: &str, operator: &str, value: Value) -> Value {
    object(field, object(operator, value))
}

/// A filter predicate over mesh documents.
#[derive(Debug, Clone)]
pub struct Filter {
    value: Value,
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self {
            value: object(field, value.into()),
        }
    }

    pub fn ne(field: &str, value: impl Into<Value>) -> Self {
        Self {
            value: comparison(field, "$ne", value.into()),
        }
    }

    pub fn gt(field: &str, value: impl Into<Value>) -> Self {
        Self {
            value: comparison(field, "$gt", value.into()),
        }
    }

    pub fn gte(field: &str, value: impl Into<Value>) -> Self {
        Self {
            value: comparison(field, "$gte", value.into()),
        }
    }

    pub fn lt(field: &str, value: impl Into<Value>) -> Self {
        Self {
            value: comparison(field, "$lt", value.into()),
        }
    }

    pub fn lte(field: &str, value: impl Into<Value>) -> Self {
        Self {
            value: comparison(field, "$lte", value.into()),
        }
    }

    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self {
            value: object(
                "$and",
                Value::Array(filters.into_iter().map(|f| f.value).collect()),
            ),
        }
    }

    pub fn or(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self {
            value: object(
                "$or",
                Value::Array(filters.into_iter().map(|f| f.value).collect()),
            ),
        }
    }

    /// Render to the query-string filter syntax.
    pub fn to_wire(&self) -> String {
        self.value.to_string()
    }
}

/// Sort specification; fields apply in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct OrderBy {
    fields: Vec<(String, i8)>,
}

impl OrderBy {
    pub fn asc(field: &str) -> Self {
        Self::default().then_asc(field)
    }

    pub fn desc(field: &str) -> Self {
        Self::default().then_desc(field)
    }

    pub fn then_asc(mut self, field: &str) -> Self {
        self.fields.push((field.to_string(), 1));
        self
    }

    pub fn then_desc(mut self, field: &str) -> Self {
        self.fields.push((field.to_string(), -1));
        self
    }

    pub fn to_wire(&self) -> String {
        // Rendered by hand: serde_json's map would sort the keys and sort
        // precedence follows insertion order.
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, direction)| {
                let key = Value::String(field.clone()).to_string();
                format!("{key}:{direction}")
            })
            .collect();
        format!("{{{}}}", parts.join(","))
    }
}

/// Search parameters for one mesh query.
#[derive(Debug, Clone, Default)]
pub struct MeshQuery {
    filter: Option<Filter>,
    order_by: Option<OrderBy>,
    page: Option<u32>,
    page_size: Option<u32>,
}

impl MeshQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Key/value pairs for the query string, in wire naming.
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(filter) = &self.filter {
            pairs.push(("filter", filter.to_wire()));
        }
        if let Some(order_by) = &self.order_by {
            pairs.push(("orderby", order_by.to_wire()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize", page_size.to_string()));
        }
        pairs
    }
}

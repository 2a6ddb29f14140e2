//! Firestore REST wire format: typed values, documents and structured queries.
//!
//! Only what the trade and token collections need: scalar values, single-field
//! equality filters and one ordering.

use crate::error::{FirestoreError, SdkError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─── Values & documents ──────────────────────────────────────────────────────

/// A typed Firestore value. Exactly one field is set on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Value {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    /// int64 values are sent as decimal strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integer_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,
    /// RFC 3339 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_value: Option<String>,
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Self {
            string_value: Some(s.into()),
            ..Default::default()
        }
    }

    /// Render a scalar as the string shape the documents use. `None` for null and
    /// for map/array values.
    pub fn as_text(&self) -> Option<String> {
        if let Some(s) = &self.string_value {
            return Some(s.clone());
        }
        if let Some(i) = &self.integer_value {
            return Some(i.clone());
        }
        if let Some(d) = self.double_value {
            return d.is_finite().then(|| d.to_string());
        }
        if let Some(t) = &self.timestamp_value {
            return Some(t.clone());
        }
        self.boolean_value.map(|b| b.to_string())
    }
}

/// A Firestore document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name, ending in `/{collection}/{id}`.
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}

impl Document {
    /// The trailing path segment of the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    /// Flatten scalar fields into `T` (camelCase keys, string values).
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, SdkError> {
        if self.fields.is_empty() {
            return Err(FirestoreError::MissingFields(self.name.clone()).into());
        }

        let object: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .filter_map(|(key, value)| {
                value
                    .as_text()
                    .map(|text| (key.clone(), serde_json::Value::String(text)))
            })
            .collect();

        Ok(serde_json::from_value(serde_json::Value::Object(object))?)
    }
}

/// One entry of a `:runQuery` response array.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryItem {
    #[serde(default)]
    pub document: Option<Document>,
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// Collect the documents of a `:runQuery` response, failing on an error entry.
pub fn collect_documents(items: Vec<RunQueryItem>) -> Result<Vec<Document>, FirestoreError> {
    let mut docs = Vec::with_capacity(items.len());
    for item in items {
        if let Some(err) = item.error {
            return Err(FirestoreError::QueryFailed(err.to_string()));
        }
        if let Some(doc) = item.document {
            docs.push(doc);
        }
    }
    Ok(docs)
}

// ─── Structured query ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryRequest {
    pub structured_query: StructuredQuery,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    pub from: Vec<CollectionSelector>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSelector {
    pub collection_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub field_filter: FieldFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldFilter {
    pub field: FieldReference,
    pub op: &'static str,
    pub value: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReference {
    pub field_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub field: FieldReference,
    pub direction: &'static str,
}

impl RunQueryRequest {
    /// `SELECT * FROM {collection} WHERE {field} == {value} ORDER BY {order_field} DESC LIMIT {limit}`
    pub fn equal_ordered_desc(
        collection: &str,
        field: &str,
        value: &str,
        order_field: &str,
        limit: Option<u32>,
    ) -> Self {
        Self {
            structured_query: StructuredQuery {
                from: vec![CollectionSelector {
                    collection_id: collection.to_string(),
                }],
                filter: Some(Filter {
                    field_filter: FieldFilter {
                        field: FieldReference {
                            field_path: field.to_string(),
                        },
                        op: "EQUAL",
                        value: Value::string(value),
                    },
                }),
                order_by: vec![Order {
                    field: FieldReference {
                        field_path: order_field.to_string(),
                    },
                    direction: "DESCENDING",
                }],
                limit,
            },
        }
    }
}

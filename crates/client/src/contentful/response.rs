//! Delivery API response types and link resolution.
//!
//! The REST API returns links as `{"sys": {"type": "Link", ...}}` stubs and
//! ships the linked entities separately under `includes`. Resolution inlines
//! them up to the requested include depth. Links that cannot be found stay
//! as stubs so callers see an unresolved reference.

use super::ContentfulError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Raw response from `GET /entries`.
#[derive(Debug, Deserialize)]
pub struct EntryCollection {
    #[serde(default)]
    pub items: Option<Vec<Value>>,
    #[serde(default)]
    pub includes: Includes,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Linked entities shipped alongside the items.
#[derive(Debug, Default, Deserialize)]
pub struct Includes {
    #[serde(rename = "Entry", default)]
    pub entry: Vec<Value>,
    #[serde(rename = "Asset", default)]
    pub asset: Vec<Value>,
}

/// Raw response from `GET /content_types`.
#[derive(Debug, Deserialize)]
pub struct ContentTypeCollection {
    #[serde(default)]
    pub items: Option<Vec<ContentTypeSummary>>,
}

#[derive(Debug, Deserialize)]
pub struct ContentTypeSummary {
    pub sys: ContentTypeSys,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContentTypeSys {
    pub id: String,
}

impl ContentTypeCollection {
    pub fn into_ids(self) -> Result<Vec<String>, ContentfulError> {
        let items = self
            .items
            .ok_or_else(|| ContentfulError::InvalidResponse("content types response has no items array".into()))?;
        Ok(items.into_iter().map(|item| item.sys.id).collect())
    }
}

#[derive(Default)]
struct LinkIndex {
    entries: HashMap<String, Value>,
    assets: HashMap<String, Value>,
}

impl LinkIndex {
    fn insert(map: &mut HashMap<String, Value>, entity: &Value) {
        if let Some(id) = entity.pointer("/sys/id").and_then(Value::as_str) {
            map.insert(id.to_string(), entity.clone());
        }
    }

    fn get(&self, link_type: &str, id: &str) -> Option<&Value> {
        match link_type {
            "Entry" => self.entries.get(id),
            "Asset" => self.assets.get(id),
            _ => None,
        }
    }
}

/// `(linkType, id)` when `value` is a bare link stub.
fn link_target(map: &Map<String, Value>) -> Option<(&str, &str)> {
    if map.len() != 1 {
        return None;
    }
    let sys = map.get("sys")?;
    if sys.get("type").and_then(Value::as_str) != Some("Link") {
        return None;
    }
    let link_type = sys.get("linkType").and_then(Value::as_str)?;
    let id = sys.get("id").and_then(Value::as_str)?;
    Some((link_type, id))
}

fn resolve_value(value: &Value, index: &LinkIndex, depth: u8) -> Value {
    match value {
        Value::Object(map) => {
            if let Some((link_type, id)) = link_target(map) {
                return match index.get(link_type, id) {
                    Some(target) if depth > 0 => resolve_entity(target, index, depth - 1),
                    _ => value.clone(),
                };
            }
            map.iter()
                .map(|(key, inner)| (key.clone(), resolve_value(inner, index, depth)))
                .collect::<Map<_, _>>()
                .into()
        }
        Value::Array(items) => items.iter().map(|inner| resolve_value(inner, index, depth)).collect(),
        other => other.clone(),
    }
}

/// Resolve links inside an entity's `fields`, leaving `sys` untouched.
fn resolve_entity(entity: &Value, index: &LinkIndex, depth: u8) -> Value {
    let mut resolved = entity.clone();
    if let (Some(fields), Some(slot)) = (entity.get("fields"), resolved.get_mut("fields")) {
        *slot = resolve_value(fields, index, depth);
    }
    resolved
}

impl EntryCollection {
    /// Items with links inlined up to `depth` levels.
    ///
    /// # Errors
    ///
    /// Returns `ContentfulError::InvalidResponse` when `items` is absent.
    pub fn resolve(self, depth: u8) -> Result<Vec<Value>, ContentfulError> {
        let items = self
            .items
            .ok_or_else(|| ContentfulError::InvalidResponse("entries response has no items array".into()))?;

        let mut index = LinkIndex::default();
        for entity in self.includes.entry.iter().chain(items.iter()) {
            LinkIndex::insert(&mut index.entries, entity);
        }
        for asset in &self.includes.asset {
            LinkIndex::insert(&mut index.assets, asset);
        }

        Ok(items.iter().map(|item| resolve_entity(item, &index, depth)).collect())
    }
}

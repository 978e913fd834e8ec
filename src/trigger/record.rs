use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Field change information for diff tracking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub field: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub change_type: ChangeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,    // Field didn't exist in the old snapshot
    Modified, // Field existed but value changed
    Removed,  // Field is missing from the new snapshot
}

/// Field-level comparison of an old and a new snapshot of the same record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordDiff {
    pub added: BTreeMap<String, Value>,
    pub modified: BTreeMap<String, FieldChange>,
    pub removed: BTreeMap<String, Value>,
    pub unchanged: BTreeSet<String>,
}

impl RecordDiff {
    /// Compare two snapshots field by field
    pub fn between(old: &Record, new: &Record) -> Self {
        let mut diff = RecordDiff::default();

        for (key, value) in &new.fields {
            match old.fields.get(key) {
                None => {
                    diff.added.insert(key.clone(), value.clone());
                }
                Some(old_value) if old_value != value => {
                    diff.modified.insert(
                        key.clone(),
                        FieldChange {
                            field: key.clone(),
                            old_value: Some(old_value.clone()),
                            new_value: Some(value.clone()),
                            change_type: ChangeType::Modified,
                        },
                    );
                }
                Some(_) => {
                    diff.unchanged.insert(key.clone());
                }
            }
        }

        for (key, value) in &old.fields {
            if !new.fields.contains_key(key) {
                diff.removed.insert(key.clone(), value.clone());
            }
        }

        diff
    }

    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.modified.is_empty() || !self.removed.is_empty()
    }

    /// Every changed field as a FieldChange, sorted by field name
    pub fn changes(&self) -> Vec<FieldChange> {
        let mut changes: Vec<FieldChange> = self
            .added
            .iter()
            .map(|(field, value)| FieldChange {
                field: field.clone(),
                old_value: None,
                new_value: Some(value.clone()),
                change_type: ChangeType::Added,
            })
            .chain(self.modified.values().cloned())
            .chain(self.removed.iter().map(|(field, value)| FieldChange {
                field: field.clone(),
                old_value: Some(value.clone()),
                new_value: None,
                change_type: ChangeType::Removed,
            }))
            .collect();
        changes.sort_by(|a, b| a.field.cmp(&b.field));
        changes
    }
}

/// Snapshot of a platform record as delivered with a notification.
///
/// Serializes as a plain JSON object; the `id` field, when present, is a UUID string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Create a new empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create record with an id already assigned
    pub fn with_id(id: Uuid) -> Self {
        let mut record = Self::new();
        record.fields.insert("id".to_string(), Value::String(id.to_string()));
        record
    }

    /// Create record from a JSON object, `None` for any other JSON value
    pub fn from_json(json: Value) -> Option<Self> {
        match json {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Get field value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set field value (chainable, used when building snapshots)
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Get record ID
    pub fn id(&self) -> Option<Uuid> {
        self.get("id").and_then(|v| v.as_str()).and_then(|s| Uuid::parse_str(s).ok())
    }

    /// Check if a field differs between an older snapshot and this one
    pub fn changed(&self, old: &Record, key: &str) -> bool {
        old.get(key) != self.get(key)
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

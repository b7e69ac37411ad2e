/// Request Model
///
/// The helper's sole wire format: a dictionary-shaped request with
/// top-level `headers` (verb tag, table, conditions, output flags) and
/// `data` (projection or insert payload). Key names are part of the
/// protocol contract and preserved exactly.
///
/// The loose wire shape is lowered into the tagged [`Action`] union by
/// [`Request::resolve`], which is where contract violations (no table,
/// missing update target, malformed insert payload) surface, before any
/// SQL is built or a connection is opened. The verb tag itself is a
/// closed enum, so an unrecognized tag fails at parse time instead of
/// producing an undefined result.
use crate::core::{PgkitError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Field-to-value mapping used for WHERE clauses, from-dict inserts and
/// column definitions. Iteration order is the caller's insertion order.
pub type Conditions = Map<String, Value>;

/// The verb tag selecting which SQL statement family a request builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    SelectOne,
    SelectAll,
    Insert,
    Update,
    Delete,
}

/// The single field/value pair assigned by an update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Target {
    pub field: String,
    pub value: Value,
}

/// Request headers: the verb, its table, and the output-shaping flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Headers {
    pub action_type: ActionType,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub conditions: Option<Conditions>,
    #[serde(default)]
    pub target: Option<Target>,
    #[serde(default)]
    pub with_field_names: bool,
    #[serde(default)]
    pub as_dict: bool,
    #[serde(default)]
    pub from_dict: bool,
}

/// A unit of work for [`PgHelper::execute`](crate::PgHelper::execute).
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    pub headers: Headers,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Select projection derived from the request's `data.values` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// All columns (`*`); the default when `values` is absent or not a
    /// string or sequence.
    All,
    /// A verbatim projection string, including the literal `*`.
    Column(String),
    /// A field list, rendered comma-joined.
    Columns(Vec<String>),
}

impl Projection {
    /// Derives the projection: a string is used verbatim, a sequence
    /// becomes a field list, anything else selects all columns.
    pub fn from_value(value: Option<&Value>) -> Projection {
        match value {
            Some(Value::String(s)) => Projection::Column(s.clone()),
            Some(Value::Array(items)) => Projection::Columns(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            _ => Projection::All,
        }
    }
}

/// A fully resolved request: one variant per verb, carrying only the
/// fields that verb uses.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectOne {
        table: String,
        projection: Projection,
        conditions: Option<Conditions>,
        with_field_names: bool,
    },
    SelectAll {
        table: String,
        projection: Projection,
        conditions: Option<Conditions>,
        with_field_names: bool,
    },
    Insert {
        table: String,
        fields: Vec<String>,
        values: Vec<Value>,
    },
    Update {
        table: String,
        target: Target,
        conditions: Option<Conditions>,
    },
    Delete {
        table: String,
        conditions: Option<Conditions>,
    },
}

impl Action {
    /// The table this action runs against.
    pub fn table(&self) -> &str {
        match self {
            Action::SelectOne { table, .. }
            | Action::SelectAll { table, .. }
            | Action::Insert { table, .. }
            | Action::Update { table, .. }
            | Action::Delete { table, .. } => table,
        }
    }
}

impl Request {
    /// Parses a request from its JSON wire form.
    pub fn from_json(input: &str) -> Result<Request> {
        Ok(serde_json::from_str(input)?)
    }

    /// Builds a request from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Request> {
        Ok(serde_json::from_value(value)?)
    }

    /// Lowers the wire shape into a tagged [`Action`].
    ///
    /// The table comes from the headers, falling back to the helper's
    /// default table context. Contract violations surface here.
    pub fn resolve(&self, default_table: Option<&str>) -> Result<Action> {
        let table = self
            .headers
            .table
            .clone()
            .or_else(|| default_table.map(String::from))
            .ok_or_else(|| {
                PgkitError::Contract(
                    "no table named in the request and no default table configured".to_string(),
                )
            })?;
        let conditions = self.headers.conditions.clone();
        let wants_fields = self.headers.with_field_names || self.headers.as_dict;

        match self.headers.action_type {
            ActionType::SelectOne => Ok(Action::SelectOne {
                table,
                projection: Projection::from_value(self.data.get("values")),
                conditions,
                with_field_names: wants_fields,
            }),
            ActionType::SelectAll => Ok(Action::SelectAll {
                table,
                projection: Projection::from_value(self.data.get("values")),
                conditions,
                with_field_names: wants_fields,
            }),
            ActionType::Insert => {
                let (fields, values) = self.insert_payload()?;
                Ok(Action::Insert {
                    table,
                    fields,
                    values,
                })
            }
            ActionType::Update => {
                let target = self.headers.target.clone().ok_or_else(|| {
                    PgkitError::Contract("update requires a target field and value".to_string())
                })?;
                Ok(Action::Update {
                    table,
                    target,
                    conditions,
                })
            }
            ActionType::Delete => Ok(Action::Delete { table, conditions }),
        }
    }

    /// Extracts the insert payload: the parallel `fields`/`values`
    /// lists, or the whole `data` mapping in insertion order when
    /// `from_dict` is set. Length agreement between the parallel lists
    /// is enforced by the statement builder.
    fn insert_payload(&self) -> Result<(Vec<String>, Vec<Value>)> {
        if self.headers.from_dict {
            if self.data.is_empty() {
                return Err(PgkitError::Contract(
                    "from_dict insert requires a non-empty field mapping".to_string(),
                ));
            }
            return Ok(self
                .data
                .iter()
                .map(|(field, value)| (field.clone(), value.clone()))
                .unzip());
        }

        let fields = match self.data.get("fields") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(PgkitError::Contract(format!(
                        "insert field names must be strings, got {}",
                        other
                    ))),
                })
                .collect::<Result<Vec<String>>>()?,
            _ => {
                return Err(PgkitError::Contract(
                    "insert requires a fields list in data".to_string(),
                ))
            }
        };
        let values = match self.data.get("values") {
            Some(Value::Array(items)) => items.clone(),
            _ => {
                return Err(PgkitError::Contract(
                    "insert requires a values list in data".to_string(),
                ))
            }
        };
        Ok((fields, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_keys_parse() {
        let request = Request::from_json(
            r#"{
                "headers": {
                    "action_type": "select_one",
                    "table": "users",
                    "conditions": {"id": 7},
                    "with_field_names": true,
                    "as_dict": false
                },
                "data": {"values": "email"}
            }"#,
        )
        .unwrap();

        assert_eq!(request.headers.action_type, ActionType::SelectOne);
        assert_eq!(request.headers.table.as_deref(), Some("users"));
        assert!(request.headers.with_field_names);
        assert!(!request.headers.as_dict);
        assert_eq!(request.data.get("values"), Some(&json!("email")));
    }

    #[test]
    fn test_unrecognized_action_rejected_at_parse() {
        let result = Request::from_json(
            r#"{"headers": {"action_type": "upsert", "table": "users"}}"#,
        );
        assert!(matches!(result, Err(PgkitError::Json(_))));
    }

    #[test]
    fn test_resolve_select_projection_modes() {
        let request = Request::from_value(json!({
            "headers": {"action_type": "select_all", "table": "users"},
            "data": {"values": ["id", "email"]}
        }))
        .unwrap();
        match request.resolve(None).unwrap() {
            Action::SelectAll { projection, .. } => {
                assert_eq!(
                    projection,
                    Projection::Columns(vec!["id".to_string(), "email".to_string()])
                );
            }
            action => panic!("Expected select_all, got {:?}", action),
        }

        let request = Request::from_value(json!({
            "headers": {"action_type": "select_all", "table": "users"}
        }))
        .unwrap();
        match request.resolve(None).unwrap() {
            Action::SelectAll { projection, .. } => assert_eq!(projection, Projection::All),
            action => panic!("Expected select_all, got {:?}", action),
        }
    }

    #[test]
    fn test_resolve_default_table_fallback() {
        let request = Request::from_value(json!({
            "headers": {"action_type": "delete", "conditions": {"id": 1}}
        }))
        .unwrap();

        match request.resolve(Some("events")).unwrap() {
            Action::Delete { table, .. } => assert_eq!(table, "events"),
            action => panic!("Expected delete, got {:?}", action),
        }

        let err = request.resolve(None).unwrap_err();
        assert!(matches!(err, PgkitError::Contract(_)));
    }

    #[test]
    fn test_resolve_update_requires_target() {
        let request = Request::from_value(json!({
            "headers": {"action_type": "update", "table": "users", "conditions": {"id": 1}}
        }))
        .unwrap();
        let err = request.resolve(None).unwrap_err();
        match err {
            PgkitError::Contract(msg) => assert!(msg.contains("target")),
            other => panic!("Expected Contract error, got {:?}", other),
        }

        let request = Request::from_value(json!({
            "headers": {
                "action_type": "update",
                "table": "users",
                "target": {"field": "age", "value": 37}
            }
        }))
        .unwrap();
        match request.resolve(None).unwrap() {
            Action::Update { target, .. } => {
                assert_eq!(target.field, "age");
                assert_eq!(target.value, json!(37));
            }
            action => panic!("Expected update, got {:?}", action),
        }
    }

    #[test]
    fn test_insert_from_dict_preserves_insertion_order() {
        let request = Request::from_value(json!({
            "headers": {"action_type": "insert", "table": "users", "from_dict": true},
            "data": {"name": "'Ada'", "age": 36, "active": true}
        }))
        .unwrap();

        match request.resolve(None).unwrap() {
            Action::Insert { fields, values, .. } => {
                assert_eq!(fields, vec!["name", "age", "active"]);
                assert_eq!(values, vec![json!("'Ada'"), json!(36), json!(true)]);
            }
            action => panic!("Expected insert, got {:?}", action),
        }
    }

    #[test]
    fn test_insert_explicit_payload_required() {
        let request = Request::from_value(json!({
            "headers": {"action_type": "insert", "table": "users"},
            "data": {"values": [1, 2]}
        }))
        .unwrap();
        let err = request.resolve(None).unwrap_err();
        match err {
            PgkitError::Contract(msg) => assert!(msg.contains("fields list")),
            other => panic!("Expected Contract error, got {:?}", other),
        }
    }

    #[test]
    fn test_insert_field_names_must_be_strings() {
        let request = Request::from_value(json!({
            "headers": {"action_type": "insert", "table": "users"},
            "data": {"fields": ["name", 3], "values": [1, 2]}
        }))
        .unwrap();
        let err = request.resolve(None).unwrap_err();
        assert!(matches!(err, PgkitError::Contract(_)));
    }

    #[test]
    fn test_from_dict_empty_mapping_rejected() {
        let request = Request::from_value(json!({
            "headers": {"action_type": "insert", "table": "users", "from_dict": true},
            "data": {}
        }))
        .unwrap();
        let err = request.resolve(None).unwrap_err();
        assert!(matches!(err, PgkitError::Contract(_)));
    }
}

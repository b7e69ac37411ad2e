/// Response Model
///
/// The shapes a request's result can take. Selects produce raw tuples, a
/// scalar, or (when field names were requested) the column list
/// alongside the data; mutating verbs report their commit outcome.
/// The `as_dict` reshape is a pure positional zip of the field list
/// against the data, performed as the dispatcher's final step.
use crate::core::{PgkitError, Result};
use crate::request::Conditions;
use serde_json::Value;

/// Result of executing a [`Request`](crate::Request).
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// select_one without output flags: the first column of the matched
    /// row, or the numeric `0` sentinel when nothing matched.
    Scalar(Value),
    /// select_all without output flags: the raw sequence of row tuples.
    Rows(Vec<Vec<Value>>),
    /// select_one with `with_field_names`/`as_dict`: the table's column
    /// names plus the matched row, `None` when nothing matched.
    Row {
        fields: Vec<String>,
        data: Option<Vec<Value>>,
    },
    /// select_all with `with_field_names`/`as_dict`.
    Table {
        fields: Vec<String>,
        data: Vec<Vec<Value>>,
    },
    /// The `as_dict` reshape: field names zipped against the data.
    Record(Conditions),
    /// A mutating statement executed and committed.
    Committed,
    /// Delete whose guard probe matched no row; no statement was run.
    Skipped,
}

impl Response {
    /// The select_one no-match sentinel.
    pub fn no_match() -> Response {
        Response::Scalar(Value::from(0))
    }

    /// Reshapes a field-bearing select result into a field→value record.
    ///
    /// Pure positional zip: `fields[i]` maps to `data[i]`. For a
    /// select_all result each zipped value is an entire row. Absent data
    /// or mismatched lengths are contract violations.
    pub fn into_record(self) -> Result<Response> {
        match self {
            Response::Row {
                fields,
                data: Some(row),
            } => Ok(Response::Record(zip_record(&fields, row)?)),
            Response::Row { data: None, .. } => Err(PgkitError::Contract(
                "select_one matched no row; nothing to reshape into a record".to_string(),
            )),
            Response::Table { fields, data } => {
                let rows: Vec<Value> = data.into_iter().map(Value::Array).collect();
                Ok(Response::Record(zip_record(&fields, rows)?))
            }
            other => Err(PgkitError::Contract(format!(
                "as_dict requires a field-bearing select result, got {:?}",
                other
            ))),
        }
    }
}

/// Zips field names against values positionally. Mismatched lengths are
/// a contract violation, never silently truncated.
pub fn zip_record(fields: &[String], values: Vec<Value>) -> Result<Conditions> {
    if fields.len() != values.len() {
        return Err(PgkitError::Contract(format!(
            "cannot zip {} fields against {} values",
            fields.len(),
            values.len()
        )));
    }
    let mut record = Conditions::new();
    for (field, value) in fields.iter().zip(values) {
        record.insert(field.clone(), value);
    }
    Ok(record)
}

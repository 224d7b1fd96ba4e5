//! Parser for the embedded test-data JSON document
//!
//! The document nests objects: `tests` -> `executions` -> `steps`. Object
//! keys are meaningful — executions and steps keep their key as display id,
//! tests get a sequential id in document order. `serde_json` is built with
//! `preserve_order`, so iteration follows the document's own key order.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{Execution, Outcome, Step, Test};

/// Fatal parse failure; there is no partial recovery, a bad document aborts
/// the whole load.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid report JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("`{0}` is missing")]
    MissingField(String),

    #[error("`{field}` should be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("`{field}` has unknown outcome `{value}`")]
    UnknownOutcome { field: String, value: String },
}

/// Parse a report document into the test list.
pub fn parse_report(json: &str) -> Result<Vec<Test>, ParseError> {
    let document: Value = serde_json::from_str(json)?;
    let tests_json = object_field(require_object(&document, "report")?, "report", "tests")?;

    let mut tests = Vec::with_capacity(tests_json.len());
    for (id, (key, value)) in tests_json.iter().enumerate() {
        tests.push(parse_test(id, key, value)?);
    }
    Ok(tests)
}

fn parse_test(id: usize, key: &str, value: &Value) -> Result<Test, ParseError> {
    let path = format!("tests.{key}");
    let test = require_object(value, &path)?;

    let mut executions = Vec::new();
    for (execution_key, execution_value) in optional_object(test, &path, "executions")? {
        executions.push(parse_execution(&path, execution_key, execution_value)?);
    }

    Ok(Test {
        id,
        node_id: string_field(test, &path, "node_id")?,
        name: string_field(test, &path, "name")?,
        description: string_field(test, &path, "description")?,
        self_test: string_field(test, &path, "self_test")?,
        executions,
    })
}

fn parse_execution(test_path: &str, key: &str, value: &Value) -> Result<Execution, ParseError> {
    let path = format!("{test_path}.executions.{key}");
    let execution = require_object(value, &path)?;

    let mut steps = Vec::new();
    for (step_key, step_value) in optional_object(execution, &path, "steps")? {
        steps.push(parse_step(&path, step_key, step_value)?);
    }

    Ok(Execution {
        id: key.to_string(),
        device: string_field(execution, &path, "device")?,
        outcome: outcome_field(execution, &path)?,
        duration: number_field(execution, &path, "duration")?,
        steps,
    })
}

fn parse_step(execution_path: &str, key: &str, value: &Value) -> Result<Step, ParseError> {
    let path = format!("{execution_path}.steps.{key}");
    let step = require_object(value, &path)?;

    Ok(Step {
        id: key.to_string(),
        description: string_field(step, &path, "description")?,
        outcome: outcome_field(step, &path)?,
    })
}

fn require_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ParseError> {
    value.as_object().ok_or_else(|| ParseError::WrongType {
        field: path.to_string(),
        expected: "an object",
    })
}

fn object_field<'a>(
    object: &'a Map<String, Value>,
    path: &str,
    field: &str,
) -> Result<&'a Map<String, Value>, ParseError> {
    let value = object
        .get(field)
        .ok_or_else(|| ParseError::MissingField(join(path, field)))?;
    require_object(value, &join(path, field))
}

/// An absent nested object reads as empty: a test without an `executions`
/// object simply has no executions, same for `steps`.
fn optional_object<'a>(
    object: &'a Map<String, Value>,
    path: &str,
    field: &str,
) -> Result<&'a Map<String, Value>, ParseError> {
    static EMPTY: std::sync::OnceLock<Map<String, Value>> = std::sync::OnceLock::new();
    match object.get(field) {
        Some(value) => require_object(value, &join(path, field)),
        None => Ok(EMPTY.get_or_init(Map::new)),
    }
}

fn string_field(
    object: &Map<String, Value>,
    path: &str,
    field: &str,
) -> Result<String, ParseError> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ParseError::WrongType {
            field: join(path, field),
            expected: "a string",
        }),
        None => Err(ParseError::MissingField(join(path, field))),
    }
}

fn number_field(object: &Map<String, Value>, path: &str, field: &str) -> Result<f64, ParseError> {
    match object.get(field) {
        Some(value) => value.as_f64().ok_or_else(|| ParseError::WrongType {
            field: join(path, field),
            expected: "a number",
        }),
        None => Err(ParseError::MissingField(join(path, field))),
    }
}

fn outcome_field(object: &Map<String, Value>, path: &str) -> Result<Outcome, ParseError> {
    let raw = string_field(object, path, "outcome")?;
    match raw.as_str() {
        "passed" => Ok(Outcome::Passed),
        "failed" => Ok(Outcome::Failed),
        "skipped" => Ok(Outcome::Skipped),
        _ => Err(ParseError::UnknownOutcome {
            field: join(path, "outcome"),
            value: raw,
        }),
    }
}

fn join(path: &str, field: &str) -> String {
    format!("{path}.{field}")
}

//! Fixture builders shared by the data-layer tests.

use serde_json::{json, Value};

use super::loader::parse_json;
use super::model::Dataset;

/// One participant record; `grades` holds q1..q5 (use `null` for missing).
pub fn participant(age: Value, gender: &str, email: Value, grades: [Value; 5]) -> Value {
    let [q1, q2, q3, q4, q5] = grades;
    json!({
        "age": age, "gender": gender, "email": email,
        "q1": q1, "q2": q2, "q3": q3, "q4": q4, "q5": q5,
    })
}

/// Participant with a valid email and the given grades.
pub fn graded(age: Value, gender: &str, grades: [Value; 5]) -> Value {
    participant(age, gender, json!("someone@example.com"), grades)
}

pub fn dataset(records: Vec<Value>) -> Dataset {
    parse_json(&Value::Array(records).to_string()).expect("fixture records are valid")
}

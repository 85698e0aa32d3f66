/// A single attribute value as read off a record.
///
/// Values cross the trainer boundary untouched: cleaning missing values and
/// encoding categorical ones is the feature pipeline's job, not the record
/// layer's. Composite values are carried as JSON.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Text(String),
	Json(serde_json::Value),
}

impl Value {
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Return the numeric reading of this value, if it has one. Booleans are
	/// deliberately not numbers here: they encode as categories.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			Value::Int(value) => Some(*value as f64),
			Value::Float(value) => Some(*value),
			_ => None,
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Int(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Text(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Text(value)
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		Value::Json(value)
	}
}

#[test]
fn test_as_number() {
	assert_eq!(Value::Int(3).as_number(), Some(3.0));
	assert_eq!(Value::Float(0.5).as_number(), Some(0.5));
	assert_eq!(Value::Bool(true).as_number(), None);
	assert_eq!(Value::Text("3".to_owned()).as_number(), None);
	assert_eq!(Value::Null.as_number(), None);
}

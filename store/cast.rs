/// The declared kind of a record attribute.
///
/// A cast tells the prediction layer whether an attribute is continuous
/// (numeric regression target) or categorical (classification target); it is
/// declared per attribute in the type's [`Schema`](crate::Schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cast {
	Bool,
	Int,
	Float,
	Decimal,
	Text,
	Json,
	Timestamp,
}

impl Cast {
	/// Whether attributes with this cast hold continuous (numeric) values.
	pub fn is_continuous(self) -> bool {
		matches!(self, Cast::Int | Cast::Float | Cast::Decimal)
	}
}

#[test]
fn test_continuous_casts() {
	assert!(Cast::Int.is_continuous());
	assert!(Cast::Float.is_continuous());
	assert!(Cast::Decimal.is_continuous());
	assert!(!Cast::Bool.is_continuous());
	assert!(!Cast::Text.is_continuous());
	assert!(!Cast::Json.is_continuous());
	assert!(!Cast::Timestamp.is_continuous());
}

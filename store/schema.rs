use crate::cast::Cast;
use std::collections::BTreeMap;

/// The declared shape of a record type: its name and the cast of each
/// attribute. Attributes without a declared cast are unknown to the
/// prediction layer, which treats asking about them as a configuration
/// error rather than assuming a default.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Schema {
	name: String,
	casts: BTreeMap<String, Cast>,
}

impl Schema {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			casts: BTreeMap::new(),
		}
	}

	pub fn cast(mut self, attribute: impl Into<String>, cast: Cast) -> Self {
		self.casts.insert(attribute.into(), cast);
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn declared_cast(&self, attribute: &str) -> Option<Cast> {
		self.casts.get(attribute).copied()
	}

	pub fn attributes(&self) -> impl Iterator<Item = (&str, Cast)> {
		self.casts.iter().map(|(name, cast)| (name.as_str(), *cast))
	}
}

#[test]
fn test_declared_cast() {
	let schema = Schema::new("Car")
		.cast("make", Cast::Text)
		.cast("mileage", Cast::Int);
	assert_eq!(schema.name(), "Car");
	assert_eq!(schema.declared_cast("mileage"), Some(Cast::Int));
	assert_eq!(schema.declared_cast("vin"), None);
}

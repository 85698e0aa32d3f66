/*!
This module defines the capability a record type implements to opt into
attribute-value prediction, and the registry the command line resolves type
names through.

The original design checked for the capability with a runtime type test;
here it is a trait bound, so only capability-bearing types can be registered
and the only failure left at runtime is an unknown name.
*/

use crate::{
	error::{Error, Result},
	estimator::EstimatorChoice,
};
use augur_store::{RecordSource, Schema, Scope};
use std::collections::BTreeMap;

/// The capability set a record type implements to make its attributes
/// trainable and predictable.
pub trait Predictable: RecordSource {
	/// The type's declared schema: its name and attribute casts.
	fn schema(&self) -> &Schema;

	/// The mapping from each predictable target attribute to the ordered
	/// list of source attributes it is predicted from. Source attributes
	/// must exist on the type and must not include the target; this is the
	/// implementor's responsibility and is not checked.
	fn predictable_attributes(&self) -> BTreeMap<String, Vec<String>>;

	/// Base estimator overrides per target attribute. Targets without an
	/// entry use the default chosen by whether the attribute is continuous.
	fn estimators(&self) -> BTreeMap<String, EstimatorChoice> {
		BTreeMap::new()
	}

	/// Scopes narrowing which records are trained on.
	fn training_scopes(&self) -> Vec<Scope> {
		Vec::new()
	}

	/// Whether the named attribute holds continuous values, read from its
	/// declared cast. An undeclared cast is a configuration error, never a
	/// silent default.
	fn is_attribute_continuous(&self, attribute: &str) -> Result<bool> {
		let cast = self
			.schema()
			.declared_cast(attribute)
			.ok_or_else(|| Error::MissingCast(attribute.to_owned()))?;
		Ok(cast.is_continuous())
	}
}

/// Record types registered for training, keyed by schema name. The embedding
/// application builds one of these and hands it to the command line surface.
#[derive(Default)]
pub struct Registry {
	types: BTreeMap<String, Box<dyn Predictable>>,
}

impl Registry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, record_type: Box<dyn Predictable>) {
		let name = record_type.schema().name().to_owned();
		self.types.insert(name, record_type);
	}

	pub fn get(&self, name: &str) -> Result<&dyn Predictable> {
		self.types
			.get(name)
			.map(|record_type| record_type.as_ref())
			.ok_or_else(|| Error::UnknownRecordType(name.to_owned()))
	}

	pub fn type_names(&self) -> impl Iterator<Item = &str> {
		self.types.keys().map(String::as_str)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use augur_store::{Cast, MemoryStore, Record, Scope};

	struct Cars {
		store: MemoryStore,
	}

	impl RecordSource for Cars {
		fn count(&self, scopes: &[Scope]) -> std::result::Result<u64, augur_store::Error> {
			self.store.count(scopes)
		}
		fn for_each_page(
			&self,
			scopes: &[Scope],
			page_size: usize,
			page: &mut dyn FnMut(&[&dyn Record]),
		) -> std::result::Result<(), augur_store::Error> {
			self.store.for_each_page(scopes, page_size, page)
		}
	}

	impl Predictable for Cars {
		fn schema(&self) -> &Schema {
			self.store.schema()
		}
		fn predictable_attributes(&self) -> BTreeMap<String, Vec<String>> {
			let mut attributes = BTreeMap::new();
			attributes.insert(
				"color".to_owned(),
				vec!["make".to_owned(), "mileage".to_owned()],
			);
			attributes
		}
	}

	fn cars() -> Cars {
		let schema = Schema::new("Car")
			.cast("color", Cast::Text)
			.cast("make", Cast::Text)
			.cast("mileage", Cast::Int);
		Cars {
			store: MemoryStore::new(schema),
		}
	}

	#[test]
	fn test_is_attribute_continuous() {
		let cars = cars();
		assert!(cars.is_attribute_continuous("mileage").unwrap());
		assert!(!cars.is_attribute_continuous("color").unwrap());
		assert!(matches!(
			cars.is_attribute_continuous("vin"),
			Err(Error::MissingCast(_)),
		));
	}

	#[test]
	fn test_registry_lookup() {
		let mut registry = Registry::new();
		registry.register(Box::new(cars()));
		assert!(registry.get("Car").is_ok());
		assert!(matches!(
			registry.get("Boat"),
			Err(Error::UnknownRecordType(_)),
		));
	}
}

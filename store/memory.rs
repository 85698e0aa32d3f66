use crate::{
	error::Error, record::Record, schema::Schema, scope::Scope, source::RecordSource, value::Value,
};
use std::collections::BTreeMap;

/// A record held as an ordered attribute map. This is the record shape the
/// in-memory store serves and the shape tests declare fixtures in.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MemoryRecord {
	values: BTreeMap<String, Value>,
}

impl MemoryRecord {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
		self.values.insert(attribute.into(), value.into());
		self
	}
}

impl Record for MemoryRecord {
	fn get(&self, attribute: &str) -> Value {
		self.values.get(attribute).cloned().unwrap_or(Value::Null)
	}
}

/// The in-memory reference record source: a schema plus a vector of records,
/// filtered by scopes and paged in insertion order.
#[derive(Debug, Clone)]
pub struct MemoryStore {
	schema: Schema,
	records: Vec<MemoryRecord>,
}

impl MemoryStore {
	pub fn new(schema: Schema) -> Self {
		Self {
			schema,
			records: Vec::new(),
		}
	}

	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	pub fn push(&mut self, record: MemoryRecord) {
		self.records.push(record);
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	fn matching<'a>(
		&'a self,
		scopes: &'a [Scope],
	) -> impl Iterator<Item = &'a MemoryRecord> + 'a {
		self.records.iter().filter(move |record| {
			scopes
				.iter()
				.all(|scope| scope.matches(*record as &dyn Record))
		})
	}
}

impl RecordSource for MemoryStore {
	fn count(&self, scopes: &[Scope]) -> Result<u64, Error> {
		Ok(self.matching(scopes).count() as u64)
	}

	fn for_each_page(
		&self,
		scopes: &[Scope],
		page_size: usize,
		page: &mut dyn FnMut(&[&dyn Record]),
	) -> Result<(), Error> {
		let matching: Vec<&MemoryRecord> = self.matching(scopes).collect();
		for chunk in matching.chunks(page_size.max(1)) {
			let records: Vec<&dyn Record> = chunk.iter().map(|record| *record as &dyn Record).collect();
			page(&records);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cast::Cast;

	fn store_with(n: usize) -> MemoryStore {
		let schema = Schema::new("Car").cast("mileage", Cast::Int);
		let mut store = MemoryStore::new(schema);
		for i in 0..n {
			store.push(MemoryRecord::new().set("mileage", Value::Int(i as i64)));
		}
		store
	}

	#[test]
	fn test_count_with_scopes() {
		let mut store = store_with(3);
		store.push(MemoryRecord::new().set("mileage", Value::Null));
		assert_eq!(store.count(&[]).unwrap(), 4);
		let scopes = vec![Scope::IsNotNull("mileage".to_owned())];
		assert_eq!(store.count(&scopes).unwrap(), 3);
	}

	#[test]
	fn test_paging_is_bounded_and_exhaustive() {
		let store = store_with(250);
		let mut page_sizes = Vec::new();
		let mut seen = 0usize;
		store
			.for_each_page(&[], 100, &mut |records| {
				page_sizes.push(records.len());
				seen += records.len();
			})
			.unwrap();
		assert_eq!(page_sizes, vec![100, 100, 50]);
		assert_eq!(seen, 250);
	}

	#[test]
	fn test_paging_preserves_order() {
		let store = store_with(5);
		let mut mileages = Vec::new();
		store
			.for_each_page(&[], 2, &mut |records| {
				for record in records {
					mileages.push(record.get("mileage"));
				}
			})
			.unwrap();
		let expected: Vec<Value> = (0..5).map(|i| Value::Int(i)).collect();
		assert_eq!(mileages, expected);
	}
}

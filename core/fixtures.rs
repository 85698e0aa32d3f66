//! Shared record-type fixtures for the training and prediction tests.

use crate::{capability::Predictable, estimator::EstimatorChoice};
use augur_store::{
	Cast, MemoryRecord, MemoryStore, Record, RecordSource, Schema, Scope, Value,
};
use std::collections::BTreeMap;

/// A record type assembled from parts, so tests can vary the capability
/// surface without declaring a new type each time.
pub struct TestType {
	pub store: MemoryStore,
	pub attributes: BTreeMap<String, Vec<String>>,
	pub estimators: BTreeMap<String, EstimatorChoice>,
	pub scopes: Vec<Scope>,
}

impl RecordSource for TestType {
	fn count(&self, scopes: &[Scope]) -> Result<u64, augur_store::Error> {
		self.store.count(scopes)
	}

	fn for_each_page(
		&self,
		scopes: &[Scope],
		page_size: usize,
		page: &mut dyn FnMut(&[&dyn Record]),
	) -> Result<(), augur_store::Error> {
		self.store.for_each_page(scopes, page_size, page)
	}
}

impl Predictable for TestType {
	fn schema(&self) -> &Schema {
		self.store.schema()
	}

	fn predictable_attributes(&self) -> BTreeMap<String, Vec<String>> {
		self.attributes.clone()
	}

	fn estimators(&self) -> BTreeMap<String, EstimatorChoice> {
		self.estimators.clone()
	}

	fn training_scopes(&self) -> Vec<Scope> {
		self.scopes.clone()
	}
}

pub fn car(make: &str, mileage: i64, color: Option<&str>) -> MemoryRecord {
	let record = MemoryRecord::new()
		.set("make", make)
		.set("mileage", Value::Int(mileage));
	match color {
		Some(color) => record.set("color", color),
		None => record.set("color", Value::Null),
	}
}

/// A `Car` type predicting `color` from `[make, mileage]`, seeded with `n`
/// colored records (mileage below 50k is red, the rest blue) plus ten
/// null-color records the training scope filters out.
pub fn cars(n: usize) -> TestType {
	let schema = Schema::new("Car")
		.cast("color", Cast::Text)
		.cast("make", Cast::Text)
		.cast("mileage", Cast::Int);
	let mut store = MemoryStore::new(schema);
	let makes = ["saab", "audi", "volvo"];
	for i in 0..n {
		let mileage = (i as i64 * 997) % 100_000;
		let color = if mileage < 50_000 { "red" } else { "blue" };
		store.push(car(makes[i % makes.len()], mileage, Some(color)));
	}
	for i in 0..10 {
		store.push(car(makes[i % makes.len()], (i as i64 * 31) % 100_000, None));
	}
	let mut attributes = BTreeMap::new();
	attributes.insert(
		"color".to_owned(),
		vec!["make".to_owned(), "mileage".to_owned()],
	);
	TestType {
		store,
		attributes,
		estimators: BTreeMap::new(),
		scopes: vec![Scope::IsNotNull("color".to_owned())],
	}
}

pub fn house(sqft: i64, bedrooms: i64, price: Option<f64>) -> MemoryRecord {
	let record = MemoryRecord::new()
		.set("sqft", Value::Int(sqft))
		.set("bedrooms", Value::Int(bedrooms));
	match price {
		Some(price) => record.set("price", Value::Float(price)),
		None => record.set("price", Value::Null),
	}
}

/// The exact linear relationship the `House` fixtures follow.
pub fn house_price(sqft: i64, bedrooms: i64) -> f64 {
	100.0 * sqft as f64 + 5_000.0 * bedrooms as f64 + 10_000.0
}

/// A `House` type predicting `price` (continuous) from `[sqft, bedrooms]`,
/// seeded with `n` records lying exactly on a linear price surface.
pub fn houses(n: usize) -> TestType {
	let schema = Schema::new("House")
		.cast("price", Cast::Float)
		.cast("sqft", Cast::Int)
		.cast("bedrooms", Cast::Int);
	let mut store = MemoryStore::new(schema);
	for i in 0..n {
		let sqft = 800 + (i as i64 % 50) * 40;
		let bedrooms = 1 + (i as i64 % 4);
		store.push(house(sqft, bedrooms, Some(house_price(sqft, bedrooms))));
	}
	let mut attributes = BTreeMap::new();
	attributes.insert(
		"price".to_owned(),
		vec!["sqft".to_owned(), "bedrooms".to_owned()],
	);
	TestType {
		store,
		attributes,
		estimators: BTreeMap::new(),
		scopes: Vec::new(),
	}
}

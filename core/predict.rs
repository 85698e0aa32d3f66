/*!
This module predicts missing attribute values for a single record instance.

A [`Predictor`] is constructed over a record type's capability descriptor
and the model paths; the capability is a trait bound, so there is nothing
left to duck-check at prediction time. Both entry points raise the same
typed "model not found" error when no trained file exists at the resolved
path.
*/

use crate::{
	capability::Predictable,
	config::Paths,
	dataset,
	error::{Error, Result},
	model::TrainedModel,
};
use augur_store::{Record, Value};
use std::cmp::Ordering;

pub struct Predictor<'a> {
	record_type: &'a dyn Predictable,
	paths: &'a Paths,
}

impl<'a> Predictor<'a> {
	pub fn new(record_type: &'a dyn Predictable, paths: &'a Paths) -> Self {
		Self { record_type, paths }
	}

	/// Whether the named attribute is continuous, from its declared cast.
	pub fn is_attribute_continuous(&self, attribute: &str) -> Result<bool> {
		self.record_type.is_attribute_continuous(attribute)
	}

	/// Predict the value of `attribute` for `record` from its other
	/// attributes: the single predicted class for categorical targets, the
	/// predicted number for continuous ones.
	pub fn predict(&self, record: &dyn Record, attribute: &str) -> Result<Value> {
		let model = self.load(attribute)?;
		let dataset = dataset::build_unlabeled_dataset(record, self.record_type, attribute)?;
		let features = model.pipeline.transform(dataset.samples())?;
		match &model.classes {
			Some(classes) => {
				let predicted = model.estimator.predict_classes(&features)?[0];
				let class = classes
					.get(predicted)
					.cloned()
					.unwrap_or_else(|| dataset::MISSING_LABEL.to_owned());
				Ok(Value::Text(class))
			}
			None => {
				let predicted = model.estimator.predict_numbers(&features)?[0];
				Ok(Value::Float(f64::from(predicted)))
			}
		}
	}

	/// The full class distribution for `attribute`, sorted descending by
	/// probability; ties keep the class-first-seen training order. Only
	/// valid for categorical attributes, rejected before any file I/O
	/// otherwise.
	pub fn predictions(&self, record: &dyn Record, attribute: &str) -> Result<Vec<(String, f32)>> {
		if self.is_attribute_continuous(attribute)? {
			return Err(Error::ContinuousAttribute(attribute.to_owned()));
		}
		let model = self.load(attribute)?;
		let dataset = dataset::build_unlabeled_dataset(record, self.record_type, attribute)?;
		let features = model.pipeline.transform(dataset.samples())?;
		let mut rows = model.estimator.predict_proba(&features)?;
		let row = if rows.is_empty() {
			Vec::new()
		} else {
			rows.swap_remove(0)
		};
		let classes = model.classes.as_deref().unwrap_or_default();
		let mut ranked: Vec<(String, f32)> = classes
			.iter()
			.cloned()
			.zip(row.into_iter())
			.collect();
		ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
		Ok(ranked)
	}

	fn load(&self, attribute: &str) -> Result<TrainedModel> {
		let type_name = self.record_type.schema().name();
		let path = self.paths.model_path(type_name, attribute);
		if !path.is_file() {
			return Err(Error::ModelFileNotFound {
				record_type: type_name.to_owned(),
				path,
			});
		}
		TrainedModel::from_path(&path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fixtures::{car, cars, house, house_price, houses};
	use crate::train::train;

	#[test]
	fn test_missing_model_is_typed_for_both_entry_points() {
		let record_type = cars(10);
		let dir = tempfile::tempdir().unwrap();
		let paths = Paths::new(dir.path());
		let predictor = Predictor::new(&record_type, &paths);
		let record = car("saab", 1_000, None);
		for result in [
			predictor.predict(&record, "color").map(|_| ()),
			predictor.predictions(&record, "color").map(|_| ()),
		] {
			match result {
				Err(Error::ModelFileNotFound { record_type, .. }) => {
					assert_eq!(record_type, "Car");
				}
				other => panic!("expected a typed not-found error, got {:?}", other),
			}
		}
	}

	#[test]
	fn test_predictions_reject_continuous_attributes_before_io() {
		let record_type = houses(10);
		let dir = tempfile::tempdir().unwrap();
		let paths = Paths::new(dir.path());
		let predictor = Predictor::new(&record_type, &paths);
		let record = house(1_200, 2, None);
		// No model file exists; the continuous rejection must come first.
		let result = predictor.predictions(&record, "price");
		assert!(matches!(result, Err(Error::ContinuousAttribute(_))));
	}

	#[test]
	fn test_is_attribute_continuous_requires_a_cast() {
		let record_type = cars(10);
		let dir = tempfile::tempdir().unwrap();
		let paths = Paths::new(dir.path());
		let predictor = Predictor::new(&record_type, &paths);
		assert!(predictor.is_attribute_continuous("mileage").unwrap());
		assert!(!predictor.is_attribute_continuous("color").unwrap());
		assert!(matches!(
			predictor.is_attribute_continuous("vin"),
			Err(Error::MissingCast(_)),
		));
	}

	#[test]
	fn test_car_color_distribution() {
		let record_type = cars(500);
		let dir = tempfile::tempdir().unwrap();
		let paths = Paths::new(dir.path());
		train(&record_type, &paths, &mut |_| {}).unwrap();
		let predictor = Predictor::new(&record_type, &paths);
		// A held-out low-mileage car: its neighbors are red.
		let record = car("saab", 1_000, None);
		let predictions = predictor.predictions(&record, "color").unwrap();
		// Keys are exactly the distinct colors seen in training.
		let mut keys: Vec<&str> = predictions.iter().map(|(class, _)| class.as_str()).collect();
		keys.sort_unstable();
		assert_eq!(keys, vec!["blue", "red"]);
		// Sorted descending, probabilities summing to one.
		for pair in predictions.windows(2) {
			assert!(pair[0].1 >= pair[1].1);
		}
		let total: f32 = predictions.iter().map(|(_, probability)| probability).sum();
		assert!((total - 1.0).abs() < 1e-4);
		assert_eq!(predictions[0].0, "red");
		// The single-value entry point agrees with the top of the ranking.
		let predicted = predictor.predict(&record, "color").unwrap();
		assert_eq!(predicted, Value::Text("red".to_owned()));
	}

	#[test]
	fn test_house_price_tracks_the_linear_relationship() {
		let record_type = houses(200);
		let dir = tempfile::tempdir().unwrap();
		let paths = Paths::new(dir.path());
		train(&record_type, &paths, &mut |_| {}).unwrap();
		let predictor = Predictor::new(&record_type, &paths);
		let record = house(1_500, 3, None);
		let predicted = predictor.predict(&record, "price").unwrap();
		let Value::Float(predicted) = predicted else {
			panic!("expected a numeric prediction, got {:?}", predicted);
		};
		let expected = house_price(1_500, 3);
		// Within two percent of the true linear surface.
		assert!(
			(predicted - expected).abs() / expected < 0.02,
			"predicted {} for a true price of {}",
			predicted,
			expected,
		);
	}

	#[test]
	fn test_unpredictable_attribute_has_no_model() {
		let record_type = cars(60);
		let dir = tempfile::tempdir().unwrap();
		let paths = Paths::new(dir.path());
		train(&record_type, &paths, &mut |_| {}).unwrap();
		let predictor = Predictor::new(&record_type, &paths);
		let record = car("saab", 1_000, None);
		// "make" is a source attribute, not a predictable target, so no
		// model exists for it.
		assert!(matches!(
			predictor.predict(&record, "make"),
			Err(Error::ModelFileNotFound { .. }),
		));
	}
}

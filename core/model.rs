/*!
This module defines the trained model envelope: everything prediction needs,
serialized to a single file. The file starts with one format-version byte,
followed by the MessagePack encoding of the envelope. Saving overwrites
unconditionally — there is no versioning of trained models and the last
writer wins.
*/

use crate::{
	error::{Error, Result},
	estimator::TrainedEstimator,
	pipeline::FeaturePipeline,
};
use std::{
	io::{Read, Write},
	path::Path,
};

const FORMAT_VERSION: u8 = 0;

/// A trained unit bound to one (record type, target attribute) pair.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct TrainedModel {
	pub record_type: String,
	pub target: String,
	pub sources: Vec<String>,
	pub row_count: u64,
	/// The class vocabulary in first-seen training order; `None` for
	/// regressors. Class indexes everywhere else index into this.
	pub classes: Option<Vec<String>>,
	pub pipeline: FeaturePipeline,
	pub estimator: TrainedEstimator,
}

impl TrainedModel {
	/// Deserialize a `TrainedModel` from a slice.
	pub fn from_slice(slice: &[u8]) -> Result<Self> {
		let Some((&version, rest)) = slice.split_first() else {
			return Err(Error::UnknownModelVersion(0));
		};
		if version != FORMAT_VERSION {
			return Err(Error::UnknownModelVersion(version));
		}
		let model: Self = rmp_serde::from_slice(rest)?;
		Ok(model)
	}

	/// Deserialize a `TrainedModel` by reading the file at `path`.
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = std::fs::File::open(path)?;
		let mut reader = std::io::BufReader::new(file);
		let mut version = [0u8; 1];
		reader.read_exact(&mut version)?;
		if version[0] != FORMAT_VERSION {
			return Err(Error::UnknownModelVersion(version[0]));
		}
		let model: Self = rmp_serde::from_read(&mut reader)?;
		Ok(model)
	}

	/// Write this model to the file at `path`, replacing whatever was
	/// there. The parent directory must already exist.
	pub fn to_file(&self, path: &Path) -> Result<()> {
		let file = std::fs::File::create(path)?;
		let mut writer = std::io::BufWriter::new(file);
		writer.write_all(&[FORMAT_VERSION])?;
		rmp_serde::encode::write_named(&mut writer, self)?;
		writer.flush()?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::estimator::{EstimatorChoice, TrainingLabels};
	use aprender::primitives::Matrix;
	use augur_store::Value;

	fn trained_model() -> TrainedModel {
		let samples = vec![
			vec![Value::Float(1.0)],
			vec![Value::Float(2.0)],
			vec![Value::Float(3.0)],
		];
		let pipeline = FeaturePipeline::fit(&samples, true).unwrap();
		let features = pipeline.transform(&samples).unwrap();
		let estimator = EstimatorChoice::KnnClassifier {
			k: 1,
			weighted: false,
		}
		.fit(&features, &TrainingLabels::Classes(vec![0, 1, 0]))
		.unwrap();
		TrainedModel {
			record_type: "Car".to_owned(),
			target: "color".to_owned(),
			sources: vec!["mileage".to_owned()],
			row_count: 3,
			classes: Some(vec!["red".to_owned(), "blue".to_owned()]),
			pipeline,
			estimator,
		}
	}

	#[test]
	fn test_file_round_trip_predicts_identically() {
		let model = trained_model();
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("color.augur");
		model.to_file(&path).unwrap();
		let reloaded = TrainedModel::from_path(&path).unwrap();
		let test = Matrix::from_vec(1, 1, vec![0.0]).unwrap();
		assert_eq!(
			model.estimator.predict_classes(&test).unwrap(),
			reloaded.estimator.predict_classes(&test).unwrap(),
		);
		assert_eq!(model.classes, reloaded.classes);
		assert_eq!(model.row_count, reloaded.row_count);
	}

	#[test]
	fn test_save_overwrites_prior_file() {
		let model = trained_model();
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("color.augur");
		model.to_file(&path).unwrap();
		let first = std::fs::metadata(&path).unwrap().len();
		model.to_file(&path).unwrap();
		let second = std::fs::metadata(&path).unwrap().len();
		assert_eq!(first, second);
	}

	#[test]
	fn test_unknown_version_is_rejected() {
		let model = trained_model();
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("color.augur");
		model.to_file(&path).unwrap();
		let mut bytes = std::fs::read(&path).unwrap();
		bytes[0] = 9;
		assert!(matches!(
			TrainedModel::from_slice(&bytes),
			Err(Error::UnknownModelVersion(9)),
		));
	}
}

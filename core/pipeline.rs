/*!
This module implements the feature pipeline sitting in front of every base
estimator: impute missing values first, one-hot encode categorical columns
only when the estimator needs them numeric, z-score standardize last.

The per-column encoders are fitted from the full training dataset and
serialized inside the trained model file, so inference applies exactly the
transformation training saw. Standardization delegates to the estimator
library's `StandardScaler`.
*/

use crate::dataset;
use aprender::preprocessing::StandardScaler;
use aprender::primitives::Matrix;
use aprender::traits::Transformer;
use aprender::AprenderError;
use augur_store::Value;
use fnv::FnvHashMap;
use itertools::izip;

/// A fitted pipeline: one encoder per source column, then the scaler.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FeaturePipeline {
	columns: Vec<ColumnEncoder>,
	one_hot: bool,
	scaler: StandardScaler,
}

/// How one source column becomes features.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum ColumnEncoder {
	Number(NumberEncoder),
	Category(CategoryEncoder),
}

/// A numeric column passes through, with nulls filled by the fitted mean.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NumberEncoder {
	pub mean: f32,
}

/// A categorical column one-hot encodes over the options seen in training
/// (or emits the option's ordinal code when the estimator accepts
/// categorical input directly). Nulls are filled with the fitted mode;
/// options never seen in training encode to the all-zeros row.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CategoryEncoder {
	pub options: Vec<String>,
	pub mode: usize,
}

impl CategoryEncoder {
	fn index_of(&self, value: &Value) -> Option<usize> {
		if value.is_null() {
			if self.options.is_empty() {
				None
			} else {
				Some(self.mode)
			}
		} else {
			let class = dataset::class_string(value);
			self.options.iter().position(|option| *option == class)
		}
	}
}

impl FeaturePipeline {
	/// Fit the pipeline on the full training dataset. `one_hot` is decided
	/// by the base estimator's declared input compatibility.
	pub fn fit(samples: &[Vec<Value>], one_hot: bool) -> crate::Result<Self> {
		let n_columns = samples.first().map_or(0, Vec::len);
		let columns = (0..n_columns)
			.map(|index| fit_column(samples, index))
			.collect();
		let mut pipeline = Self {
			columns,
			one_hot,
			scaler: StandardScaler::new(),
		};
		let unscaled = pipeline.encode(samples)?;
		pipeline.scaler.fit(&unscaled)?;
		Ok(pipeline)
	}

	/// Apply the fitted pipeline, producing the feature matrix the
	/// estimator consumes.
	pub fn transform(&self, samples: &[Vec<Value>]) -> crate::Result<Matrix<f32>> {
		let unscaled = self.encode(samples)?;
		let scaled = self.scaler.transform(&unscaled)?;
		Ok(scaled)
	}

	/// The number of feature columns this pipeline produces.
	pub fn n_features(&self) -> usize {
		self.columns
			.iter()
			.map(|encoder| match encoder {
				ColumnEncoder::Number(_) => 1,
				ColumnEncoder::Category(encoder) => {
					if self.one_hot {
						encoder.options.len()
					} else {
						1
					}
				}
			})
			.sum()
	}

	fn encode(&self, samples: &[Vec<Value>]) -> crate::Result<Matrix<f32>> {
		let n_features = self.n_features();
		let mut data = vec![0.0f32; samples.len() * n_features];
		for (row_index, row) in samples.iter().enumerate() {
			let mut offset = row_index * n_features;
			for (encoder, value) in izip!(self.columns.iter(), row.iter()) {
				match encoder {
					ColumnEncoder::Number(encoder) => {
						// A non-numeric value in a numeric column is treated
						// as missing, same as null.
						data[offset] = value
							.as_number()
							.map(|number| number as f32)
							.unwrap_or(encoder.mean);
						offset += 1;
					}
					ColumnEncoder::Category(encoder) => {
						if self.one_hot {
							if let Some(index) = encoder.index_of(value) {
								if index < encoder.options.len() {
									data[offset + index] = 1.0;
								}
							}
							offset += encoder.options.len();
						} else {
							data[offset] = encoder
								.index_of(value)
								.map(|index| index as f32)
								.unwrap_or(-1.0);
							offset += 1;
						}
					}
				}
			}
		}
		let matrix = Matrix::from_vec(samples.len(), n_features, data)
			.map_err(AprenderError::from)?;
		Ok(matrix)
	}
}

fn fit_column(samples: &[Vec<Value>], index: usize) -> ColumnEncoder {
	let numeric = samples
		.iter()
		.all(|row| matches!(row[index], Value::Null | Value::Int(_) | Value::Float(_)));
	if numeric {
		let mut sum = 0.0f64;
		let mut count = 0usize;
		for row in samples {
			if let Some(number) = row[index].as_number() {
				sum += number;
				count += 1;
			}
		}
		let mean = if count > 0 {
			(sum / count as f64) as f32
		} else {
			0.0
		};
		ColumnEncoder::Number(NumberEncoder { mean })
	} else {
		// Options are collected in first-seen order; the mode breaks ties
		// toward the earlier option.
		let mut options: Vec<String> = Vec::new();
		let mut counts: Vec<usize> = Vec::new();
		let mut indexes: FnvHashMap<String, usize> = FnvHashMap::default();
		for row in samples {
			if row[index].is_null() {
				continue;
			}
			let class = dataset::class_string(&row[index]);
			match indexes.get(&class) {
				Some(&option_index) => counts[option_index] += 1,
				None => {
					indexes.insert(class.clone(), options.len());
					options.push(class);
					counts.push(1);
				}
			}
		}
		let mode = counts
			.iter()
			.enumerate()
			.max_by(|(a_index, a), (b_index, b)| a.cmp(b).then(b_index.cmp(a_index)))
			.map(|(option_index, _)| option_index)
			.unwrap_or(0);
		ColumnEncoder::Category(CategoryEncoder { options, mode })
	}
}

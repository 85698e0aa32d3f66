/*!
This module selects, trains and persists base estimators. Every estimator is
the estimator library's; this layer only decides which one to construct,
feeds it the feature matrix, and keeps a serializable rendering of the
trained state inside the model envelope.

Trained state is stored as whatever reconstructs the library estimator
exactly: the K-nearest-neighbors classifier is a lazy learner whose model is
its training data, so that data is the state; linear models store their
fitted weights; trees serialize directly.
*/

use crate::error::{Error, Result};
use aprender::classification::KNearestNeighbors;
use aprender::linear_model::LinearRegression;
use aprender::online::{OnlineLearner, OnlineLearnerConfig, OnlineLinearRegression};
use aprender::primitives::{Matrix, Vector};
use aprender::traits::Estimator as _;
use aprender::tree::{DecisionTreeRegressor, RandomForestRegressor};
use aprender::AprenderError;

/// The value kinds an estimator can consume directly. Estimators that
/// accept continuous but not categorical input need categorical features
/// one-hot encoded in front of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
	Categorical,
	Continuous,
}

/// A base estimator selection, registerable per target attribute. Targets
/// without a registered choice use [`EstimatorChoice::default_for`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum EstimatorChoice {
	KnnClassifier {
		k: usize,
		weighted: bool,
	},
	LinearRegressor,
	DecisionTreeRegressor {
		max_depth: Option<usize>,
	},
	RandomForestRegressor {
		n_trees: usize,
		max_depth: Option<usize>,
		seed: u64,
	},
	OnlineLinearRegressor {
		learning_rate: f64,
	},
}

impl EstimatorChoice {
	/// The default estimator for an attribute: distance-based
	/// classification for categorical targets, ordinary least squares for
	/// continuous ones.
	pub fn default_for(continuous: bool) -> Self {
		if continuous {
			EstimatorChoice::LinearRegressor
		} else {
			EstimatorChoice::KnnClassifier {
				k: 5,
				weighted: false,
			}
		}
	}

	pub fn is_classifier(&self) -> bool {
		matches!(self, EstimatorChoice::KnnClassifier { .. })
	}

	/// Whether the estimator can absorb additional data after an initial
	/// fit. Lazy learners qualify alongside true online learners.
	pub fn supports_partial(&self) -> bool {
		matches!(
			self,
			EstimatorChoice::KnnClassifier { .. } | EstimatorChoice::OnlineLinearRegressor { .. },
		)
	}

	/// The input kinds the underlying estimator declares. Everything the
	/// estimator library provides consumes numeric matrices only.
	pub fn compatibility(&self) -> &'static [DataKind] {
		&[DataKind::Continuous]
	}

	/// One-hot encoding is required exactly when the estimator takes
	/// continuous input but cannot take categorical input directly.
	pub fn needs_one_hot(&self) -> bool {
		let kinds = self.compatibility();
		!kinds.contains(&DataKind::Categorical) && kinds.contains(&DataKind::Continuous)
	}

	/// Train once on the full feature matrix.
	pub fn fit(&self, features: &Matrix<f32>, labels: &TrainingLabels) -> Result<TrainedEstimator> {
		let all_rows: Vec<usize> = (0..features.shape().0).collect();
		self.fit_folds(features, labels, &[all_rows], &mut |_| {})
	}

	/// Train incrementally: fit on the first fold, then absorb the
	/// remaining folds in order. `progress` is called once per completed
	/// fold. Estimators without partial support must be trained through
	/// [`EstimatorChoice::fit`] instead.
	pub fn fit_incremental(
		&self,
		features: &Matrix<f32>,
		labels: &TrainingLabels,
		folds: &[Vec<usize>],
		progress: &mut dyn FnMut(usize),
	) -> Result<TrainedEstimator> {
		self.fit_folds(features, labels, folds, progress)
	}

	fn fit_folds(
		&self,
		features: &Matrix<f32>,
		labels: &TrainingLabels,
		folds: &[Vec<usize>],
		progress: &mut dyn FnMut(usize),
	) -> Result<TrainedEstimator> {
		let (_, n_features) = features.shape();
		match self {
			EstimatorChoice::KnnClassifier { k, weighted } => {
				let classes = labels.classes()?;
				let mut state = KnnClassifierState {
					k: *k,
					weighted: *weighted,
					n_features,
					samples: Vec::new(),
					labels: Vec::new(),
				};
				for (fold_index, fold) in folds.iter().enumerate() {
					state.absorb(features, classes, fold);
					progress(fold_index);
				}
				Ok(TrainedEstimator::KnnClassifier(state))
			}
			EstimatorChoice::LinearRegressor => {
				let numbers = labels.numbers()?;
				// OLS has no incremental update: a single fit over every
				// fold's rows.
				let rows: Vec<usize> = folds.iter().flatten().copied().collect();
				let x = select_rows(features, &rows)?;
				let y: Vec<f32> = rows.iter().map(|row| numbers[*row]).collect();
				let mut model = LinearRegression::new();
				model.fit(&x, &Vector::from_slice(&y))?;
				for (fold_index, _) in folds.iter().enumerate() {
					progress(fold_index);
				}
				Ok(TrainedEstimator::LinearRegressor(LinearRegressorState {
					coefficients: model.coefficients().as_slice().to_vec(),
					intercept: model.intercept(),
				}))
			}
			EstimatorChoice::DecisionTreeRegressor { max_depth } => {
				let numbers = labels.numbers()?;
				let rows: Vec<usize> = folds.iter().flatten().copied().collect();
				let x = select_rows(features, &rows)?;
				let y: Vec<f32> = rows.iter().map(|row| numbers[*row]).collect();
				let mut model = DecisionTreeRegressor::new();
				if let Some(max_depth) = max_depth {
					model = model.with_max_depth(*max_depth);
				}
				model.fit(&x, &Vector::from_slice(&y))?;
				for (fold_index, _) in folds.iter().enumerate() {
					progress(fold_index);
				}
				Ok(TrainedEstimator::DecisionTreeRegressor(model))
			}
			EstimatorChoice::RandomForestRegressor {
				n_trees,
				max_depth,
				seed,
			} => {
				let numbers = labels.numbers()?;
				let rows: Vec<usize> = folds.iter().flatten().copied().collect();
				let x = select_rows(features, &rows)?;
				let y: Vec<f32> = rows.iter().map(|row| numbers[*row]).collect();
				let mut model = RandomForestRegressor::new(*n_trees).with_random_state(*seed);
				if let Some(max_depth) = max_depth {
					model = model.with_max_depth(*max_depth);
				}
				model.fit(&x, &Vector::from_slice(&y))?;
				for (fold_index, _) in folds.iter().enumerate() {
					progress(fold_index);
				}
				Ok(TrainedEstimator::RandomForestRegressor(model))
			}
			EstimatorChoice::OnlineLinearRegressor { learning_rate } => {
				let numbers = labels.numbers()?;
				let config = OnlineLearnerConfig {
					learning_rate: *learning_rate,
					..OnlineLearnerConfig::default()
				};
				let mut model = OnlineLinearRegression::with_config(n_features, config);
				for (fold_index, fold) in folds.iter().enumerate() {
					for row in fold {
						let x: Vec<f64> = matrix_row(features, *row)
							.into_iter()
							.map(f64::from)
							.collect();
						model.partial_fit(&x, &[f64::from(numbers[*row])], None)?;
					}
					progress(fold_index);
				}
				Ok(TrainedEstimator::OnlineLinearRegressor(OnlineLinearState {
					weights: model.weights().to_vec(),
					bias: model.bias(),
				}))
			}
		}
	}
}

/// Labels resolved for training: class indexes into the model's class
/// vocabulary for classifiers, numbers for regressors.
#[derive(Debug, Clone)]
pub enum TrainingLabels {
	Classes(Vec<usize>),
	Numbers(Vec<f32>),
}

impl TrainingLabels {
	fn classes(&self) -> Result<&[usize]> {
		match self {
			TrainingLabels::Classes(classes) => Ok(classes),
			TrainingLabels::Numbers(_) => Err(Error::Estimator(AprenderError::from(
				"a classifier cannot train on numeric labels",
			))),
		}
	}

	fn numbers(&self) -> Result<&[f32]> {
		match self {
			TrainingLabels::Numbers(numbers) => Ok(numbers),
			TrainingLabels::Classes(_) => Err(Error::Estimator(AprenderError::from(
				"a regressor cannot train on class labels",
			))),
		}
	}
}

/// A trained estimator in its persistable rendering.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub enum TrainedEstimator {
	KnnClassifier(KnnClassifierState),
	LinearRegressor(LinearRegressorState),
	DecisionTreeRegressor(DecisionTreeRegressor),
	RandomForestRegressor(RandomForestRegressor),
	OnlineLinearRegressor(OnlineLinearState),
}

/// The K-nearest-neighbors model is its training data.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct KnnClassifierState {
	k: usize,
	weighted: bool,
	n_features: usize,
	samples: Vec<f32>,
	labels: Vec<usize>,
}

impl KnnClassifierState {
	fn absorb(&mut self, features: &Matrix<f32>, classes: &[usize], rows: &[usize]) {
		for row in rows {
			self.samples.extend(matrix_row(features, *row));
			self.labels.push(classes[*row]);
		}
	}

	fn build(&self) -> Result<KNearestNeighbors> {
		let n_samples = self.labels.len();
		let samples = Matrix::from_vec(n_samples, self.n_features, self.samples.clone())
			.map_err(AprenderError::from)?;
		// k is capped by the number of training samples the library will
		// accept.
		let k = self.k.max(1).min(n_samples.max(1));
		let mut model = KNearestNeighbors::new(k).with_weights(self.weighted);
		model.fit(&samples, &self.labels)?;
		Ok(model)
	}
}

/// Ordinary least squares reduced to its fitted weights.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct LinearRegressorState {
	coefficients: Vec<f32>,
	intercept: f32,
}

/// An online linear learner reduced to its fitted weights.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct OnlineLinearState {
	weights: Vec<f64>,
	bias: f64,
}

impl TrainedEstimator {
	pub fn is_classifier(&self) -> bool {
		matches!(self, TrainedEstimator::KnnClassifier(_))
	}

	/// Predict class indexes for every row of `features`.
	pub fn predict_classes(&self, features: &Matrix<f32>) -> Result<Vec<usize>> {
		match self {
			TrainedEstimator::KnnClassifier(state) => {
				let model = state.build()?;
				Ok(model.predict(features)?)
			}
			_ => Err(Error::Estimator(AprenderError::from(
				"a regressor cannot predict classes",
			))),
		}
	}

	/// Predict numeric values for every row of `features`.
	pub fn predict_numbers(&self, features: &Matrix<f32>) -> Result<Vec<f32>> {
		match self {
			TrainedEstimator::KnnClassifier(_) => Err(Error::Estimator(AprenderError::from(
				"a classifier cannot predict numbers",
			))),
			TrainedEstimator::LinearRegressor(state) => {
				let (n_samples, _) = features.shape();
				let predictions = (0..n_samples)
					.map(|row| {
						let x = matrix_row(features, row);
						state
							.coefficients
							.iter()
							.zip(x.iter())
							.map(|(weight, value)| weight * value)
							.sum::<f32>() + state.intercept
					})
					.collect();
				Ok(predictions)
			}
			TrainedEstimator::DecisionTreeRegressor(model) => {
				Ok(model.predict(features).as_slice().to_vec())
			}
			TrainedEstimator::RandomForestRegressor(model) => {
				Ok(model.predict(features).as_slice().to_vec())
			}
			TrainedEstimator::OnlineLinearRegressor(state) => {
				let (n_samples, _) = features.shape();
				let predictions = (0..n_samples)
					.map(|row| {
						let x = matrix_row(features, row);
						let value: f64 = state
							.weights
							.iter()
							.zip(x.iter())
							.map(|(weight, value)| weight * f64::from(*value))
							.sum::<f64>() + state.bias;
						value as f32
					})
					.collect();
				Ok(predictions)
			}
		}
	}

	/// Per-class probabilities for every row of `features`, indexed by the
	/// class vocabulary. Classifiers only.
	pub fn predict_proba(&self, features: &Matrix<f32>) -> Result<Vec<Vec<f32>>> {
		match self {
			TrainedEstimator::KnnClassifier(state) => {
				let model = state.build()?;
				Ok(model.predict_proba(features)?)
			}
			_ => Err(Error::Estimator(AprenderError::from(
				"a regressor has no class probabilities",
			))),
		}
	}
}

fn matrix_row(features: &Matrix<f32>, row: usize) -> Vec<f32> {
	let (_, n_features) = features.shape();
	(0..n_features)
		.map(|column| features.get(row, column))
		.collect()
}

fn select_rows(features: &Matrix<f32>, rows: &[usize]) -> Result<Matrix<f32>> {
	let (_, n_features) = features.shape();
	let mut data = Vec::with_capacity(rows.len() * n_features);
	for row in rows {
		data.extend(matrix_row(features, *row));
	}
	let matrix =
		Matrix::from_vec(rows.len(), n_features, data).map_err(AprenderError::from)?;
	Ok(matrix)
}

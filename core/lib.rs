/*!
augur attaches trainable classifiers and regressors to an application's
record types, so a missing attribute's value can be predicted from the
record's other attributes.

This crate is the orchestration layer: it builds datasets from records,
fits a feature pipeline (impute, conditionally one-hot encode, z-score
standardize) in front of a base estimator from the estimator library,
trains in one shot or incrementally over ten folds, persists the trained
unit to a path derived from the record type and attribute names, and
answers single-value predictions or ranked class distributions for a
record instance. The record layer it reads from is defined by the
`augur_store` crate; the estimators are `aprender`'s.
*/

pub mod capability;
pub mod config;
pub mod dataset;
pub mod error;
pub mod estimator;
pub mod model;
pub mod path;
pub mod pipeline;
pub mod predict;
pub mod progress;
pub mod train;

#[cfg(test)]
mod fixtures;

pub use self::{
	capability::{Predictable, Registry},
	config::Paths,
	dataset::Dataset,
	error::{Error, Result},
	estimator::EstimatorChoice,
	model::TrainedModel,
	predict::Predictor,
	progress::{Progress, ProgressCounter, TrainPhase},
	train::train,
};

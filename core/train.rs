/*!
This module orchestrates training. For every predictable attribute of a
record type it resolves a base estimator, streams the matching records in
fixed-size pages into a labeled dataset, fits the feature pipeline, trains
once or incrementally over ten folds, and persists the trained unit to its
resolved path, overwriting any prior file.

Failures propagate immediately: an error on one attribute aborts the
remaining attributes of the run, and nothing is retried.
*/

use crate::{
	capability::Predictable,
	config::Paths,
	dataset::{self, Dataset},
	error::{Error, Result},
	estimator::{EstimatorChoice, TrainingLabels},
	model::TrainedModel,
	pipeline::FeaturePipeline,
	progress::{Progress, ProgressCounter, TrainPhase},
};
use aprender::model_selection::KFold;
use augur_store::Scope;
use fnv::FnvHashMap;
use num_traits::ToPrimitive;
use std::collections::BTreeMap;

/// Records are paged in this many at a time to bound memory during reads.
pub const PAGE_SIZE: usize = 100;

/// Incremental training always splits the dataset into this many folds.
pub const FOLDS: usize = 10;

/// Train a model for every predictable attribute of `record_type`, writing
/// each trained unit under `paths`.
pub fn train(
	record_type: &dyn Predictable,
	paths: &Paths,
	update_progress: &mut dyn FnMut(Progress),
) -> Result<()> {
	let type_name = record_type.schema().name().to_owned();
	let attributes = record_type.predictable_attributes();
	let estimators = record_type.estimators();
	let scopes = record_type.training_scopes();
	for (target, sources) in &attributes {
		tracing::info!(record_type = %type_name, attribute = %target, "training");
		train_attribute(
			record_type,
			&type_name,
			target,
			sources,
			&estimators,
			&scopes,
			paths,
			update_progress,
		)?;
		tracing::info!(record_type = %type_name, attribute = %target, "trained");
	}
	Ok(())
}

#[allow(clippy::too_many_arguments)]
fn train_attribute(
	record_type: &dyn Predictable,
	type_name: &str,
	target: &str,
	sources: &[String],
	estimators: &BTreeMap<String, EstimatorChoice>,
	scopes: &[Scope],
	paths: &Paths,
	update_progress: &mut dyn FnMut(Progress),
) -> Result<()> {
	// Resolve the base estimator: the registered choice for this attribute,
	// else the default for the attribute's continuity.
	let choice = match estimators.get(target) {
		Some(choice) => choice.clone(),
		None => EstimatorChoice::default_for(record_type.is_attribute_continuous(target)?),
	};

	let record_count = record_type.count(scopes)?;
	update_progress(Progress {
		attribute: target.to_owned(),
		phase: TrainPhase::Starting {
			record_count,
			source_count: sources.len(),
		},
	});
	if record_count == 0 {
		return Err(Error::EmptyTrainingSet {
			record_type: type_name.to_owned(),
			attribute: target.to_owned(),
		});
	}

	// Page through every matching record, accumulating the samples and
	// labels in parallel order.
	let loading = ProgressCounter::new(record_count);
	update_progress(Progress {
		attribute: target.to_owned(),
		phase: TrainPhase::Loading(loading.clone()),
	});
	let mut samples = Vec::new();
	let mut labels = Vec::new();
	record_type.for_each_page(scopes, PAGE_SIZE, &mut |records| {
		for record in records {
			samples.push(dataset::build_sample(*record, sources));
			labels.push(dataset::build_label(*record, target));
		}
		loading.inc(records.len().to_u64().unwrap_or(0));
	})?;
	let dataset = Dataset::labeled(samples, labels);

	// Impute, conditionally encode, standardize.
	let pipeline = FeaturePipeline::fit(dataset.samples(), choice.needs_one_hot())?;
	let features = pipeline.transform(dataset.samples())?;
	let (classes, training_labels) = resolve_labels(&choice, &dataset, target)?;

	let estimator = if choice.supports_partial() && dataset.len() >= FOLDS {
		let folding = ProgressCounter::new(FOLDS.to_u64().unwrap_or(0));
		update_progress(Progress {
			attribute: target.to_owned(),
			phase: TrainPhase::TrainingOnline(folding.clone()),
		});
		let folds = fold_rows(dataset.len());
		choice.fit_incremental(&features, &training_labels, &folds, &mut |_| {
			folding.inc(1)
		})?
	} else {
		update_progress(Progress {
			attribute: target.to_owned(),
			phase: TrainPhase::TrainingBatch,
		});
		choice.fit(&features, &training_labels)?
	};

	update_progress(Progress {
		attribute: target.to_owned(),
		phase: TrainPhase::Saving,
	});
	let model = TrainedModel {
		record_type: type_name.to_owned(),
		target: target.to_owned(),
		sources: sources.to_vec(),
		row_count: record_count,
		classes,
		pipeline,
		estimator,
	};
	std::fs::create_dir_all(paths.type_dir(type_name))?;
	model.to_file(&paths.model_path(type_name, target))?;

	update_progress(Progress {
		attribute: target.to_owned(),
		phase: TrainPhase::Complete,
	});
	Ok(())
}

/// Split `n_samples` rows into the ten disjoint, exhaustive folds used for
/// incremental training: the test sets of an unshuffled k-fold split.
fn fold_rows(n_samples: usize) -> Vec<Vec<usize>> {
	KFold::new(FOLDS)
		.split(n_samples)
		.into_iter()
		.map(|(_, fold)| fold)
		.collect()
}

/// Resolve string labels for the chosen estimator: a class vocabulary in
/// first-seen order for classifiers, parsed numbers for regressors. A
/// non-numeric regression label (including the `"?"` sentinel for a null
/// target) is a typed error rather than silent garbage.
fn resolve_labels(
	choice: &EstimatorChoice,
	dataset: &Dataset,
	target: &str,
) -> Result<(Option<Vec<String>>, TrainingLabels)> {
	let labels = dataset.labels().unwrap_or_default();
	if choice.is_classifier() {
		let mut classes: Vec<String> = Vec::new();
		let mut indexes: FnvHashMap<String, usize> = FnvHashMap::default();
		let mut resolved = Vec::with_capacity(labels.len());
		for label in labels {
			let index = match indexes.get(label) {
				Some(&index) => index,
				None => {
					let index = classes.len();
					indexes.insert(label.clone(), index);
					classes.push(label.clone());
					index
				}
			};
			resolved.push(index);
		}
		Ok((Some(classes), TrainingLabels::Classes(resolved)))
	} else {
		let numbers = labels
			.iter()
			.map(|label| {
				label.parse::<f32>().map_err(|_| Error::NonNumericLabel {
					attribute: target.to_owned(),
					label: label.clone(),
				})
			})
			.collect::<Result<Vec<f32>>>()?;
		Ok((None, TrainingLabels::Numbers(numbers)))
	}
}

/*!
This module builds datasets from records: ordered rows of raw attribute
values, optionally paired 1:1 with class labels.

Feature values pass through untouched — imputing missing values, encoding
categories and scaling are the pipeline's job. Labels are different: a null
label becomes the `"?"` sentinel so that missing labels never collapse with
missing features, and composite values are flattened to a deterministic JSON
string so they can act as class labels.
*/

use crate::{
	capability::Predictable,
	error::{Error, Result},
};
use augur_store::{Record, Value};

/// The sentinel class standing in for a missing label.
pub const MISSING_LABEL: &str = "?";

/// An ordered sequence of fixed-arity feature rows, labeled or not.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
	samples: Vec<Vec<Value>>,
	labels: Option<Vec<String>>,
}

impl Dataset {
	pub fn labeled(samples: Vec<Vec<Value>>, labels: Vec<String>) -> Self {
		debug_assert_eq!(samples.len(), labels.len());
		Self {
			samples,
			labels: Some(labels),
		}
	}

	pub fn unlabeled(samples: Vec<Vec<Value>>) -> Self {
		Self {
			samples,
			labels: None,
		}
	}

	pub fn len(&self) -> usize {
		self.samples.len()
	}

	pub fn is_empty(&self) -> bool {
		self.samples.is_empty()
	}

	pub fn samples(&self) -> &[Vec<Value>] {
		&self.samples
	}

	pub fn labels(&self) -> Option<&[String]> {
		self.labels.as_deref()
	}
}

/// Read the named source attributes off `record`, in order, producing one
/// fixed-length feature row. Values are not cleaned here.
pub fn build_sample(record: &dyn Record, source_attributes: &[String]) -> Vec<Value> {
	source_attributes
		.iter()
		.map(|attribute| record.get(attribute))
		.collect()
}

/// Read the target attribute off `record` as a class label: null becomes
/// the `"?"` sentinel, everything else its canonical string rendering.
pub fn build_label(record: &dyn Record, target: &str) -> String {
	class_string(&record.get(target))
}

/// The canonical string rendering of a value. Equal values always render to
/// equal strings; composites render to their JSON encoding with sorted keys.
pub fn class_string(value: &Value) -> String {
	match value {
		Value::Null => MISSING_LABEL.to_owned(),
		Value::Bool(value) => value.to_string(),
		Value::Int(value) => value.to_string(),
		Value::Float(value) => value.to_string(),
		Value::Text(value) => value.clone(),
		Value::Json(value) => canonical_json(value),
	}
}

/// Render a JSON value with object keys sorted, independent of whether
/// `serde_json`'s `preserve_order` feature is enabled in the build (it is
/// enabled transitively by the estimator library's dependency tree, which
/// disables the crate's default key sorting). Arrays keep their order.
fn canonical_json(value: &serde_json::Value) -> String {
	match value {
		serde_json::Value::Object(map) => {
			let mut keys: Vec<&String> = map.keys().collect();
			keys.sort();
			let body = keys
				.into_iter()
				.map(|key| {
					format!(
						"{}:{}",
						serde_json::Value::String(key.clone()),
						canonical_json(&map[key]),
					)
				})
				.collect::<Vec<_>>()
				.join(",");
			format!("{{{}}}", body)
		}
		serde_json::Value::Array(items) => {
			let body = items
				.iter()
				.map(canonical_json)
				.collect::<Vec<_>>()
				.join(",");
			format!("[{}]", body)
		}
		other => other.to_string(),
	}
}

/// Build the single unlabeled row used to predict `target` for `record`,
/// reading the declared source-attribute list off the record type.
pub fn build_unlabeled_dataset(
	record: &dyn Record,
	record_type: &dyn Predictable,
	target: &str,
) -> Result<Dataset> {
	let attributes = record_type.predictable_attributes();
	let sources = attributes
		.get(target)
		.ok_or_else(|| Error::UnknownAttribute {
			record_type: record_type.schema().name().to_owned(),
			attribute: target.to_owned(),
		})?;
	Ok(Dataset::unlabeled(vec![build_sample(record, sources)]))
}

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while training or predicting.
///
/// Configuration errors (`UnknownRecordType`, `UnknownAttribute`,
/// `MissingCast`) are fatal at the boundary where they occur. Training
/// errors propagate immediately and abort the remaining attributes of the
/// run; there is no retry anywhere.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("no record type named `{0}` is registered")]
	UnknownRecordType(String),
	#[error("`{attribute}` is not a predictable attribute of `{record_type}`")]
	UnknownAttribute {
		record_type: String,
		attribute: String,
	},
	#[error("the attribute `{0}` has no declared cast")]
	MissingCast(String),
	#[error(
		"cannot rank predictions for the continuous attribute `{0}`; use `predict` instead"
	)]
	ContinuousAttribute(String),
	#[error(
		"no trained model found for record type `{record_type}` at {}; train it first",
		.path.display()
	)]
	ModelFileNotFound {
		record_type: String,
		path: PathBuf,
	},
	#[error("no records matched the training scopes for `{record_type}`.`{attribute}`")]
	EmptyTrainingSet {
		record_type: String,
		attribute: String,
	},
	#[error("the label `{label}` for the continuous attribute `{attribute}` is not numeric")]
	NonNumericLabel { attribute: String, label: String },
	#[error("unsupported model file version {0}")]
	UnknownModelVersion(u8),
	#[error(transparent)]
	Estimator(#[from] aprender::AprenderError),
	#[error(transparent)]
	Store(#[from] augur_store::Error),
	#[error(transparent)]
	Io(#[from] std::io::Error),
	#[error("failed to decode model file: {0}")]
	Decode(#[from] rmp_serde::decode::Error),
	#[error("failed to encode model file: {0}")]
	Encode(#[from] rmp_serde::encode::Error),
}

/*!
This module defines [`Paths`], the configuration telling the trainer and
predictor where trained model files live.
*/

use crate::path;
use std::path::{Path, PathBuf};

/// Where trained models are stored. Deserializable so embedding
/// applications can read it from their own configuration files.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Paths {
	#[serde(default = "default_base")]
	pub base: PathBuf,
}

impl Default for Paths {
	fn default() -> Paths {
		Paths {
			base: default_base(),
		}
	}
}

impl Paths {
	pub fn new(base: impl Into<PathBuf>) -> Self {
		Self { base: base.into() }
	}

	/// The directory holding every trained model for `record_type`.
	pub fn type_dir(&self, record_type: &str) -> PathBuf {
		self.model_path(record_type, "x")
			.parent()
			.map(Path::to_path_buf)
			.unwrap_or_else(|| self.base.clone())
	}

	/// The file the trained model for `(record_type, attribute)` lives at.
	pub fn model_path(&self, record_type: &str, attribute: &str) -> PathBuf {
		path::resolve(&self.base, record_type, attribute)
	}
}

fn default_base() -> PathBuf {
	PathBuf::from("models")
}

#[test]
fn test_default_base() {
	let paths = Paths::default();
	assert_eq!(
		paths.model_path("Car", "color"),
		PathBuf::from("models/Car/color.augur"),
	);
	assert_eq!(paths.type_dir("Car"), PathBuf::from("models/Car"));
}

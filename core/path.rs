//! Deterministic filesystem paths for trained models.

use std::path::{Path, PathBuf};

pub const MODEL_EXTENSION: &str = "augur";

/// Resolve the path of the trained model for `(record_type, attribute)`
/// under `base`.
///
/// Pure function of its inputs: the same pair always resolves to the same
/// path, and distinct pairs never collide because every byte outside
/// `[A-Za-z0-9_-]` is percent-escaped (including `%` itself). This function
/// creates nothing on disk; the base directory and the type subdirectory
/// must exist before a model is saved there, and the trainer creates them
/// right before saving.
pub fn resolve(base: &Path, record_type: &str, attribute: &str) -> PathBuf {
	let mut path = base.join(sanitize(record_type));
	path.push(format!("{}.{}", sanitize(attribute), MODEL_EXTENSION));
	path
}

fn sanitize(segment: &str) -> String {
	let mut out = String::with_capacity(segment.len());
	for byte in segment.bytes() {
		match byte {
			b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' => out.push(byte as char),
			_ => {
				out.push('%');
				out.push_str(&format!("{:02x}", byte));
			}
		}
	}
	out
}

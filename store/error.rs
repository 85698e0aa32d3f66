/// Failures surfaced by a record source.
///
/// The in-memory reference store never fails, but the contract leaves room
/// for real backends whose count and page reads can.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("record source error: {0}")]
	Source(String),
}

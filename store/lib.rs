/*!
This crate defines the record-layer contract the augur trainer and predictor
consume: typed attribute values, declared casts, per-type schemas, read access
to a single record, filter scopes, and counted/paged bulk retrieval. It also
provides `MemoryStore`, an in-memory reference implementation of the contract
used by embedding applications before they wire a real backend, and by the
test suites. It is deliberately not a persistence layer.
*/

pub mod cast;
pub mod error;
pub mod memory;
pub mod record;
pub mod schema;
pub mod scope;
pub mod source;
pub mod value;

pub use self::{
	cast::Cast,
	error::Error,
	memory::{MemoryRecord, MemoryStore},
	record::Record,
	schema::Schema,
	scope::Scope,
	source::RecordSource,
	value::Value,
};

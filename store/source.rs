use crate::{error::Error, record::Record, scope::Scope};

/// Counted, filtered, paged bulk retrieval over a record type's rows.
///
/// Pages are delivered to a callback so sources can stream without
/// materializing the whole set; the page size is chosen by the caller and
/// every page except the last carries exactly that many records.
pub trait RecordSource {
	/// Count the records matching all of the given scopes.
	fn count(&self, scopes: &[Scope]) -> Result<u64, Error>;

	/// Stream the records matching all of the given scopes, in stable order,
	/// `page_size` at a time.
	fn for_each_page(
		&self,
		scopes: &[Scope],
		page_size: usize,
		page: &mut dyn FnMut(&[&dyn Record]),
	) -> Result<(), Error>;
}

/// Storage-layer failure is the only way the ledger fails: there is no
/// schema to violate and nothing to validate beyond the insert itself.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("ledger storage failure: {0}")]
	Persistence(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Append-only upload ledger backed by SQLite.
//!
//! One row per observed upload, written independently of metadata
//! extraction: an extractor blowing up on a file's contents must never cost
//! the ledger its row for that upload, and vice versa. There is no update or
//! delete surface: this is an observability log, not a record store.
//!
//! Each append is a single atomic insert, so concurrent uploads cannot
//! corrupt one another's rows. Reads are full-table scans that tolerate
//! appends happening alongside them.

#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	clippy::expect_used,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::as_conversions,
	clippy::dbg_macro
)]
#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use std::path::Path;

use chrono::{DateTime, Utc};
use sqlx::{
	sqlite::{SqliteConnectOptions, SqlitePoolOptions},
	SqlitePool,
};
use tracing::debug;

mod error;

pub use error::{Error, Result};

/// One observed upload.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct UploadLedgerEntry {
	pub filename: String,
	pub filetype: String,
	/// Stored as TEXT in the ledger schema; kept as the stored rendering.
	pub filesize: String,
	#[sqlx(rename = "uploadDate")]
	pub uploaded_at: DateTime<Utc>,
}

/// Scoped handle to the ledger database.
///
/// Owns its connection pool: opened on construction, released when the last
/// clone drops. All access goes through [`Self::append`] and the read
/// methods; there is no ambient global connection.
#[derive(Clone, Debug)]
pub struct UploadLedger {
	pool: SqlitePool,
}

impl UploadLedger {
	/// Opens the ledger database at `path`, creating the file and the
	/// uploads table if either is absent.
	pub async fn open(path: impl AsRef<Path> + Send) -> Result<Self> {
		let options = SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true);
		let pool = SqlitePoolOptions::new().connect_with(options).await?;
		Self::with_pool(pool).await
	}

	/// An in-memory ledger for tests and ephemeral sessions.
	///
	/// Pinned to a single never-reaped connection: SQLite's `:memory:`
	/// database lives and dies with its connection.
	pub async fn in_memory() -> Result<Self> {
		let pool = SqlitePoolOptions::new()
			.max_connections(1)
			.idle_timeout(None)
			.max_lifetime(None)
			.connect("sqlite::memory:")
			.await?;
		Self::with_pool(pool).await
	}

	async fn with_pool(pool: SqlitePool) -> Result<Self> {
		sqlx::query(
			"CREATE TABLE IF NOT EXISTS filestable \
			 (filename TEXT, filetype TEXT, filesize TEXT, uploadDate TIMESTAMP)",
		)
		.execute(&pool)
		.await?;
		Ok(Self { pool })
	}

	/// Records one upload observation, stamped with the current UTC time.
	pub async fn append(&self, filename: &str, filetype: &str, filesize: u64) -> Result<()> {
		sqlx::query(
			"INSERT INTO filestable (filename, filetype, filesize, uploadDate) \
			 VALUES (?, ?, ?, ?)",
		)
		.bind(filename)
		.bind(filetype)
		.bind(filesize.to_string())
		.bind(Utc::now())
		.execute(&self.pool)
		.await?;

		debug!(filename, filetype, filesize, "recorded upload");
		Ok(())
	}

	/// Every recorded entry, in insertion order.
	pub async fn read_all(&self) -> Result<Vec<UploadLedgerEntry>> {
		Ok(sqlx::query_as(
			"SELECT filename, filetype, filesize, uploadDate FROM filestable ORDER BY rowid",
		)
		.fetch_all(&self.pool)
		.await?)
	}

	/// Upload counts per MIME type, for the distribution view.
	pub async fn filetype_counts(&self) -> Result<Vec<(String, i64)>> {
		Ok(sqlx::query_as(
			"SELECT filetype, COUNT(*) FROM filestable GROUP BY filetype ORDER BY filetype",
		)
		.fetch_all(&self.pool)
		.await?)
	}

	/// Closes the pool, flushing outstanding work. Dropping the last clone
	/// does this implicitly; callers that want deterministic shutdown call
	/// it explicitly.
	pub async fn close(&self) {
		self.pool.close().await;
	}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn append_then_read_round_trips() {
		let before = Utc::now();
		let ledger = UploadLedger::in_memory().await.unwrap();
		ledger.append("x.jpg", "image/jpeg", 1024).await.unwrap();

		let entries = ledger.read_all().await.unwrap();
		assert_eq!(entries.len(), 1);
		assert_eq!(entries[0].filename, "x.jpg");
		assert_eq!(entries[0].filetype, "image/jpeg");
		assert_eq!(entries[0].filesize, "1024");
		assert!(entries[0].uploaded_at >= before);
	}

	#[tokio::test]
	async fn read_all_returns_entries_in_insertion_order() {
		let ledger = UploadLedger::in_memory().await.unwrap();
		for name in ["a.png", "b.mp3", "c.pdf"] {
			ledger.append(name, "application/octet-stream", 1).await.unwrap();
		}

		let names: Vec<_> = ledger
			.read_all()
			.await
			.unwrap()
			.into_iter()
			.map(|entry| entry.filename)
			.collect();
		assert_eq!(names, ["a.png", "b.mp3", "c.pdf"]);
	}

	#[tokio::test]
	async fn concurrent_appends_both_land() {
		let ledger = UploadLedger::in_memory().await.unwrap();
		let (first, second) = tokio::join!(
			ledger.append("left.jpg", "image/jpeg", 10),
			ledger.append("right.jpg", "image/jpeg", 20),
		);
		first.unwrap();
		second.unwrap();

		assert_eq!(ledger.read_all().await.unwrap().len(), 2);
	}

	#[tokio::test]
	async fn filetype_counts_group_uploads() {
		let ledger = UploadLedger::in_memory().await.unwrap();
		ledger.append("a.jpg", "image/jpeg", 1).await.unwrap();
		ledger.append("b.jpg", "image/jpeg", 2).await.unwrap();
		ledger.append("c.mp3", "audio/mpeg", 3).await.unwrap();

		let counts = ledger.filetype_counts().await.unwrap();
		assert_eq!(
			counts,
			[("audio/mpeg".to_owned(), 1), ("image/jpeg".to_owned(), 2)]
		);
	}

	#[tokio::test]
	async fn reopening_a_ledger_file_keeps_its_rows() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("uploads.db");

		{
			let ledger = UploadLedger::open(&path).await.unwrap();
			ledger.append("kept.pdf", "application/pdf", 99).await.unwrap();
			ledger.close().await;
		}

		let reopened = UploadLedger::open(&path).await.unwrap();
		let entries = reopened.read_all().await.unwrap();
		assert_eq!(entries.len(), 1);
		assert_eq!(entries[0].filename, "kept.pdf");
	}
}

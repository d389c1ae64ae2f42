//! PDF document text and tag extraction.

use std::path::Path;

use fm_utils::error::FileIOError;
use lopdf::Document;
use tokio::task::spawn_blocking;
use tracing::debug;

use crate::{
	stats::FileStats,
	value::{RawTagMap, TagValue},
	Error, Result,
};

/// Extracted view of one PDF upload.
#[derive(Default, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentMetadata {
	/// Text of every page, concatenated in page order.
	pub full_text: String,
	/// Actual page count of the document.
	pub pages: usize,
}

impl DocumentMetadata {
	/// Parses raw bytes as a PDF and extracts its text page by page.
	///
	/// Fails with [`Error::UnreadablePdf`] when the bytes are not a
	/// parseable PDF structure. Pages whose text cannot be decoded
	/// contribute nothing rather than aborting the document.
	pub fn from_slice(bytes: &[u8]) -> Result<Self> {
		let document = Document::load_mem(bytes).map_err(Error::UnreadablePdf)?;

		let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
		let mut full_text = String::new();
		for page in &page_numbers {
			match document.extract_text(&[*page]) {
				Ok(text) => full_text.push_str(&text),
				Err(e) => debug!("no extractable text on page {page}: {e}"),
			}
		}

		Ok(Self {
			full_text,
			pages: page_numbers.len(),
		})
	}

	pub async fn from_path(path: impl AsRef<Path> + Send) -> Result<Self> {
		let path = path.as_ref().to_owned();
		let bytes = tokio::fs::read(&path)
			.await
			.map_err(|e| FileIOError::from((path, e)))?;
		spawn_blocking(move || Self::from_slice(&bytes)).await?
	}

	/// Newline-separated segment count of the extracted text.
	///
	/// This is what `Number_of_Pages` has always reported. It is NOT the
	/// actual page count (see [`Self::pages`] for that), but downstream
	/// consumers expect the historical value, so it is preserved as-is.
	#[must_use]
	pub fn line_segments(&self) -> usize {
		self.full_text.split('\n').count()
	}

	/// The document's tag table, combining the historical page figure with
	/// the caller's file facts.
	#[must_use]
	pub fn tag_map(&self, stats: &FileStats) -> RawTagMap {
		let mut map = RawTagMap::new();
		map.insert("Number_of_Pages".to_owned(), self.line_segments().into());
		map.insert("File_Name".to_owned(), stats.filename.as_str().into());
		map.insert("File_Size".to_owned(), stats.size.into());
		map.insert(
			"File_Type".to_owned(),
			TagValue::Text(stats.mime_type.clone()),
		);
		map
	}
}

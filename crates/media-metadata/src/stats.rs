//! Caller-supplied upload facts and their stat table.

use std::fs::Metadata;

use fm_utils::time::{epoch_secs, human_readable_time};

use crate::value::{RawTagMap, TagValue};

/// What the surrounding application knows about an upload before any
/// extraction happens: the declared name/MIME/size plus the OS stat triple
/// as epoch seconds.
#[derive(Default, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FileStats {
	pub filename: String,
	pub mime_type: String,
	pub size: u64,
	pub accessed: i64,
	pub created: i64,
	pub modified: i64,
}

impl FileStats {
	#[must_use]
	pub fn new(
		filename: impl Into<String>,
		mime_type: impl Into<String>,
		size: u64,
		accessed: i64,
		created: i64,
		modified: i64,
	) -> Self {
		Self {
			filename: filename.into(),
			mime_type: mime_type.into(),
			size,
			accessed,
			created,
			modified,
		}
	}

	/// Builds stats from the filesystem metadata of an on-disk file.
	///
	/// Timestamps a platform does not track come through as the epoch.
	#[must_use]
	pub fn from_fs_metadata(
		filename: impl Into<String>,
		mime_type: impl Into<String>,
		metadata: &Metadata,
	) -> Self {
		Self {
			filename: filename.into(),
			mime_type: mime_type.into(),
			size: metadata.len(),
			accessed: metadata.accessed().map_or(0, epoch_secs),
			created: metadata.created().map_or(0, epoch_secs),
			modified: metadata.modified().map_or(0, epoch_secs),
		}
	}

	/// The stat table shown (and exported) ahead of every extractor table.
	#[must_use]
	pub fn tag_map(&self) -> RawTagMap {
		let mut map = RawTagMap::new();
		map.insert("Filename".to_owned(), self.filename.as_str().into());
		map.insert("FileType".to_owned(), self.mime_type.as_str().into());
		map.insert("FileSize".to_owned(), self.size.into());
		map.insert(
			"Accessed_Time".to_owned(),
			TagValue::Text(human_readable_time(self.accessed)),
		);
		map.insert(
			"Creation_Time".to_owned(),
			TagValue::Text(human_readable_time(self.created)),
		);
		map.insert(
			"Modified_Time".to_owned(),
			TagValue::Text(human_readable_time(self.modified)),
		);
		map
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDateTime;
	use fm_utils::time::STAT_TIME_FORMAT;

	use super::*;

	#[test]
	fn tag_map_lists_stats_in_display_order() {
		let stats = FileStats::new("x.jpg", "image/jpeg", 1024, 1_704_207_000, 1_704_203_400, 1_704_205_200);
		let map = stats.tag_map();

		let tags: Vec<_> = map.keys().map(String::as_str).collect();
		assert_eq!(
			tags,
			[
				"Filename",
				"FileType",
				"FileSize",
				"Accessed_Time",
				"Creation_Time",
				"Modified_Time"
			]
		);
		assert_eq!(map["Filename"], "x.jpg".into());
		assert_eq!(map["FileSize"], 1024_u64.into());
	}

	#[test]
	fn stat_times_format_as_display_timestamps() {
		let stats = FileStats::new("x.jpg", "image/jpeg", 1024, 1_704_207_000, 0, 1_704_205_200);
		let map = stats.tag_map();
		let TagValue::Text(accessed) = &map["Accessed_Time"] else {
			panic!("stat times render as text");
		};
		assert!(NaiveDateTime::parse_from_str(accessed, STAT_TIME_FORMAT).is_ok());
	}
}

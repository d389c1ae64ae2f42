#![doc = include_str!("../README.md")]
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

pub mod audio;
pub mod document;
mod error;
pub mod exif;
pub mod image;
pub mod record;
pub mod stats;
pub mod value;

pub use audio::AudioMetadata;
pub use document::DocumentMetadata;
pub use error::{Error, Result};
pub use image::ImageMetadata;
pub use record::{export_file_name, MetadataRecord};
pub use stats::FileStats;
pub use value::{RawTagMap, TagValue};

/// The extraction result for one upload, by file type.
///
/// Extraction and the upload-ledger append are independent operations: a
/// failure here must not stop the caller from recording the upload's basic
/// stats, and vice versa.
#[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum FileMetadata {
	Image(Box<ImageMetadata>),
	Audio(Box<AudioMetadata>),
	Document(Box<DocumentMetadata>),
}

impl FileMetadata {
	/// Builds the display/export record for one upload: the caller's stat
	/// table first, then every extractor table in extraction order.
	#[must_use]
	pub fn to_record(&self, stats: &FileStats) -> MetadataRecord {
		let mut tables = vec![stats.tag_map()];
		match self {
			Self::Image(image) => tables.extend([
				image.properties.clone(),
				image.exif_dump.clone(),
				image.geotags.clone(),
			]),
			Self::Audio(audio) => tables.push(audio.tags.clone()),
			Self::Document(document) => tables.push(document.tag_map(stats)),
		}
		MetadataRecord::aggregate(tables)
	}
}

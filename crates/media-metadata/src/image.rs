//! Image metadata: basic properties, a full EXIF dump, and geotags.

use std::{io::Cursor, path::Path};

use fm_utils::error::FileIOError;
use nom_exif::{ExifIter, MediaParser, MediaSource};
use tokio::task::spawn_blocking;
use tracing::debug;

use crate::{
	exif::extract_geotags,
	value::{RawTagMap, TagValue},
	Error, Result,
};

/// Everything extracted from one image upload, as three separate tables.
///
/// The named-tag view (`geotags`) and the raw dump (`exif_dump`) read the
/// same EXIF block through different libraries; the two surface different
/// tag subsets and occasionally disagree, so both are preserved and no
/// reconciliation is attempted.
#[derive(Default, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageMetadata {
	/// Basic properties from the image decoder: format, dimensions, color mode.
	pub properties: RawTagMap,
	/// Full EXIF tag dump from the secondary reading path.
	pub exif_dump: RawTagMap,
	/// Named EXIF tags, with the GPS sub-IFD nested under `GPSInfo`.
	pub geotags: RawTagMap,
}

impl ImageMetadata {
	/// Extracts all three tables from raw image bytes.
	///
	/// Fails with [`Error::UnreadableImage`] when the bytes decode as no
	/// supported image container; missing EXIF on either path is normal and
	/// degrades to an empty table.
	pub fn from_slice(bytes: &[u8]) -> Result<Self> {
		Ok(Self {
			properties: properties(bytes)?,
			exif_dump: exif_dump(bytes),
			geotags: extract_geotags(bytes),
		})
	}

	pub async fn from_path(path: impl AsRef<Path> + Send) -> Result<Self> {
		let path = path.as_ref().to_owned();
		let bytes = tokio::fs::read(&path)
			.await
			.map_err(|e| FileIOError::from((path, e)))?;
		spawn_blocking(move || Self::from_slice(&bytes)).await?
	}
}

fn properties(bytes: &[u8]) -> Result<RawTagMap> {
	let format = image::guess_format(bytes).map_err(Error::UnreadableImage)?;
	let img = image::load_from_memory_with_format(bytes, format)
		.map_err(Error::UnreadableImage)?;
	let color = img.color();

	let mut map = RawTagMap::new();
	map.insert(
		"format".to_owned(),
		TagValue::Text(format!("{format:?}").to_uppercase()),
	);
	map.insert(
		"format_description".to_owned(),
		format.to_mime_type().into(),
	);
	map.insert(
		"size".to_owned(),
		TagValue::List(vec![img.width().into(), img.height().into()]),
	);
	map.insert("height".to_owned(), img.height().into());
	map.insert("width".to_owned(), img.width().into());
	map.insert("mode".to_owned(), TagValue::Text(format!("{color:?}")));
	map.insert(
		"bits_per_pixel".to_owned(),
		i64::from(color.bits_per_pixel()).into(),
	);
	map.insert("has_alpha".to_owned(), TagValue::Text(color.has_alpha().to_string()));
	Ok(map)
}

/// Raw EXIF dump through `nom-exif`, independent of the named-tag path.
///
/// Anything that stops this path (no EXIF, an unsupported container) is
/// normal for the secondary view and leaves the dump empty.
fn exif_dump(bytes: &[u8]) -> RawTagMap {
	let mut map = RawTagMap::new();

	let source = match MediaSource::seekable(Cursor::new(bytes.to_vec())) {
		Ok(source) => source,
		Err(e) => {
			debug!("secondary exif path skipped: {e}");
			return map;
		}
	};
	if !source.has_exif() {
		return map;
	}

	let mut parser = MediaParser::new();
	let iter: ExifIter = match parser.parse(source) {
		Ok(iter) => iter,
		Err(e) => {
			debug!("secondary exif path failed: {e}");
			return map;
		}
	};

	for mut entry in iter {
		let tag = entry
			.tag()
			.map_or_else(|| format!("Tag(0x{:04x})", entry.tag_code()), |t| t.to_string());
		if let Some(value) = entry.take_value() {
			map.insert(tag, TagValue::Text(value.to_string()));
		}
	}
	map
}

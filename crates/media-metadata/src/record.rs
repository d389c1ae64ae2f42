//! The aggregated tag table handed back to callers.

use chrono::{DateTime, Local};

use crate::value::RawTagMap;

/// Timestamp suffix appended to export file names.
pub const EXPORT_TIME_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Ordered `(tag, value)` pairs for one upload, ready for display or export.
///
/// Tags are not required to be unique: tables from independent extraction
/// paths are concatenated as-is, so a generic `FileSize` and a
/// format-specific one may both appear. Values are always strings (the
/// normalizer's output), which keeps the combined table schema-coherent.
#[derive(Default, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MetadataRecord {
	entries: Vec<(String, String)>,
}

impl MetadataRecord {
	#[must_use]
	pub const fn new() -> Self {
		Self {
			entries: Vec::new(),
		}
	}

	/// Concatenates the given tables in call order, normalizing every value.
	///
	/// Duplicate tags across tables are preserved; an empty input yields an
	/// empty record.
	#[must_use]
	pub fn aggregate(tables: impl IntoIterator<Item = RawTagMap>) -> Self {
		let mut record = Self::new();
		for table in tables {
			for (tag, value) in table {
				record.push(tag, value.normalized());
			}
		}
		record
	}

	pub fn push(&mut self, tag: impl Into<String>, value: impl Into<String>) {
		self.entries.push((tag.into(), value.into()));
	}

	#[must_use]
	pub fn entries(&self) -> &[(String, String)] {
		&self.entries
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Serializes the record as delimited text with a `Meta Tags,Value`
	/// header, quoting fields that carry delimiters.
	#[must_use]
	pub fn to_csv(&self) -> String {
		let mut out = String::from("Meta Tags,Value\n");
		for (tag, value) in &self.entries {
			out.push_str(&csv_field(tag));
			out.push(',');
			out.push_str(&csv_field(value));
			out.push('\n');
		}
		out
	}
}

impl<'a> IntoIterator for &'a MetadataRecord {
	type Item = &'a (String, String);
	type IntoIter = std::slice::Iter<'a, (String, String)>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

fn csv_field(raw: &str) -> String {
	if raw.contains([',', '"', '\n', '\r']) {
		format!("\"{}\"", raw.replace('"', "\"\""))
	} else {
		raw.to_owned()
	}
}

/// Name for a record's export file: the original file name's stem plus a run
/// timestamp and the `.csv` extension.
///
/// ```
/// use chrono::TimeZone;
///
/// let run = chrono::Local.with_ymd_and_hms(2024, 1, 2, 15, 30, 0).unwrap();
/// assert_eq!(
/// 	fm_media_metadata::export_file_name("photo.jpg", run),
/// 	"photo_20240102-153000.csv"
/// );
/// ```
#[must_use]
pub fn export_file_name(original: &str, run_time: DateTime<Local>) -> String {
	let stem = original.split('.').next().unwrap_or(original);
	format!("{stem}_{}.csv", run_time.format(EXPORT_TIME_FORMAT))
}

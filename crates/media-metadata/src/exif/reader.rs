use std::io::Cursor;

use exif::{Context, Exif, Field, In, Tag, Value};

use crate::{
	value::{RawTagMap, TagValue},
	Error, Result,
};

use super::GPS_INFO_TAG;

/// Wrapper around the `exif` crate's reader for in-memory images.
pub struct ExifReader(Exif);

impl ExifReader {
	pub fn from_slice(bytes: &[u8]) -> Result<Self> {
		exif::Reader::new()
			.read_from_container(&mut Cursor::new(bytes))
			.map(Self)
			.map_err(Error::Exif)
	}

	/// A tag's rendered value from the primary IFD, if present.
	#[must_use]
	pub fn get_tag(&self, tag: Tag) -> Option<String> {
		self.0
			.get_field(tag, In::PRIMARY)
			.map(|field| field.display_value().to_string())
	}

	/// Translates every primary-IFD field into a named tag map.
	///
	/// GPS sub-IFD tags are translated with the GPS tag dictionary and
	/// nested under [`GPS_INFO_TAG`], replacing the raw sub-IFD.
	#[must_use]
	pub fn tag_map(&self) -> RawTagMap {
		let mut map = RawTagMap::new();
		let mut gps = RawTagMap::new();

		for field in self.0.fields().filter(|field| field.ifd_num == In::PRIMARY) {
			let name = field.tag.to_string();
			if field.tag.context() == Context::Gps {
				gps.insert(name, tag_value(field));
			} else {
				map.insert(name, tag_value(field));
			}
		}

		if !gps.is_empty() {
			map.insert(GPS_INFO_TAG.to_owned(), TagValue::Map(gps));
		}
		map
	}
}

/// One raw EXIF field as a [`TagValue`], keeping rationals un-divided.
fn tag_value(field: &Field) -> TagValue {
	match &field.value {
		Value::Ascii(lines) => TagValue::Text(
			lines
				.iter()
				.map(|line| String::from_utf8_lossy(line).into_owned())
				.collect::<Vec<_>>()
				.join("\n"),
		),
		Value::Byte(values) => scalar_or_list(values.iter().map(|&v| i64::from(v).into()).collect()),
		Value::Short(values) => {
			scalar_or_list(values.iter().map(|&v| i64::from(v).into()).collect())
		}
		Value::Long(values) => scalar_or_list(values.iter().map(|&v| i64::from(v).into()).collect()),
		Value::SLong(values) => {
			scalar_or_list(values.iter().map(|&v| i64::from(v).into()).collect())
		}
		Value::Rational(values) => scalar_or_list(
			values
				.iter()
				.map(|r| TagValue::Rational(i64::from(r.num), i64::from(r.denom)))
				.collect(),
		),
		Value::SRational(values) => scalar_or_list(
			values
				.iter()
				.map(|r| TagValue::Rational(i64::from(r.num), i64::from(r.denom)))
				.collect(),
		),
		Value::Float(values) => {
			scalar_or_list(values.iter().map(|&v| f64::from(v).into()).collect())
		}
		Value::Double(values) => scalar_or_list(values.iter().map(|&v| v.into()).collect()),
		// Undefined and the rarer numeric layouts fall back to the crate's
		// own rendering rules.
		_ => TagValue::Text(field.display_value().to_string()),
	}
}

fn scalar_or_list(mut values: Vec<TagValue>) -> TagValue {
	if values.len() == 1 {
		values.remove(0)
	} else {
		TagValue::List(values)
	}
}

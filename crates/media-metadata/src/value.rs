//! Raw tag values and their canonical string rendering.

use std::fmt;

use indexmap::IndexMap;

/// Insertion-ordered mapping from tag identifier to raw value, as produced
/// by an extractor. Consumed by the normalizer; never retained beyond the
/// current request.
pub type RawTagMap = IndexMap<String, TagValue>;

/// A metadata value of arbitrary shape, before normalization.
///
/// Extracted values arrive as scalars, sequences, nested mappings, or
/// nothing at all; every shape carries exactly one normalization rule, so
/// flattening to a table cell is total and loses no elements.
#[derive(Default, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TagValue {
	#[default]
	Absent,
	Text(String),
	Integer(i64),
	Float(f64),
	/// An EXIF rational, kept as numerator/denominator so decoding (not the
	/// file format) performs the division.
	Rational(i64, i64),
	List(Vec<TagValue>),
	Map(RawTagMap),
}

impl TagValue {
	/// Renders the value for a table cell.
	///
	/// Absent values become the empty string; sequences and mappings keep
	/// every element in a structural rendering; scalars print directly.
	///
	/// ```
	/// use fm_media_metadata::TagValue;
	///
	/// assert_eq!(TagValue::Absent.normalized(), "");
	/// assert_eq!(
	/// 	TagValue::List(vec![1_i64.into(), 2_i64.into(), 3_i64.into()]).normalized(),
	/// 	"[1, 2, 3]"
	/// );
	/// ```
	#[must_use]
	pub fn normalized(&self) -> String {
		self.to_string()
	}

	/// Rendering used inside containers: text is quoted, absence is spelled
	/// out, everything else formats as at the top level.
	fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Absent => f.write_str("None"),
			Self::Text(s) => write!(f, "{s:?}"),
			other => write!(f, "{other}"),
		}
	}
}

impl fmt::Display for TagValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Absent => Ok(()),
			Self::Text(s) => f.write_str(s),
			Self::Integer(v) => write!(f, "{v}"),
			Self::Float(v) => write!(f, "{v}"),
			Self::Rational(num, denom) => write!(f, "{num}/{denom}"),
			Self::List(items) => {
				f.write_str("[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					item.fmt_nested(f)?;
				}
				f.write_str("]")
			}
			Self::Map(map) => {
				f.write_str("{")?;
				for (i, (tag, value)) in map.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{tag:?}: ")?;
					value.fmt_nested(f)?;
				}
				f.write_str("}")
			}
		}
	}
}

impl From<&str> for TagValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}

impl From<String> for TagValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<i32> for TagValue {
	fn from(value: i32) -> Self {
		Self::Integer(i64::from(value))
	}
}

impl From<i64> for TagValue {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<u32> for TagValue {
	fn from(value: u32) -> Self {
		Self::Integer(i64::from(value))
	}
}

impl From<u64> for TagValue {
	fn from(value: u64) -> Self {
		i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
	}
}

impl From<usize> for TagValue {
	fn from(value: usize) -> Self {
		i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
	}
}

impl From<f64> for TagValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<Vec<Self>> for TagValue {
	fn from(value: Vec<Self>) -> Self {
		Self::List(value)
	}
}

use std::ops::Neg;

use crate::value::{RawTagMap, TagValue};

use super::consts::{DECIMAL_SF, DMS_DIVISION, LAT_MAX_POS, LONG_MAX_POS};

const AXES: [(&str, &str); 2] = [
	("GPSLatitude", "GPSLatitudeRef"),
	("GPSLongitude", "GPSLongitudeRef"),
];

/// A decoded latitude/longitude pair, in signed decimal degrees.
///
/// North and east are positive. Only complete pairs exist: a map carrying
/// one axis (or an axis without its hemisphere reference) decodes to
/// nothing, never to a partial coordinate.
#[derive(Default, Clone, Copy, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub struct GeoCoordinates {
	latitude: f64,
	longitude: f64,
}

impl GeoCoordinates {
	/// Decodes decimal-degree coordinates from a GPS tag map.
	///
	/// Each axis needs its three DMS rationals plus the hemisphere
	/// reference; the reference letter acts as a sign multiplier (`S`/`W`
	/// negate). Values are rounded to 8 digits after the decimal point
	/// ([`DECIMAL_SF`]) and clamped to the valid coordinate range.
	#[must_use]
	pub fn from_tag_map(gps: &RawTagMap) -> Option<Self> {
		let [(lat_tag, lat_ref), (long_tag, long_ref)] = AXES;
		Some(Self {
			latitude: format_coordinate(decode_axis(gps, lat_tag, lat_ref)?, LAT_MAX_POS),
			longitude: format_coordinate(decode_axis(gps, long_tag, long_ref)?, LONG_MAX_POS),
		})
	}

	/// Formats both axes of a GPS tag map as DMS strings with a hemisphere
	/// suffix, e.g. `40°26'46"N`.
	///
	/// Same presence rule as [`Self::from_tag_map`]: both axes or nothing.
	#[must_use]
	pub fn humanize(gps: &RawTagMap) -> Option<(String, String)> {
		let [(lat_tag, lat_ref), (long_tag, long_ref)] = AXES;
		Some((
			humanize_axis(gps, lat_tag, lat_ref)?,
			humanize_axis(gps, long_tag, long_ref)?,
		))
	}

	/// This returns the contained coordinates as `(latitude, longitude)`.
	#[inline]
	#[must_use]
	pub const fn coordinates(&self) -> (f64, f64) {
		(self.latitude, self.longitude)
	}

	#[inline]
	#[must_use]
	pub const fn latitude(&self) -> f64 {
		self.latitude
	}

	#[inline]
	#[must_use]
	pub const fn longitude(&self) -> f64 {
		self.longitude
	}
}

/// The three DMS components of an axis, divided out to floats.
fn dms(gps: &RawTagMap, tag: &str) -> Option<[f64; 3]> {
	let TagValue::List(values) = gps.get(tag)? else {
		return None;
	};
	if values.len() != 3 {
		return None;
	}

	let mut parts = [0.0; 3];
	for (part, value) in parts.iter_mut().zip(values) {
		let TagValue::Rational(num, denom) = value else {
			return None;
		};
		if *denom == 0 {
			return None;
		}
		#[allow(clippy::as_conversions, clippy::cast_precision_loss)]
		{
			*part = *num as f64 / *denom as f64;
		}
	}
	Some(parts)
}

fn reference(gps: &RawTagMap, tag: &str) -> Option<String> {
	match gps.get(tag)? {
		TagValue::Text(value) => Some(value.trim().trim_matches('"').to_owned()),
		_ => None,
	}
}

fn decode_axis(gps: &RawTagMap, tag: &str, ref_tag: &str) -> Option<f64> {
	let parts = dms(gps, tag)?;
	let reference = reference(gps, ref_tag)?;

	let mut decimal = parts
		.iter()
		.zip(DMS_DIVISION.iter())
		.map(|(x, y)| x / y)
		.sum::<f64>();
	if matches!(reference.as_str(), "S" | "W") {
		decimal = decimal.neg();
	}
	Some(decimal)
}

fn humanize_axis(gps: &RawTagMap, tag: &str, ref_tag: &str) -> Option<String> {
	let [degrees, minutes, seconds] = dms(gps, tag)?;
	let reference = reference(gps, ref_tag)?;
	Some(format!("{degrees}°{minutes}'{seconds}\"{reference}"))
}

fn format_coordinate(value: f64, max: f64) -> f64 {
	((value.clamp(max.neg(), max)) * DECIMAL_SF).round() / DECIMAL_SF
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rationals(parts: [(i64, i64); 3]) -> TagValue {
		TagValue::List(
			parts
				.iter()
				.map(|&(num, denom)| TagValue::Rational(num, denom))
				.collect(),
		)
	}

	fn gps_map(lat_ref: &str, long_ref: &str) -> RawTagMap {
		let mut gps = RawTagMap::new();
		gps.insert("GPSLatitude".to_owned(), rationals([(40, 1), (26, 1), (46, 1)]));
		gps.insert("GPSLatitudeRef".to_owned(), lat_ref.into());
		gps.insert("GPSLongitude".to_owned(), rationals([(79, 1), (58, 1), (56, 1)]));
		gps.insert("GPSLongitudeRef".to_owned(), long_ref.into());
		gps
	}

	#[test]
	fn decimal_degrees_from_dms() {
		let coords = GeoCoordinates::from_tag_map(&gps_map("N", "W")).expect("complete pair");
		assert!((coords.latitude() - 40.446_111).abs() < 1e-3);
		assert!((coords.longitude() + 79.982_222).abs() < 1e-3);
	}

	#[test]
	fn southern_and_western_references_negate() {
		let north = GeoCoordinates::from_tag_map(&gps_map("N", "E")).expect("complete pair");
		let south = GeoCoordinates::from_tag_map(&gps_map("S", "W")).expect("complete pair");
		assert!((north.latitude() + south.latitude()).abs() < 1e-9);
		assert!((north.longitude() + south.longitude()).abs() < 1e-9);
		assert!(south.latitude() < 0.0);
		assert!(south.longitude() < 0.0);
	}

	#[test]
	fn humanized_matches_decimal_in_magnitude_and_hemisphere() {
		let gps = gps_map("S", "E");
		let (lat, long) = GeoCoordinates::humanize(&gps).expect("complete pair");
		assert_eq!(lat, "40°26'46\"S");
		assert_eq!(long, "79°58'56\"E");

		let coords = GeoCoordinates::from_tag_map(&gps).expect("complete pair");
		assert!(coords.latitude() < 0.0);
		assert!(coords.longitude() > 0.0);
	}

	#[test]
	fn fractional_rationals_divide_at_read_time() {
		let mut gps = gps_map("N", "E");
		gps.insert(
			"GPSLatitude".to_owned(),
			rationals([(40, 1), (26, 1), (4_611, 100)]),
		);
		let (lat, _) = GeoCoordinates::humanize(&gps).expect("complete pair");
		assert_eq!(lat, "40°26'46.11\"N");
	}

	#[test]
	fn one_axis_alone_yields_nothing() {
		let mut gps = RawTagMap::new();
		gps.insert("GPSLatitude".to_owned(), rationals([(40, 1), (26, 1), (46, 1)]));
		gps.insert("GPSLatitudeRef".to_owned(), "N".into());

		assert!(GeoCoordinates::from_tag_map(&gps).is_none());
		assert!(GeoCoordinates::humanize(&gps).is_none());
	}

	#[test]
	fn missing_reference_yields_nothing() {
		let mut gps = gps_map("N", "E");
		gps.swap_remove("GPSLongitudeRef");
		assert!(GeoCoordinates::from_tag_map(&gps).is_none());
		assert!(GeoCoordinates::humanize(&gps).is_none());
	}

	#[test]
	fn empty_map_yields_nothing() {
		assert!(GeoCoordinates::from_tag_map(&RawTagMap::new()).is_none());
		assert!(GeoCoordinates::humanize(&RawTagMap::new()).is_none());
	}

	#[test]
	fn zero_denominator_is_rejected() {
		let mut gps = gps_map("N", "E");
		gps.insert("GPSLatitude".to_owned(), rationals([(40, 0), (26, 1), (46, 1)]));
		assert!(GeoCoordinates::from_tag_map(&gps).is_none());
	}
}

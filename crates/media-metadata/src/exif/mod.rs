//! EXIF reading and geotag decoding.
//!
//! Missing EXIF is the normal case for most uploads, so it never surfaces as
//! an error here: images without an EXIF block (or bytes that are not an
//! image at all) simply yield an empty tag map, and the coordinate decoders
//! yield nothing.

mod consts;
mod location;
mod reader;

pub use consts::{DECIMAL_SF, DMS_DIVISION, LAT_MAX_POS, LONG_MAX_POS};
pub use location::GeoCoordinates;
pub use reader::ExifReader;

use tracing::debug;

use crate::value::RawTagMap;

/// Key under which the translated GPS sub-IFD is nested in a geotag map.
pub const GPS_INFO_TAG: &str = "GPSInfo";

/// Reads an image's embedded EXIF block and translates numeric tag IDs into
/// named tags, replacing the raw GPS sub-IFD with a translated sub-map under
/// [`GPS_INFO_TAG`].
#[must_use]
pub fn extract_geotags(bytes: &[u8]) -> RawTagMap {
	match ExifReader::from_slice(bytes) {
		Ok(reader) => reader.tag_map(),
		Err(e) => {
			debug!("no exif data: {e}");
			RawTagMap::new()
		}
	}
}

/// Used for converting DMS to decimal coordinates, and is the amount to divide by.
///
/// # Examples:
///
/// ```
/// use fm_media_metadata::exif::DMS_DIVISION;
///
/// let latitude = [53.0, 19.0, 35.11]; // in DMS
/// latitude.iter().zip(DMS_DIVISION.iter());
/// ```
pub const DMS_DIVISION: [f64; 3] = [1.0, 60.0, 3600.0];

/// The amount of significant figures we wish to retain after the decimal point.
///
/// This is currently 8 digits (after the integer) as that is precise enough for most
/// applications.
///
/// This is calculated with `10^n`, where `n` is the desired amount of SFs.
pub const DECIMAL_SF: f64 = 100_000_000.0;

/// The Earth's maximum latitude (can also be negative, depending on if you're North or South of the Equator).
pub const LAT_MAX_POS: f64 = 90.0;

/// The Earth's maximum longitude (can also be negative depending on if you're East or West of the Prime meridian).
pub const LONG_MAX_POS: f64 = 180.0;

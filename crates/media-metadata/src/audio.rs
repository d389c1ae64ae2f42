//! Audio tag extraction through FFmpeg's metadata dictionaries.

use std::{io::Write, path::Path};

use ffmpeg_next as ffmpeg;
use fm_utils::error::FileIOError;
use once_cell::sync::Lazy;
use tempfile::NamedTempFile;
use tokio::task::spawn_blocking;

use crate::{
	value::{RawTagMap, TagValue},
	Error, Result,
};

static FFMPEG_INIT: Lazy<std::result::Result<(), ffmpeg::Error>> = Lazy::new(ffmpeg::init);

/// One tag-mapping view of an audio upload, plus what the demuxer knows
/// about the stream itself.
///
/// The tag map covers container- and stream-level dictionaries in one pass,
/// so ID3 frames and Vorbis comments come through the same surface. A file
/// with zero tags is valid and yields an empty map.
#[derive(Default, Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub struct AudioMetadata {
	pub tags: RawTagMap,
	pub codec: Option<String>,
	pub duration_secs: Option<f64>,
}

impl AudioMetadata {
	/// Probes raw bytes as an audio container and reads its tag
	/// dictionaries.
	///
	/// Fails with [`Error::UnsupportedAudioFormat`] when no demuxer
	/// recognizes the bytes or the container carries no audio stream.
	pub fn from_slice(bytes: &[u8]) -> Result<Self> {
		if let Err(e) = *FFMPEG_INIT {
			return Err(Error::Ffmpeg(e));
		}

		// FFmpeg probes by path; spool the upload to a scratch file.
		let mut scratch = NamedTempFile::new()?;
		scratch.write_all(bytes)?;
		scratch.flush()?;
		Self::probe(scratch.path())
	}

	pub async fn from_path(path: impl AsRef<Path> + Send) -> Result<Self> {
		let path = path.as_ref().to_owned();
		let bytes = tokio::fs::read(&path)
			.await
			.map_err(|e| FileIOError::from((path, e)))?;
		spawn_blocking(move || Self::from_slice(&bytes)).await?
	}

	fn probe(path: &Path) -> Result<Self> {
		let input = ffmpeg::format::input(&path).map_err(Error::UnsupportedAudioFormat)?;

		let mut tags = RawTagMap::new();
		for (key, value) in input.metadata().iter() {
			tags.insert(key.to_owned(), TagValue::Text(value.to_owned()));
		}

		let Some(stream) = input.streams().best(ffmpeg::media::Type::Audio) else {
			return Err(Error::UnsupportedAudioFormat(ffmpeg::Error::StreamNotFound));
		};
		// Vorbis comments and some ID3 frames land on the stream, not the
		// container; a duplicate key keeps the stream-level value.
		for (key, value) in stream.metadata().iter() {
			tags.insert(key.to_owned(), TagValue::Text(value.to_owned()));
		}

		let codec = ffmpeg::codec::context::Context::from_parameters(stream.parameters())
			.ok()
			.and_then(|ctx| ctx.decoder().audio().ok())
			.and_then(|decoder| decoder.codec().map(|codec| codec.name().to_owned()));

		#[allow(clippy::as_conversions, clippy::cast_precision_loss)]
		let duration_secs = (input.duration() > 0)
			.then(|| input.duration() as f64 / f64::from(ffmpeg::ffi::AV_TIME_BASE));

		Ok(Self {
			tags,
			codec,
			duration_secs,
		})
	}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;

	/// Minimal PCM WAV: RIFF header, `fmt ` chunk, 0.1s of 16-bit mono silence.
	fn wav_bytes() -> Vec<u8> {
		let sample_rate: u32 = 8000;
		let data = vec![0_u8; 1600];

		let mut out = Vec::new();
		out.extend_from_slice(b"RIFF");
		out.extend_from_slice(&u32::try_from(36 + data.len()).unwrap().to_le_bytes());
		out.extend_from_slice(b"WAVE");
		out.extend_from_slice(b"fmt ");
		out.extend_from_slice(&16_u32.to_le_bytes());
		out.extend_from_slice(&1_u16.to_le_bytes()); // PCM
		out.extend_from_slice(&1_u16.to_le_bytes()); // mono
		out.extend_from_slice(&sample_rate.to_le_bytes());
		out.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
		out.extend_from_slice(&2_u16.to_le_bytes()); // block align
		out.extend_from_slice(&16_u16.to_le_bytes()); // bits per sample
		out.extend_from_slice(b"data");
		out.extend_from_slice(&u32::try_from(data.len()).unwrap().to_le_bytes());
		out.extend_from_slice(&data);
		out
	}

	#[test]
	fn container_with_zero_tags_is_valid() {
		let meta = AudioMetadata::from_slice(&wav_bytes()).unwrap();
		assert!(meta.tags.is_empty());
		assert!(meta.codec.is_some());
	}

	#[test]
	fn undecodable_bytes_are_an_unsupported_format() {
		assert!(matches!(
			AudioMetadata::from_slice(b"this is no audio container"),
			Err(Error::UnsupportedAudioFormat(_))
		));
	}
}

use fm_utils::error::FileIOError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("the byte stream could not be decoded as a supported image: {0}")]
	UnreadableImage(#[from] image::ImageError),
	#[error("the byte stream is not a decodable audio container: {0}")]
	UnsupportedAudioFormat(ffmpeg_next::Error),
	#[error("the byte stream is not a parseable pdf structure: {0}")]
	UnreadablePdf(#[from] lopdf::Error),
	#[error("error from the exif crate: {0}")]
	Exif(#[from] exif::Error),
	#[error("error from ffmpeg: {0}")]
	Ffmpeg(ffmpeg_next::Error),
	#[error("there was an i/o error on a scratch file: {0}")]
	Io(#[from] std::io::Error),
	#[error(transparent)]
	FileIO(#[from] FileIOError),
	#[error("background task failed: {0}")]
	TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;

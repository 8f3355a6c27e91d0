//! # Vehicle photo pipeline
//!
//! Prepares a user-selected photo for upload:
//!
//! 1. [`validate`] rejects anything that is not a JPEG or is larger than
//!    [`MAX_UPLOAD_BYTES`], before any decoding happens.
//! 2. [`compress`] decodes the bytes, bounds the longer side to
//!    [`MAX_DIMENSION`] pixels (never upscaling), and re-encodes as JPEG at
//!    [`JPEG_QUALITY`].
//!
//! [`ImageModalState`] is the state machine behind the images modal.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use thiserror::Error;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_DIMENSION: u32 = 1450;
pub const JPEG_QUALITY: u8 = 85;
pub const UPLOAD_FIELD: &str = "image";
pub const UPLOAD_FILENAME: &str = "vehicle-image.jpg";
pub const UPLOAD_MIME: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Please select a JPEG image (got {0})")]
    UnsupportedType(String),
    #[error("Image must be 5MB or smaller ({size} bytes selected)")]
    TooLarge { size: usize, max: usize },
    #[error("Could not read image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Could not compress image: {0}")]
    Encode(#[source] image::ImageError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageLimits {
    pub max_upload_bytes: usize,
    pub max_dimension: u32,
    pub jpeg_quality: u8,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            max_upload_bytes: MAX_UPLOAD_BYTES,
            max_dimension: MAX_DIMENSION,
            jpeg_quality: JPEG_QUALITY,
        }
    }
}

/// A file picked from the browser's file input.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedImage {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl SelectedImage {
    /// The browser file engine only exposes file names, so the MIME type is
    /// taken from the extension.
    pub fn from_file(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = mime_from_filename(&name).to_string();
        Self { name, mime, bytes }
    }
}

/// The re-encoded JPEG ready for upload.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub fn mime_from_filename(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" | "jpe" | "jfif" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

/// Type check first, then size.
pub fn validate(mime: &str, size: usize, limits: &ImageLimits) -> Result<(), ImageError> {
    if !(mime.starts_with("image/jpeg") || mime.starts_with("image/jpg")) {
        return Err(ImageError::UnsupportedType(mime.to_string()));
    }
    if size > limits.max_upload_bytes {
        return Err(ImageError::TooLarge {
            size,
            max: limits.max_upload_bytes,
        });
    }
    Ok(())
}

/// Bound the longer side to `max`, preserving aspect ratio. Images already
/// within bounds keep their size.
pub fn target_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width >= height {
        if width > max {
            return (max, scale(height, max, width));
        }
    } else if height > max {
        return (scale(width, max, height), max);
    }
    (width, height)
}

fn scale(side: u32, numerator: u32, denominator: u32) -> u32 {
    let scaled = (side as f64 * numerator as f64 / denominator as f64).round() as u32;
    scaled.max(1)
}

/// Decode, downsample and re-encode.
pub fn compress(bytes: &[u8], limits: &ImageLimits) -> Result<CompressedImage, ImageError> {
    let decoded = image::load_from_memory(bytes).map_err(ImageError::Decode)?;
    let (width, height) = target_dimensions(decoded.width(), decoded.height(), limits.max_dimension);
    let resized = if (width, height) == (decoded.width(), decoded.height()) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::Triangle)
    };
    let rgb = resized.to_rgb8();

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, limits.jpeg_quality)
        .encode_image(&rgb)
        .map_err(ImageError::Encode)?;

    Ok(CompressedImage {
        bytes: out,
        width,
        height,
    })
}

/// Validate then compress. Nothing is decoded when validation fails.
pub fn prepare_upload(
    file: &SelectedImage,
    limits: &ImageLimits,
) -> Result<CompressedImage, ImageError> {
    validate(&file.mime, file.bytes.len(), limits)?;
    compress(&file.bytes, limits)
}

/// State of the images modal for one vehicle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ImageModalState {
    #[default]
    Idle,
    Loading,
    HasImage { url: String },
    NoImage,
    /// `previous` is the image being replaced, if any.
    Uploading { previous: Option<String> },
    ConfirmingDelete { url: String },
    Deleting { url: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageEvent {
    /// Modal opened, or an upload finished and the canonical image is refetched.
    Fetch,
    Loaded(Option<String>),
    LoadFailed,
    UploadStarted,
    UploadFailed,
    UploadSucceeded,
    DeleteRequested,
    DeleteCancelled,
    DeleteConfirmed,
    DeleteFailed,
    DeleteSucceeded,
}

impl ImageModalState {
    /// Apply `event`; events that make no sense in the current state are ignored.
    pub fn transition(self, event: ImageEvent) -> Self {
        use ImageEvent as E;
        use ImageModalState as S;

        match (self, event) {
            (S::Idle | S::HasImage { .. } | S::NoImage, E::Fetch) => S::Loading,
            (S::Loading, E::Loaded(Some(url))) => S::HasImage { url },
            (S::Loading, E::Loaded(None)) => S::NoImage,
            (S::Loading, E::LoadFailed) => S::Idle,

            (S::NoImage, E::UploadStarted) => S::Uploading { previous: None },
            (S::HasImage { url }, E::UploadStarted) => S::Uploading { previous: Some(url) },
            (S::Uploading { .. }, E::UploadSucceeded) => S::Loading,
            (S::Uploading { previous: Some(url) }, E::UploadFailed) => S::HasImage { url },
            (S::Uploading { previous: None }, E::UploadFailed) => S::NoImage,

            (S::HasImage { url }, E::DeleteRequested) => S::ConfirmingDelete { url },
            (S::ConfirmingDelete { url }, E::DeleteCancelled) => S::HasImage { url },
            (S::ConfirmingDelete { url }, E::DeleteConfirmed) => S::Deleting { url },
            (S::Deleting { .. }, E::DeleteSucceeded) => S::NoImage,
            (S::Deleting { url }, E::DeleteFailed) => S::HasImage { url },

            (state, _) => state,
        }
    }

    /// A request is in flight; the modal must not be closed.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            ImageModalState::Loading | ImageModalState::Uploading { .. } | ImageModalState::Deleting { .. }
        )
    }

    /// The last load failed; only a fresh [`ImageEvent::Fetch`] moves on.
    pub fn can_retry(&self) -> bool {
        matches!(self, ImageModalState::Idle)
    }

    pub fn image_url(&self) -> Option<&str> {
        match self {
            ImageModalState::HasImage { url }
            | ImageModalState::ConfirmingDelete { url }
            | ImageModalState::Deleting { url } => Some(url),
            ImageModalState::Uploading { previous } => previous.as_deref(),
            _ => None,
        }
    }
}

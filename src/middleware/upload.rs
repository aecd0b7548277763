//! Photo upload handling
//!
//! Accepts at most one file in the `image` multipart field, rejects
//! anything whose declared content type is not an image, and streams the
//! accepted file to the hookups directory under a generated name.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::extract::{multipart::Field, FromRequest, Multipart, Request};
use chrono::Utc;
use rand::Rng;
use tokio::{
    fs::{self, File, OpenOptions},
    io::AsyncWriteExt,
};
use tracing::{debug, warn};

use crate::{
    config::StorageConfig,
    constants::{
        IMAGE_FIELD, IMAGE_FILENAME_EXTENSION, IMAGE_FILENAME_PREFIX, IMAGE_FILENAME_RANDOM_MAX,
    },
    error::{AppError, AppResult},
    state::AppState,
};

/// Attempts at finding an unused filename before giving up
const MAX_NAME_ATTEMPTS: usize = 5;

/// A photo that has been written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Generated filename, relative to the hookups directory
    pub filename: String,
    pub size: usize,
}

impl FromRequest<AppState> for UploadedImage {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        let storage = ImageStorage::from_config(&state.config().storage);

        accept_single_image(multipart, &storage).await
    }
}

/// Whether a declared content type is accepted as an image
///
/// Only the client-declared type is checked, not the file bytes.
pub fn is_image(content_type: &str) -> bool {
    content_type.starts_with("image")
}

/// Walk the multipart body and store the single `image` file
async fn accept_single_image(
    mut multipart: Multipart,
    storage: &ImageStorage,
) -> AppResult<UploadedImage> {
    let mut stored: Option<UploadedImage> = None;

    let outcome = async {
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            // Plain form fields are not files; only unexpected files are an error
            if field.file_name().is_none() && name != IMAGE_FIELD {
                continue;
            }
            if name != IMAGE_FIELD {
                return Err(AppError::Validation(format!("Unexpected file field '{}'", name)));
            }
            if stored.is_some() {
                return Err(AppError::Validation(format!(
                    "Only one file may be uploaded in the '{}' field",
                    IMAGE_FIELD
                )));
            }

            let declared = field.content_type().unwrap_or_default();
            if !is_image(declared) {
                debug!(content_type = %declared, "Upload rejected: not an image");
                return Err(AppError::NotAnImage);
            }

            stored = Some(storage.store(field).await?);
        }
        Ok::<(), AppError>(())
    }
    .await;

    match (outcome, stored) {
        (Ok(()), Some(image)) => Ok(image),
        (Ok(()), None) => Err(AppError::Validation(format!(
            "Please upload an image in the '{}' field",
            IMAGE_FIELD
        ))),
        (Err(e), Some(image)) => {
            storage.discard(&image.filename).await;
            Err(e)
        }
        (Err(e), None) => Err(e),
    }
}

/// Filesystem location for hookup photos
#[derive(Debug, Clone)]
pub struct ImageStorage {
    dir: PathBuf,
    max_bytes: usize,
}

impl ImageStorage {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.hookups_dir.clone(), config.max_image_bytes)
    }

    /// `hookup--<epoch-ms><1..=9999>.jpeg`, whatever the actual format
    pub fn generate_filename() -> String {
        let suffix = rand::rng().random_range(1..=IMAGE_FILENAME_RANDOM_MAX);
        format!(
            "{}{}{}.{}",
            IMAGE_FILENAME_PREFIX,
            Utc::now().timestamp_millis(),
            suffix,
            IMAGE_FILENAME_EXTENSION
        )
    }

    /// Stream a multipart field to a freshly named file
    ///
    /// The file is closed on every path and removed again if the write fails.
    pub async fn store(&self, mut field: Field<'_>) -> AppResult<UploadedImage> {
        fs::create_dir_all(&self.dir).await?;

        let (filename, file) = self.create_unique().await?;
        let path = self.dir.join(&filename);

        match self.write_field(file, &mut field).await {
            Ok(size) => {
                debug!(filename = %filename, size, "Image stored");
                Ok(UploadedImage { filename, size })
            }
            Err(e) => {
                remove_quietly(&path).await;
                Err(e)
            }
        }
    }

    /// Remove a previously stored file
    pub async fn discard(&self, filename: &str) {
        remove_quietly(&self.dir.join(filename)).await;
    }

    async fn create_unique(&self) -> AppResult<(String, File)> {
        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = Self::generate_filename();
            let opened = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&filename))
                .await;

            match opened {
                Ok(file) => return Ok((filename, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::Storage(
            "Could not allocate a unique image filename".to_string(),
        ))
    }

    async fn write_field(&self, mut file: File, field: &mut Field<'_>) -> AppResult<usize> {
        let mut written = 0usize;

        while let Some(chunk) = field.chunk().await? {
            written += chunk.len();
            if written > self.max_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "Image exceeds the maximum size of {} bytes",
                    self.max_bytes
                )));
            }
            file.write_all(&chunk).await?;
        }

        file.flush().await?;
        Ok(written)
    }
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "Failed to remove image file");
        }
    }
}

/// Whether a name has the shape produced by [`ImageStorage::generate_filename`]
#[cfg(test)]
pub(crate) fn is_generated_filename(name: &str) -> bool {
    let Some(rest) = name.strip_prefix(IMAGE_FILENAME_PREFIX) else {
        return false;
    };
    let Some(digits) = rest.strip_suffix(&format!(".{}", IMAGE_FILENAME_EXTENSION)) else {
        return false;
    };
    // 13 digit millisecond timestamp followed by a 1-4 digit suffix
    (14..=17).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

use actix_multipart::{Field, Multipart};
use futures::TryStreamExt;
use log::{error, info};
use tokio::io::AsyncWriteExt;

use crate::{
    app_data::AppData,
    app_error::AppError,
    mongo::withid::Id,
    stores::{ImageDir, Photo},
};

const IMAGE_FIELD: &str = "image";
const USER_ID_FIELD: &str = "userId";
const MAX_TEXT_FIELD: usize = 1024;

#[derive(Default)]
struct UploadForm {
    /// Set once the file exists on disk.
    file_name: Option<String>,
    user_id: Option<String>,
}

/// Stores the `image` field of `payload` and records it as a photo of the
/// `userId` field. A file written before a failure is removed again.
pub async fn upload_image(payload: Multipart, data: &AppData) -> Result<Id, AppError> {
    let mut form = UploadForm::default();
    let result = match form.receive(payload, data).await {
        Ok(()) => form.persist(data).await,
        Err(err) => Err(err),
    };
    if result.is_err() {
        if let Some(file_name) = &form.file_name {
            discard_orphan(&data.images, file_name).await;
        }
    }
    result
}

impl UploadForm {
    async fn receive(&mut self, mut payload: Multipart, data: &AppData) -> Result<(), AppError> {
        while let Some(field) = payload.try_next().await? {
            let name = field
                .content_disposition()
                .get_name()
                .unwrap_or_default()
                .to_owned();
            match name.as_str() {
                IMAGE_FIELD => self.receive_image(field, data).await?,
                USER_ID_FIELD => self.user_id = Some(read_text(field).await?),
                _ => drain(field).await?,
            }
        }
        Ok(())
    }

    async fn receive_image(&mut self, mut field: Field, data: &AppData) -> Result<(), AppError> {
        if self.file_name.is_some() {
            return Err(AppError::UnexpectedField);
        }
        let is_image = field
            .content_type()
            .map(|mime| mime.essence_str().starts_with("image/"))
            .unwrap_or(false);
        if !is_image {
            return Err(AppError::NotAnImage);
        }

        let file_name =
            ImageDir::generate_name(IMAGE_FIELD, field.content_disposition().get_filename());
        let mut file = data.images.create(&file_name).await?;
        self.file_name = Some(file_name);

        let mut written = 0usize;
        while let Some(chunk) = field.try_next().await? {
            written += chunk.len();
            if written > data.max_upload_size {
                return Err(AppError::TooLarge);
            }
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        Ok(())
    }

    async fn persist(&self, data: &AppData) -> Result<Id, AppError> {
        let file_name = self.file_name.clone().ok_or(AppError::NoFile)?;
        let user_id = self
            .user_id
            .as_deref()
            .and_then(|id| Id::parse_str(id.trim()).ok())
            .ok_or(AppError::InvalidUserId)?;
        let id = data
            .photos
            .create(&Photo::new(file_name.clone(), user_id))
            .await?;
        info!(target: "photoroll", "stored {} as photo {}", file_name, id);
        Ok(id)
    }
}

async fn read_text(mut field: Field) -> Result<String, AppError> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        if buf.len() + chunk.len() > MAX_TEXT_FIELD {
            return Err(AppError::TooLarge);
        }
        buf.extend_from_slice(&chunk);
    }
    String::from_utf8(buf).map_err(|_| AppError::InvalidBody("form field is not UTF-8".to_owned()))
}

async fn drain(mut field: Field) -> Result<(), AppError> {
    while field.try_next().await?.is_some() {}
    Ok(())
}

/// Compensation for a failed upload. Its own failure is only logged so the
/// original error still reaches the client.
async fn discard_orphan(images: &ImageDir, file_name: &str) {
    match images.remove(file_name).await {
        Ok(()) => info!(target: "photoroll", "removed orphaned upload {}", file_name),
        Err(err) => error!(target: "photoroll", "Error deleting file {}: {}", file_name, err),
    }
}

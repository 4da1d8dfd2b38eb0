use actix_files::NamedFile;

use crate::{app_error::AppError, stores::ImageDir};

pub async fn open_image(file_name: &str, images: &ImageDir) -> Result<NamedFile, AppError> {
    let path = images
        .existing(file_name)
        .await
        .ok_or(AppError::ImageNotFound)?;
    NamedFile::open_async(path)
        .await
        .map_err(|_| AppError::ImageNotFound)
}

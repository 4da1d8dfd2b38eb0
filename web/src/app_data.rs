use std::sync::Arc;

use crate::{
    mongo::context::Context as MongoContext,
    stores::{ImageDir, MongoPhotoRepository, MongoUserDirectory, PhotoRepository, UserDirectory},
    utils::config::Config,
};

pub struct AppData {
    pub photos: Arc<dyn PhotoRepository>,
    pub users: Arc<dyn UserDirectory>,
    pub images: ImageDir,
    pub max_upload_size: usize,
}

impl AppData {
    pub fn new(context: &MongoContext, config: &Config) -> Self {
        Self {
            photos: Arc::new(MongoPhotoRepository::new(context.clone())),
            users: Arc::new(MongoUserDirectory::new(context.clone())),
            images: ImageDir::new(&config.images_dir),
            max_upload_size: config.max_upload_size,
        }
    }
}

pub mod images;
pub mod photo;
pub mod user;

pub use images::ImageDir;
pub use photo::{Comment, MongoPhotoRepository, Photo, PhotoRepository};
pub use user::{MongoUserDirectory, User, UserDirectory, UserSummary};

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header,
    test::TestRequest,
    web, App, Error,
};
use async_trait::async_trait;
use tempfile::TempDir;

use crate::{
    app_data::AppData,
    controller,
    mongo::withid::{Id, WithId},
    stores::{Comment, ImageDir, Photo, PhotoRepository, User, UserDirectory, UserSummary},
    utils::{result::Result, simple_error},
};

#[derive(Default)]
pub struct MemoryPhotos {
    photos: Mutex<Vec<WithId<Photo>>>,
    fail_writes: bool,
    /// Images directory whose uploaded file vanishes before a failed create.
    remove_on_failure: Option<PathBuf>,
}

impl MemoryPhotos {
    /// Reads succeed, every create and comment push fails.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Like `failing`, but also deletes the uploaded file from `images`
    /// before refusing the create.
    pub fn failing_and_removing(images: PathBuf) -> Self {
        Self {
            fail_writes: true,
            remove_on_failure: Some(images),
            ..Self::default()
        }
    }

    pub fn insert(&self, photo: Photo) -> Id {
        let id = Id::new();
        self.photos.lock().unwrap().push((id, photo));
        id
    }

    pub fn all(&self) -> Vec<WithId<Photo>> {
        self.photos.lock().unwrap().clone()
    }

    pub fn get(&self, id: &Id) -> Option<Photo> {
        self.photos
            .lock()
            .unwrap()
            .iter()
            .find(|(pid, _)| pid == id)
            .map(|(_, photo)| photo.clone())
    }
}

#[async_trait]
impl PhotoRepository for MemoryPhotos {
    async fn create(&self, photo: &Photo) -> Result<Id> {
        if self.fail_writes {
            if let Some(images) = &self.remove_on_failure {
                std::fs::remove_file(images.join(&photo.file_name))?;
            }
            return Err(simple_error!("write refused"));
        }
        Ok(self.insert(photo.clone()))
    }

    async fn find_by_user(&self, user_id: &Id) -> Result<Vec<WithId<Photo>>> {
        let mut found: Vec<_> = self
            .photos
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, photo)| photo.user_id == *user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.1.date_time.cmp(&a.1.date_time));
        Ok(found)
    }

    async fn find_by_id(&self, id: &Id) -> Result<Option<WithId<Photo>>> {
        Ok(self.get(id).map(|photo| (*id, photo)))
    }

    async fn push_comment(&self, id: &Id, comment: &Comment) -> Result<Option<WithId<Photo>>> {
        if self.fail_writes {
            return Err(simple_error!("write refused"));
        }
        let mut photos = self.photos.lock().unwrap();
        Ok(photos
            .iter_mut()
            .find(|(pid, _)| pid == id)
            .map(|(pid, photo)| {
                photo.comments.push(comment.clone());
                (*pid, photo.clone())
            }))
    }
}

#[derive(Default)]
pub struct MemoryUsers {
    users: HashMap<Id, User>,
    unavailable: bool,
}

impl MemoryUsers {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn add(&mut self, first_name: &str, last_name: &str) -> Id {
        let id = Id::new();
        self.users.insert(
            id,
            User {
                first_name: first_name.to_owned(),
                last_name: last_name.to_owned(),
            },
        );
        id
    }
}

#[async_trait]
impl UserDirectory for MemoryUsers {
    async fn summary(&self, id: &Id) -> Result<Option<UserSummary>> {
        if self.unavailable {
            return Err(simple_error!("user directory unavailable"));
        }
        Ok(self
            .users
            .get(id)
            .cloned()
            .map(|user| UserSummary::from((*id, user))))
    }
}

pub struct Harness {
    pub photos: Arc<MemoryPhotos>,
    pub dir: TempDir,
    pub data: web::Data<AppData>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(MemoryPhotos::default(), MemoryUsers::default())
    }

    pub fn with(photos: MemoryPhotos, users: MemoryUsers) -> Self {
        Self::with_limit(photos, users, 1024 * 1024)
    }

    pub fn with_limit(photos: MemoryPhotos, users: MemoryUsers, max_upload_size: usize) -> Self {
        Self::build(|_| photos, users, max_upload_size)
    }

    /// `photos` receives the images directory the app will write to.
    pub fn build(
        photos: impl FnOnce(PathBuf) -> MemoryPhotos,
        users: MemoryUsers,
        max_upload_size: usize,
    ) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");
        let photos = Arc::new(photos(images.clone()));
        let data = web::Data::new(AppData {
            photos: photos.clone(),
            users: Arc::new(users),
            images: ImageDir::new(images),
            max_upload_size,
        });
        Self { photos, dir, data }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.data.clone())
            .configure(controller::route)
    }

    pub fn images_path(&self) -> PathBuf {
        self.dir.path().join("images")
    }

    /// Names of the files currently in the images directory.
    pub fn stored_files(&self) -> Vec<String> {
        match std::fs::read_dir(self.images_path()) {
            Ok(entries) => entries
                .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

pub const BOUNDARY: &str = "photoroll-test-boundary";

pub enum Part<'a> {
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

pub fn upload_request(parts: &[Part<'_>]) -> TestRequest {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}",
                        name, value
                    )
                    .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    TestRequest::post()
        .uri("/uploadImg")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(body)
}

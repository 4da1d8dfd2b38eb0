use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use mongodm::{doc, f, mongo::options::FindOptions, CollectionConfig, Indexes, Model};
use serde::{Deserialize, Serialize};

use crate::{
    mongo::{
        context::Context as MongoContext,
        withid::{Id, RepositoryWithId, WithId},
    },
    utils::result::Result,
};

/// One entry of a photo's comment thread, as persisted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Comment {
    pub date_time: String,
    pub comment: String,
    pub user_id: Id,
}

impl Comment {
    pub fn new(comment: String, user_id: Id) -> Self {
        Self {
            date_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            comment,
            user_id,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Photo {
    pub file_name: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date_time: DateTime<Utc>,
    pub user_id: Id,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Photo {
    pub fn new(file_name: String, user_id: Id) -> Self {
        Self {
            file_name,
            date_time: Utc::now(),
            user_id,
            comments: Vec::new(),
        }
    }
}

pub struct PhotoCfg {}

impl CollectionConfig for PhotoCfg {
    fn collection_name() -> &'static str {
        "photos"
    }

    fn indexes() -> Indexes {
        Indexes::new()
    }
}

impl Model for Photo {
    type CollConf = PhotoCfg;
}

#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn create(&self, photo: &Photo) -> Result<Id>;

    /// All photos uploaded by `user_id`, newest first.
    async fn find_by_user(&self, user_id: &Id) -> Result<Vec<WithId<Photo>>>;

    async fn find_by_id(&self, id: &Id) -> Result<Option<WithId<Photo>>>;

    /// Atomically appends `comment` to the photo's thread and returns the
    /// updated photo, `None` if there is no photo `id`.
    async fn push_comment(&self, id: &Id, comment: &Comment) -> Result<Option<WithId<Photo>>>;
}

pub struct MongoPhotoRepository {
    ctx: MongoContext,
}

impl MongoPhotoRepository {
    pub fn new(ctx: MongoContext) -> Self {
        Self { ctx }
    }

    fn repo(&self) -> RepositoryWithId<Photo> {
        RepositoryWithId::new(&self.ctx)
    }
}

#[async_trait]
impl PhotoRepository for MongoPhotoRepository {
    async fn create(&self, photo: &Photo) -> Result<Id> {
        self.repo().create(photo).await
    }

    async fn find_by_user(&self, user_id: &Id) -> Result<Vec<WithId<Photo>>> {
        let user_id: Id = *user_id;
        let opt = FindOptions::builder()
            .sort(doc! { f!(date_time in Photo): -1 })
            .build();
        self.repo()
            .find(doc! { f!(user_id in Photo): user_id }, opt)
            .await
    }

    async fn find_by_id(&self, id: &Id) -> Result<Option<WithId<Photo>>> {
        self.repo().find_one_by_id(id).await
    }

    async fn push_comment(&self, id: &Id, comment: &Comment) -> Result<Option<WithId<Photo>>> {
        let id: Id = *id;
        let comment = bson::to_bson(comment)?;
        self.repo()
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$push": { f!(comments in Photo): comment } },
            )
            .await
    }
}

use async_trait::async_trait;
use mongodm::{doc, mongo::options::FindOneOptions, CollectionConfig, Indexes, Model};
use serde::{Deserialize, Serialize};

use crate::{
    mongo::{
        context::Context as MongoContext,
        withid::{Id, RepositoryWithId, WithId},
    },
    utils::result::Result,
};

/// Read-only view of the user profile collection. Profiles are owned by
/// another service; only the display name is read here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

pub struct UserCfg {}

impl CollectionConfig for UserCfg {
    fn collection_name() -> &'static str {
        "users"
    }

    fn indexes() -> Indexes {
        Indexes::new()
    }
}

impl Model for User {
    type CollConf = UserCfg;
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<WithId<User>> for UserSummary {
    fn from((id, user): WithId<User>) -> Self {
        Self {
            id: id.to_hex(),
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Display identity of `id`, `None` when no such user exists.
    async fn summary(&self, id: &Id) -> Result<Option<UserSummary>>;
}

pub struct MongoUserDirectory {
    ctx: MongoContext,
}

impl MongoUserDirectory {
    pub fn new(ctx: MongoContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl UserDirectory for MongoUserDirectory {
    async fn summary(&self, id: &Id) -> Result<Option<UserSummary>> {
        let id: Id = *id;
        let opt = FindOneOptions::builder()
            .projection(doc! { "_id": 1, "first_name": 1, "last_name": 1 })
            .build();
        let found = RepositoryWithId::<User>::new(&self.ctx)
            .find_one(doc! { "_id": id }, opt)
            .await?;
        Ok(found.map(UserSummary::from))
    }
}

use bson::{doc, from_document, oid::ObjectId, Bson, Document};
use futures::TryStreamExt;
use mongodm::{
    mongo::{
        options::{FindOneAndUpdateOptions, FindOneOptions, FindOptions, ReturnDocument},
        Collection,
    },
    Model, Repository,
};

use crate::{
    context::MongodmContext,
    utils::{result::Result, simple_error},
};

pub type Id = ObjectId;

/// A model paired with the `_id` it is stored under.
pub type WithId<M> = (Id, M);

pub struct RepositoryWithId<M>
where
    M: Model,
{
    repo: Repository<M>,
    coll: Collection<Document>,
}

impl<M> RepositoryWithId<M>
where
    M: Model,
{
    pub fn new(ctx: &impl MongodmContext) -> Self {
        let repo = ctx.repo::<M>();
        let coll = repo.clone_with_type::<Document>();
        Self { repo, coll }
    }

    pub async fn create(&self, model: &M) -> Result<Id> {
        Self::oid(self.repo.insert_one(model, None).await?.inserted_id)
    }

    /// Applies `update` to the first match and returns the document as it
    /// is after the update.
    pub async fn find_one_and_update(
        &self,
        query: Document,
        update: Document,
    ) -> Result<Option<WithId<M>>> {
        let opt = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        match self.coll.find_one_and_update(query, update, opt).await? {
            Some(doc) => Ok(Some(Self::split(doc)?)),
            None => Ok(None),
        }
    }

    pub async fn find_one(
        &self,
        query: Document,
        option: impl Into<Option<FindOneOptions>>,
    ) -> Result<Option<WithId<M>>> {
        match self.coll.find_one(query, option).await? {
            Some(doc) => Ok(Some(Self::split(doc)?)),
            None => Ok(None),
        }
    }

    pub async fn find_one_by_id(&self, id: &Id) -> Result<Option<WithId<M>>> {
        let id: Id = *id;
        self.find_one(doc! { "_id": id }, None).await
    }

    pub async fn find(
        &self,
        query: Document,
        option: impl Into<Option<FindOptions>>,
    ) -> Result<Vec<WithId<M>>> {
        let docs = self
            .coll
            .find(query, option)
            .await?
            .try_collect::<Vec<_>>()
            .await?;
        docs.into_iter().map(Self::split).collect()
    }

    pub(crate) fn oid(bson: Bson) -> Result<Id> {
        match bson {
            Bson::ObjectId(oid) => Ok(oid),
            other => Err(simple_error!("value is not ObjectId: {}", other)),
        }
    }

    pub(crate) fn split(doc: Document) -> Result<WithId<M>> {
        let id = match doc.get("_id") {
            Some(id) => Self::oid(id.clone())?,
            None => return Err(simple_error!("document has no _id")),
        };
        Ok((id, from_document(doc)?))
    }
}

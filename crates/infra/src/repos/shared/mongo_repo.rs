use super::repo::DeleteResult;
use anyhow::Result;
use futures::stream::StreamExt;
use mongodb::{
    bson::{self, Document},
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Collection, Cursor,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

pub trait MongoDocument<E>: Serialize + DeserializeOwned {
    fn to_domain(self) -> E;
    fn from_domain(entity: &E) -> Self;
    fn get_id_filter(&self) -> Document;
}

fn entity_to_persistence<E, D: MongoDocument<E>>(entity: &E) -> Result<Document> {
    let raw = D::from_domain(entity);
    Ok(bson::to_document(&raw)?)
}

fn persistence_to_entity<E, D: MongoDocument<E>>(doc: Document) -> Result<E> {
    let raw: D = bson::from_document(doc)?;
    Ok(raw.to_domain())
}

pub async fn insert<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let doc = entity_to_persistence::<E, D>(entity)?;
    collection.insert_one(doc, None).await?;
    Ok(())
}

pub async fn save<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let raw = D::from_domain(entity);
    let filter = raw.get_id_filter();
    let doc = bson::to_document(&raw)?;
    collection.replace_one(filter, doc, None).await?;
    Ok(())
}

pub async fn find_one_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Option<E> {
    match collection.find_one(filter, None).await {
        Ok(Some(doc)) => match persistence_to_entity::<E, D>(doc) {
            Ok(entity) => Some(entity),
            Err(e) => {
                error!("Unable to read document from {}: {:?}", collection.name(), e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            error!("Find one failed on {}: {:?}", collection.name(), e);
            None
        }
    }
}

pub async fn find_many_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
    options: Option<FindOptions>,
) -> Result<Vec<E>> {
    let cursor = collection.find(filter, options).await?;
    Ok(consume_cursor::<E, D>(cursor).await)
}

pub async fn find_one_and_update<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
    update: Document,
) -> Result<Option<E>> {
    let options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();
    match collection
        .find_one_and_update(filter, update, options)
        .await?
    {
        Some(doc) => persistence_to_entity::<E, D>(doc).map(Some),
        None => Ok(None),
    }
}

pub async fn update_many(
    collection: &Collection<Document>,
    filter: Document,
    update: Document,
) -> Result<()> {
    collection
        .update_many(filter, update, None)
        .await
        .map(|_| ())
        .map_err(anyhow::Error::new)
}

pub async fn count(collection: &Collection<Document>, filter: Document) -> Result<u64> {
    Ok(collection.count_documents(filter, None).await?)
}

pub async fn delete_one_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Option<E> {
    match collection.find_one_and_delete(filter, None).await {
        Ok(Some(doc)) => persistence_to_entity::<E, D>(doc).ok(),
        Ok(None) => None,
        Err(e) => {
            error!("Delete failed on {}: {:?}", collection.name(), e);
            None
        }
    }
}

pub async fn delete_many_by(
    collection: &Collection<Document>,
    filter: Document,
) -> Result<DeleteResult> {
    let res = collection.delete_many(filter, None).await?;
    Ok(DeleteResult {
        deleted_count: res.deleted_count as i64,
    })
}

async fn consume_cursor<E, D: MongoDocument<E>>(mut cursor: Cursor<Document>) -> Vec<E> {
    let mut documents = vec![];
    while let Some(result) = cursor.next().await {
        match result.map_err(anyhow::Error::new).and_then(persistence_to_entity::<E, D>) {
            Ok(entity) => documents.push(entity),
            Err(e) => {
                error!("Error reading cursor: {:?}", e);
            }
        }
    }

    documents
}

//! Singleton profile store
//!
//! One profile record, replace-on-write. Deletes are soft: the document
//! stays behind with `metadata.is_deleted` set, and every read filters
//! it out. The store is deliberately not a general multi-document
//! collection: every read fetches the whole document, every write
//! replaces it.

use async_trait::async_trait;
use bson::{doc, DateTime, Document};
use mongodb::Collection;
use tracing::debug;

use crate::db::mongo::MongoClient;
use crate::db::schemas::{ProfileDoc, ProfileMeta, PROFILE_COLLECTION};
use crate::query::ProfileLookup;
use crate::types::{FolioError, Result};

/// Single-slot store for the profile document
#[derive(Clone)]
pub struct ProfileStore {
    client: MongoClient,
    profiles: Collection<ProfileDoc>,
}

/// Restrict `filter` to documents that have not been soft-deleted
fn live(mut filter: Document) -> Document {
    filter.insert("metadata.is_deleted", doc! { "$ne": true });
    filter
}

impl ProfileStore {
    /// Create the store and apply schema indexes
    pub async fn new(client: MongoClient) -> Result<Self> {
        let profiles = client.database().collection::<ProfileDoc>(PROFILE_COLLECTION);

        profiles
            .create_indexes(ProfileDoc::indexes())
            .await
            .map_err(|e| FolioError::Database(format!("profile index creation failed: {e}")))?;
        debug!("Applied indexes to '{}' collection", PROFILE_COLLECTION);

        Ok(Self { client, profiles })
    }

    async fn find_live(&self, filter: Document) -> Result<Option<ProfileDoc>> {
        self.profiles
            .find_one(live(filter))
            .await
            .map_err(|e| FolioError::Database(format!("profile lookup failed: {e}")))
    }

    /// Fetch the current profile wholesale, if one exists
    pub async fn fetch(&self) -> Result<Option<ProfileDoc>> {
        self.find_live(doc! {}).await
    }

    /// Create the profile. Fails when one already exists or when
    /// required fields are missing.
    pub async fn create(&self, mut profile: ProfileDoc) -> Result<ProfileDoc> {
        profile.validate().map_err(FolioError::Validation)?;

        if self.fetch().await?.is_some() {
            return Err(FolioError::ProfileExists);
        }

        let now = DateTime::now();
        profile._id = None;
        profile.metadata = ProfileMeta {
            is_deleted: false,
            deleted_at: None,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let inserted = self
            .profiles
            .insert_one(profile)
            .await
            .map_err(|e| FolioError::Database(format!("profile insert failed: {e}")))?;
        debug!("Profile created with id {}", inserted.inserted_id);

        self.fetch()
            .await?
            .ok_or_else(|| FolioError::Database("profile missing after insert".into()))
    }

    /// Replace the profile in place, preserving its identity and
    /// creation timestamp.
    pub async fn replace(&self, mut profile: ProfileDoc) -> Result<ProfileDoc> {
        profile.validate().map_err(FolioError::Validation)?;

        let existing = self.fetch().await?.ok_or(FolioError::ProfileNotFound)?;

        profile._id = existing._id;
        profile.metadata = existing.metadata;
        profile.metadata.updated_at = Some(DateTime::now());

        let filter = match existing._id {
            Some(id) => doc! { "_id": id },
            None => doc! {},
        };
        self.profiles
            .replace_one(live(filter), profile)
            .await
            .map_err(|e| FolioError::Database(format!("profile replace failed: {e}")))?;

        self.fetch()
            .await?
            .ok_or_else(|| FolioError::Database("profile missing after replace".into()))
    }

    /// Soft-delete the profile: mark it deleted and stamp the time
    pub async fn delete(&self) -> Result<()> {
        let now = DateTime::now();
        let result = self
            .profiles
            .update_one(
                live(doc! {}),
                doc! { "$set": {
                    "metadata.is_deleted": true,
                    "metadata.deleted_at": now,
                    "metadata.updated_at": now,
                } },
            )
            .await
            .map_err(|e| FolioError::Database(format!("profile delete failed: {e}")))?;

        if result.modified_count == 0 {
            return Err(FolioError::ProfileNotFound);
        }

        debug!("Profile soft-deleted");
        Ok(())
    }

    /// Remove every document, deleted or not. Used by the seed tool to
    /// reset the collection.
    pub async fn purge(&self) -> Result<u64> {
        let result = self
            .profiles
            .delete_many(doc! {})
            .await
            .map_err(|e| FolioError::Database(format!("profile purge failed: {e}")))?;
        Ok(result.deleted_count)
    }

    /// Ping the underlying database, used by /health
    pub async fn ping(&self) -> Result<()> {
        self.client.ping().await
    }

    /// Database name, reported by /health
    pub fn db_name(&self) -> &str {
        self.client.db_name()
    }
}

#[async_trait]
impl ProfileLookup for ProfileStore {
    async fn fetch(&self) -> Result<Option<ProfileDoc>> {
        ProfileStore::fetch(self).await
    }

    fn supports_text_search(&self) -> bool {
        // The schema declares a text index over name, bio, and project
        // title/description
        true
    }

    async fn text_search(&self, query: &str) -> Result<Option<ProfileDoc>> {
        self.find_live(doc! { "$text": { "$search": query } })
            .await
    }
}

//! MongoDB connection handling
//!
//! One client per process. The profile collection itself lives in
//! `db::store`; this module only owns connecting, pinging, and handing
//! out the database.

use bson::doc;
use mongodb::{Client, Database};
use tracing::info;

use crate::types::{FolioError, Result};

/// Connection to the Folio database
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Connect and verify the connection with a ping.
    ///
    /// Short server-selection and connect timeouts keep startup from
    /// hanging when MongoDB is unreachable.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        info!("Connecting to MongoDB at {}", uri);

        let sep = if uri.contains('?') { '&' } else { '?' };
        let timeout_uri =
            format!("{uri}{sep}serverSelectionTimeoutMS=3000&connectTimeoutMS=3000");

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| FolioError::Database(format!("mongodb connect failed: {e}")))?;

        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| FolioError::Database(format!("mongodb ping failed: {e}")))?;

        info!("Connected to MongoDB database '{}'", db_name);

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Ping the database, used by the health endpoint
    pub async fn ping(&self) -> Result<()> {
        self.client
            .database(&self.db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| FolioError::Database(format!("mongodb ping failed: {e}")))?;
        Ok(())
    }

    /// Handle to the configured database
    pub(crate) fn database(&self) -> Database {
        self.client.database(&self.db_name)
    }

    /// Database name, reported by /health
    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}

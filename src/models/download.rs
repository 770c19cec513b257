use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Append-only record of one successful PDF export, written to the
/// `download_logs` collection.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DownloadLogDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "tripDestination")]
    pub trip_destination: String,
    pub timestamp: String,
}

/// Aggregate counter document at `stats/downloads`. Created read-through by
/// the dashboard when missing and incremented on every successful export.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DownloadStats {
    #[serde(rename = "_id")]
    pub id: String,
    pub count: i64,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
}

use serde::{Deserialize, Serialize};

/// A single todo/course entry. The id is server-assigned and immutable;
/// the client never writes it back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
}

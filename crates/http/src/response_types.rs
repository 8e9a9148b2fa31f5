//! Response types (Serialize)

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteBookResponse {
    pub removed: u64,
    pub title: String,
}

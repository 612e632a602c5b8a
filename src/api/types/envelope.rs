//! Response envelopes shared by all handlers

use serde::Serialize;
use serde_json::Value;

use crate::domain::query::PageMarkers;
use crate::infrastructure::listing::DocumentPage;

/// Single-resource envelope: `{"data": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// List envelope: `{"data": [...], "count": n, "pagination": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub data: Vec<Value>,
    pub count: u64,
    pub pagination: PageMarkers,
}

impl From<DocumentPage> for ListResponse {
    fn from(page: DocumentPage) -> Self {
        let pagination = page.pagination.markers();

        Self {
            data: page.data,
            count: page.count,
            pagination,
        }
    }
}

/// Plain message envelope: `{"message": "..."}`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

//! Success envelope shared by every endpoint.

use serde::Serialize;

/// Pagination block attached to list responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Uniform success body: `{"status":"success","data":...}` with an
/// optional `pagination` block for list endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: "success",
            data,
            pagination: None,
        }
    }

    pub fn paged(data: T, pagination: Pagination) -> Self {
        Self {
            status: "success",
            data,
            pagination: Some(pagination),
        }
    }
}

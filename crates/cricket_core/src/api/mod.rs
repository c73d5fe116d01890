pub mod json_api;
pub mod response;

pub use json_api::{
    analytics_schema_json, derive_match_json, derive_match_response_json, list_matches_json,
    list_matches_response_json, DeriveMatchRequest, DeriveMatchResponse, ListMatchesRequest,
    ListMatchesResponse, SCHEMA_VERSION,
};
pub use response::{ApiError, ApiResponse, API_VERSION};

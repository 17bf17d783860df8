pub mod api_error;
pub mod export;
pub mod list_query;
pub mod query_cache;

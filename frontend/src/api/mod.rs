//! Client calls to the search endpoints.

pub mod search_api;

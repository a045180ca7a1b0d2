//! Route parameter types and bundled configuration.

pub mod filter_query;
pub mod search_page_config;

//! Search API functions backing the HTTP routes.

pub mod search;

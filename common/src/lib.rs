//! Common library exports shared between frontend and backend.

extern crate serde;


pub mod filter_state;
pub mod query_string;
pub mod control_binding;
pub mod search_dispatcher;
pub mod search_page_config;
pub mod search_error;
pub mod search_result;
pub mod text_highlight;
pub mod tag_cloud;
pub mod search_const;

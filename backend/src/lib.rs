//! Search endpoint: result fragments and completions over a document corpus.

pub mod api;
pub mod db_utils;
pub mod server_extra;

//! Corpus loading and text helpers used by the search API.

pub mod corpus;
pub mod decompose_spans;

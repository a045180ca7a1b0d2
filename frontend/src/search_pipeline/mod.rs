//! Browser side of the search pipeline: the page adapters the dispatcher drives
//! and the task glue around it.

pub mod dom_renderer;
pub mod dom_surface;
pub mod search_driver;

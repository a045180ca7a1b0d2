use dioxus::prelude::*;

use crate::components::navbar::Navbar;
use crate::data_definitions::filter_query::FilterQuery;
use crate::pages::home_page::HomePage;
use crate::pages::search_page::{SearchAllPage, SearchPage};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]

    #[route("/")]
    HomePage {},

    #[route("/search?:..filters")]
    SearchAllPage { filters: FilterQuery },

    #[route("/search/:query?:..filters")]
    SearchPage { query: String, filters: FilterQuery },
}

impl Route {
    pub fn search_page(query: String, filters: FilterQuery) -> Self {
        if query.trim().is_empty() {
            Self::SearchAllPage { filters }
        } else {
            Self::SearchPage { query, filters }
        }
    }
}

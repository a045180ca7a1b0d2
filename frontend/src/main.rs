//! Frontend application entry point.

use frontend::app::App;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use backend::db_utils::corpus::get_corpus;
        use backend::server_extra::search_router;
        use frontend::data_definitions::search_page_config::search_page_config;

        Ok(dioxus::server::router(App).merge(search_router(get_corpus(), search_page_config())))
    });
}

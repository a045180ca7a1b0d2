use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::MdSearch;
use dioxus_free_icons::Icon;

use crate::data_definitions::filter_query::FilterQuery;
use crate::routes::Route;

/// Home page
#[component]
pub fn HomePage() -> Element {
    rsx! {
        Title { "Document Search - Home" }
        div {
            id: "x-home-container",
            style: "
                display:flex;
                flex-direction: column;
                gap: 20px;
                width: 100%;
                height: 100%;
                padding: 36px 40px;
                background: #F5F6F8;
                box-sizing: border-box;
                overflow: auto;
            ",

            div {
                style: "
                    color: #0F172A;
                    font-size: 46px;
                    font-weight: 500;
                    letter-spacing: -0.02em;
                ",
                "Document Search"
            }
            div {
                style: "
                    color: #111827;
                    font-size: 20px;
                    line-height: 1.6;
                    max-width: 620px;
                ",
                "Search titles and authors, or switch on full text search to look inside the documents. Results can be grouped by author, year or topic."
            }
            SearchCardInput {}
        }
    }
}

#[component]
fn SearchCardInput() -> Element {
    let n2 = navigator();
    let mut search_q = use_signal(|| "".to_string());
    rsx! {
        div {
            style: "
                display:flex;
                align-items:center;
                gap: 10px;
                background-color: white;
                border-radius: 9999px;
                padding: 10px 14px;
                height: 42px;
                width: 520px;
                color: #111827;
                border: 1px solid #D1D5DB;
            ",
            Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:#6B7280;" }
            input {
                r#type: "text",
                placeholder: "Search documents and hit Enter",
                style: "
                    flex:1;
                    border: none;
                    outline: none;
                    background: transparent;
                    color: #111827;
                    font-size: 14px;
                ",
                oninput: move |e| {
                    *search_q.write() = e.value();
                },
                onkeypress: move |e| {
                    if e.key() == Key::Enter {
                        e.prevent_default();
                        n2.push(Route::search_page(search_q.read().clone(), FilterQuery::default()));
                    }
                },
            }
        }
    }
}

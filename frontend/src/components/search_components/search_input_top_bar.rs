use common::search_const::SEARCH_INPUT_ID;
use dioxus::logger::tracing;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_action_icons::MdSearch};

use crate::api::search_api::fetch_completions;
use crate::search_pipeline::search_driver::SearchDriver;

const COMPLETIONS_LIST_ID: &str = "search-completions";

#[component]
pub fn SearchInputTopBar() -> Element {
    let driver = use_context::<SearchDriver>();
    let config = use_hook(|| driver.config());
    let mut query_text = driver.signals().query_text;
    let mut completions = use_signal(Vec::<String>::new);
    // Only the newest completion request may fill the list.
    let mut completion_gen = use_signal(|| 0u64);

    let completions_url = config.search_completions_url.clone();
    let input_driver = driver.clone();
    let search_oninput = move |event: Event<FormData>| {
        let value = event.value();
        query_text.set(value.clone());
        input_driver.input_changed(value.clone());

        let generation = *completion_gen.peek() + 1;
        completion_gen.set(generation);
        let completions_url = completions_url.clone();
        spawn(async move {
            match fetch_completions(&completions_url, &value).await {
                Ok(result) if *completion_gen.peek() == generation => completions.set(result.completed_queries()),
                Ok(_) => {}
                Err(e) => tracing::warn!("search_completions: {}", e),
            }
        });
    };

    let enter_driver = driver.clone();
    let search_onkeydown = move |event: Event<KeyboardData>| {
        if event.key() == Key::Enter {
            event.prevent_default();
            enter_driver.search_now(query_text.peek().clone());
        }
    };
    let button_driver = driver.clone();

    rsx! {
        div {
            id: "x-search-input-search-box",
            style: "
                display:flex;
                align-items:center;
                gap: 16px;
                background-color: white;
                border-radius: 9999px;
                padding: 10px 14px;
                height: 44px;
                color: #111827;
                border: 1px solid rgba(101, 101, 101, 0.8);
                width: 500px;
                margin-left: 16px;
            ",

            button {
                style: "
                    border: none;
                    background: none;
                    cursor: pointer;
                ",
                onclick: move |_| {
                    button_driver.search_now(query_text.peek().clone());
                },
                Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:#6B7280;" }
            }
            input {
                id: SEARCH_INPUT_ID,
                r#type: "search",
                placeholder: "Search documents",
                autocomplete: "off",
                "list": COMPLETIONS_LIST_ID,
                "data-search-base-url": "{config.search_base_url}",
                "data-search-completions-url": "{config.search_completions_url}",
                style: "
                    flex:1;
                    border: none;
                    outline: none;
                    background: transparent;
                    color: #111827;
                    font-size: 20px;
                    font-weight: 400;
                    font-family: Roboto, sans-serif;
                ",
                value: "{query_text}",
                oninput: search_oninput,
                onkeydown: search_onkeydown,
            }
            datalist {
                id: COMPLETIONS_LIST_ID,
                for suggestion in completions.read().iter() {
                    option { key: "{suggestion}", value: "{suggestion}" }
                }
            }
        }
    }
}

//! Error boundary components for rendering failures.

use dioxus::logger::tracing;
use dioxus::prelude::*;

const ERROR_BOX_STYLE: &str = "border: 1px solid red; padding: 10px; border-radius: 5px; margin: 15px;";

#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                tracing::error!("error boundary {}: {:?}", boundary_name, err);
                rsx! {
                    h1 {
                        style: "color:red; font-size: 54px; {ERROR_BOX_STYLE}",
                        "Error",
                    }
                    p {
                        style: "color:darkred; font-size: 26px; {ERROR_BOX_STYLE}",
                        "Boundary: {boundary_name}"
                    }
                    a {
                        href: "/",
                        style: "color:blue; font-size: 26px; border: 1px solid blue; padding: 10px; border-radius: 5px; margin: 15px;",
                        "Back to search"
                    }
                    pre {
                        style: "color:black; text-wrap: auto; {ERROR_BOX_STYLE}",
                        "{err:#?}"
                    }
                }
            },
            children
        }
    }
}

/// Keeps a failing part of the search page from taking the whole page down.
#[component]
pub fn ComponentErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: |err: ErrorContext| {
                let error_txt = match err.error() {
                    Some(error) => format!("{:#?}", error.0),
                    None => "Unknown error".to_string(),
                };
                tracing::error!("component error: {}", error_txt);
                rsx! {
                    div {
                        style: "display:flex; flex-direction: row; align-items: center; gap: 8px;",
                        span {
                            style: "color:darkred; font-size: 14px;",
                            title: "{error_txt}",
                            "Controls unavailable"
                        }
                        button {
                            style: "color:blue; font-size: 14px; border: 1px solid blue; padding: 4px 8px; border-radius: 5px;",
                            onclick: move |_| {
                                err.clear_errors();
                            },
                            "Try Again"
                        }
                    }
                }
            },
            {children}
        }
    }
}

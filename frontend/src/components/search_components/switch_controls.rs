//! Switch controls bound to filters: toggles and pickers.

use common::control_binding::{ControlBinding, ControlCommand, ControlKind, ControlVisual, PickerOption};
use dioxus::prelude::*;

use crate::search_pipeline::search_driver::SearchDriver;

#[component]
pub fn SwitchControls() -> Element {
    let driver = use_context::<SearchDriver>();
    let bindings = use_hook(|| driver.config().controls);
    rsx! {
        div {
            id: "x-search-switches",
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 12px;
                margin-left: 16px;
            ",
            for binding in bindings {
                SwitchControl { key: "{binding.control_id}", binding: binding.clone() }
            }
        }
    }
}

#[component]
fn SwitchControl(binding: ControlBinding) -> Element {
    let driver = use_context::<SearchDriver>();
    let controls = driver.signals().controls;
    let visual = controls.read().get(&binding.control_id).cloned().unwrap_or_else(|| ControlVisual {
        active: false,
        selected: None,
        label: String::new(),
    });

    match binding.kind.clone() {
        ControlKind::Toggle => rsx! {
            ToggleSwitch { binding, visual }
        },
        ControlKind::Picker { options, unselected_label } => rsx! {
            PickerSwitch { binding, visual, options, unselected_label }
        },
    }
}

#[component]
fn ToggleSwitch(binding: ControlBinding, visual: ControlVisual) -> Element {
    let driver = use_context::<SearchDriver>();
    let control_id = binding.control_id.clone();
    let class = if visual.active { "btn btn-primary" } else { "btn btn-default" };
    rsx! {
        a {
            id: "{binding.control_id}",
            class,
            href: "#",
            title: "{binding.title}",
            "data-switch-name": "{binding.filter_name}",
            onclick: move |event: Event<MouseData>| {
                event.prevent_default();
                driver.control_command(ControlCommand::Toggle { control_id: control_id.clone() });
            },
            span { "{visual.label}" }
            " {binding.title}"
        }
    }
}

#[component]
fn PickerSwitch(binding: ControlBinding, visual: ControlVisual, options: Vec<PickerOption>, unselected_label: String) -> Element {
    let class = if visual.active { "dropdown btn-primary" } else { "dropdown btn-default" };
    rsx! {
        div {
            id: "{binding.control_id}",
            class,
            title: "{binding.title}",
            "data-switch-name": "{binding.filter_name}",
            span { class: "dropdown-label", "{visual.label}" }
            ul {
                class: "dropdown-menu",
                for option in options {
                    PickerItem {
                        key: "{option.value}",
                        control_id: binding.control_id.clone(),
                        value: option.value.clone(),
                        label: option.label.clone(),
                        selected: visual.selected.as_deref() == Some(option.value.as_str()),
                    }
                }
                // Picking the empty value clears the filter.
                PickerItem {
                    control_id: binding.control_id.clone(),
                    value: String::new(),
                    label: unselected_label.clone(),
                    selected: !visual.active,
                }
            }
        }
    }
}

#[component]
fn PickerItem(control_id: String, value: String, label: String, selected: bool) -> Element {
    let driver = use_context::<SearchDriver>();
    let pick_value = value.clone();
    rsx! {
        li {
            a {
                href: "#",
                class: if selected { "active" } else { "" },
                "data-switch-value": "{value}",
                onclick: move |event: Event<MouseData>| {
                    event.prevent_default();
                    driver.control_command(ControlCommand::Pick {
                        control_id: control_id.clone(),
                        value: pick_value.clone(),
                    });
                },
                "{label}"
            }
        }
    }
}

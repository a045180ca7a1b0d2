//! Switch controls of the search page and their projection from [`FilterState`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filter_state::{FilterOverrides, FilterState, FilterValue};

pub const TOGGLE_ON_LABEL: &str = "on";
pub const TOGGLE_OFF_LABEL: &str = "off";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerOption {
    pub value: String,
    pub label: String,
}

impl PickerOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlKind {
    /// On/off switch (`a[data-switch-name]`).
    Toggle,
    /// Dropdown with discrete values (`div[data-switch-name]` with `[data-switch-value]` items).
    Picker {
        options: Vec<PickerOption>,
        #[serde(default)]
        unselected_label: String,
    },
}

/// Ties one control to the filter it drives. Fixed for the lifetime of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlBinding {
    pub control_id: String,
    pub filter_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub kind: ControlKind,
}

impl ControlBinding {
    pub fn toggle(control_id: impl Into<String>, filter_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            control_id: control_id.into(),
            filter_name: filter_name.into(),
            title: title.into(),
            kind: ControlKind::Toggle,
        }
    }

    pub fn picker(
        control_id: impl Into<String>,
        filter_name: impl Into<String>,
        title: impl Into<String>,
        options: Vec<PickerOption>,
        unselected_label: impl Into<String>,
    ) -> Self {
        Self {
            control_id: control_id.into(),
            filter_name: filter_name.into(),
            title: title.into(),
            kind: ControlKind::Picker { options, unselected_label: unselected_label.into() },
        }
    }

    /// What this control should look like for `state`.
    pub fn project(&self, state: &FilterState) -> ControlVisual {
        let value = state.get(&self.filter_name);
        match &self.kind {
            ControlKind::Toggle => {
                let active = value.is_some_and(|value| value.is_truthy());
                ControlVisual {
                    active,
                    selected: None,
                    label: if active { TOGGLE_ON_LABEL } else { TOGGLE_OFF_LABEL }.to_string(),
                }
            }
            ControlKind::Picker { options, unselected_label } => match value {
                Some(value) => {
                    let selected = value.as_scalar().map(|s| s.to_string());
                    let label = options
                        .iter()
                        .find(|option| Some(option.value.as_str()) == selected.as_deref())
                        .map(|option| option.label.clone())
                        .unwrap_or_default();
                    ControlVisual { active: true, selected, label }
                }
                None => ControlVisual { active: false, selected: None, label: unselected_label.clone() },
            },
        }
    }
}

/// Displayed state of a control: pressed or not, and the text on its first span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlVisual {
    pub active: bool,
    pub selected: Option<String>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlUpdate {
    pub control_id: String,
    pub visual: ControlVisual,
}

/// A user action on a bound control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    Toggle { control_id: String },
    Pick { control_id: String, value: String },
}

/// Projects filter state onto every bound control and remembers what is shown,
/// so re-applying an unchanged state produces no updates.
#[derive(Debug, Clone, Default)]
pub struct ControlSynchronizer {
    bindings: Vec<ControlBinding>,
    visuals: BTreeMap<String, ControlVisual>,
}

impl ControlSynchronizer {
    pub fn new(bindings: Vec<ControlBinding>) -> Self {
        Self { bindings, visuals: BTreeMap::new() }
    }

    pub fn bindings(&self) -> &[ControlBinding] {
        &self.bindings
    }

    pub fn binding(&self, control_id: &str) -> Option<&ControlBinding> {
        self.bindings.iter().find(|binding| binding.control_id == control_id)
    }

    pub fn visual(&self, control_id: &str) -> Option<&ControlVisual> {
        self.visuals.get(control_id)
    }

    /// Visuals every control would show for `state`, without remembering them.
    pub fn projected(&self, state: &FilterState) -> BTreeMap<String, ControlVisual> {
        self.bindings.iter().map(|binding| (binding.control_id.clone(), binding.project(state))).collect()
    }

    /// Returns the controls whose visual changed.
    pub fn apply(&mut self, state: &FilterState) -> Vec<ControlUpdate> {
        let mut updates = Vec::new();
        for binding in &self.bindings {
            let visual = binding.project(state);
            if self.visuals.get(&binding.control_id) == Some(&visual) {
                continue;
            }
            self.visuals.insert(binding.control_id.clone(), visual.clone());
            updates.push(ControlUpdate { control_id: binding.control_id.clone(), visual });
        }
        updates
    }

    /// Translates a command into the filter mutation it stands for.
    pub fn overrides_for(&self, command: &ControlCommand) -> Option<FilterOverrides> {
        let (control_id, value) = match command {
            ControlCommand::Toggle { control_id } => {
                let enabled = self.visual(control_id).is_some_and(|visual| visual.active);
                (control_id, FilterValue::Flag(!enabled))
            }
            ControlCommand::Pick { control_id, value } => (control_id, FilterValue::text(value.clone())),
        };
        let Some(binding) = self.binding(control_id) else {
            tracing::warn!("no control bound to id {}", control_id);
            return None;
        };
        Some(FilterOverrides::from([(binding.filter_name.clone(), value)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synchronizer() -> ControlSynchronizer {
        ControlSynchronizer::new(vec![
            ControlBinding::toggle("in-text", "in_text", "Search in text"),
            ControlBinding::picker(
                "group-by",
                "groupby",
                "Group by",
                vec![PickerOption::new("authors", "Authors"), PickerOption::new("year", "Year")],
                "No grouping",
            ),
        ])
    }

    #[test]
    fn projected_visuals_match_first_apply_without_recording() {
        let mut sync = synchronizer();
        let state = FilterState::from_iter([("in_text", true)]);
        let projected = sync.projected(&state);
        assert_eq!(sync.visual("in-text"), None);

        let applied: BTreeMap<String, ControlVisual> =
            sync.apply(&state).into_iter().map(|update| (update.control_id, update.visual)).collect();
        assert_eq!(projected, applied);
    }

    #[test]
    fn toggle_reflects_presence() {
        let mut sync = synchronizer();
        sync.apply(&FilterState::from_iter([("in_text", true)]));
        assert_eq!(sync.visual("in-text").map(|v| (v.active, v.label.as_str())), Some((true, "on")));
        sync.apply(&FilterState::new());
        assert_eq!(sync.visual("in-text").map(|v| (v.active, v.label.as_str())), Some((false, "off")));
    }

    #[test]
    fn picker_shows_matching_label_or_sentinel() {
        let mut sync = synchronizer();
        sync.apply(&FilterState::from_iter([("groupby", "year")]));
        let visual = sync.visual("group-by").cloned();
        assert_eq!(
            visual,
            Some(ControlVisual { active: true, selected: Some("year".into()), label: "Year".into() })
        );

        sync.apply(&FilterState::from_iter([("groupby", "colour")]));
        assert_eq!(sync.visual("group-by").map(|v| v.label.as_str()), Some(""));

        sync.apply(&FilterState::new());
        assert_eq!(sync.visual("group-by").map(|v| (v.active, v.label.as_str())), Some((false, "No grouping")));
    }

    #[test]
    fn applying_the_same_state_twice_is_idempotent() {
        let mut sync = synchronizer();
        let state = FilterState::from_iter([("in_text", FilterValue::Flag(true)), ("groupby", FilterValue::text("authors"))]);
        assert_eq!(sync.apply(&state).len(), 2);
        let after_first = (sync.visual("in-text").cloned(), sync.visual("group-by").cloned());
        assert!(sync.apply(&state).is_empty());
        assert_eq!((sync.visual("in-text").cloned(), sync.visual("group-by").cloned()), after_first);
    }

    #[test]
    fn only_changed_controls_are_reported() {
        let mut sync = synchronizer();
        sync.apply(&FilterState::new());
        let updates = sync.apply(&FilterState::from_iter([("in_text", true)]));
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].control_id, "in-text");
    }

    #[test]
    fn commands_translate_to_overrides() {
        let mut sync = synchronizer();
        sync.apply(&FilterState::new());

        let toggle = ControlCommand::Toggle { control_id: "in-text".into() };
        assert_eq!(
            sync.overrides_for(&toggle),
            Some(FilterOverrides::from([("in_text".to_string(), FilterValue::Flag(true))]))
        );

        sync.apply(&FilterState::from_iter([("in_text", true)]));
        assert_eq!(
            sync.overrides_for(&toggle),
            Some(FilterOverrides::from([("in_text".to_string(), FilterValue::Flag(false))]))
        );

        let pick = ControlCommand::Pick { control_id: "group-by".into(), value: "year".into() };
        assert_eq!(
            sync.overrides_for(&pick),
            Some(FilterOverrides::from([("groupby".to_string(), FilterValue::text("year"))]))
        );

        assert_eq!(sync.overrides_for(&ControlCommand::Toggle { control_id: "missing".into() }), None);
    }

    #[test]
    fn bindings_deserialize_from_page_config() {
        let json = r#"[
            {"control_id": "in-text", "filter_name": "in_text", "title": "Search in text", "kind": "toggle"},
            {"control_id": "group-by", "filter_name": "groupby", "kind": "picker",
             "options": [{"value": "year", "label": "Year"}], "unselected_label": "No grouping"}
        ]"#;
        let bindings: Vec<ControlBinding> = serde_json::from_str(json).unwrap();
        assert_eq!(bindings[0].kind, ControlKind::Toggle);
        assert_eq!(bindings[1].title, "");
        assert!(matches!(&bindings[1].kind, ControlKind::Picker { options, .. } if options.len() == 1));
    }
}

//! Query string <-> [`FilterState`] codec.
//!
//! Simple variable:  `?var=abc`                        gives `{var: "abc"}`
//! Simple object:    `?var.length=2&var.scope=123`     gives `{var: {length: "2", scope: "123"}}`
//! Simple array:     `?var[]=0&var[]=9`                gives `{var: ["0", "9"]}`
//! Array with index: `?var[1]=9&var[0]=0`              gives `{var: ["0", "9"]}`
//! Nested objects:   `?my.var.is.here=5`               gives `{my: {var: {is: {here: "5"}}}}`
//! All together:     `?var=a&my.var[]=b&my.cookie=no`  gives `{var: "a", my: {var: ["b"], cookie: "no"}}`
//!
//! Objects inside arrays are not supported: `?var[1].test=abc` is skipped as a
//! malformed key, since `var[1]` cannot be a property name.
//!
//! Indexed assignment collects values into a sparse index map; holes are dropped when
//! the sequence is built, so `?a[5]=x` gives `{a: ["x"]}`.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::filter_state::{FilterState, FilterValue};
use crate::search_error::{MalformedKeyError, MalformedKeyReason};

pub fn decode(query: &str) -> FilterState {
    decode_with_diagnostics(query).0
}

/// Decodes `query` and also returns the keys that had to be skipped.
pub fn decode_with_diagnostics(query: &str) -> (FilterState, Vec<MalformedKeyError>) {
    let mut root = PendingMap::new();
    let mut errors = Vec::new();
    for (key, value) in form_urlencoded::parse(query_part(query).as_bytes()) {
        if key.is_empty() {
            continue;
        }
        if let Err(err) = assign(&mut root, &key, value.into_owned()) {
            tracing::warn!("parse_params: {}", err);
            errors.push(err);
        }
    }
    (finish(root), errors)
}

pub fn encode(state: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    append_pairs(&mut serializer, "", state);
    serializer.finish()
}

/// Drops the fragment and anything up to and including the first `?`.
fn query_part(input: &str) -> &str {
    let input = match input.split_once('#') {
        Some((before, _)) => before,
        None => input,
    };
    match input.split_once('?') {
        Some((_, query)) => query,
        None => input,
    }
}

fn append_pairs(serializer: &mut form_urlencoded::Serializer<'_, String>, prefix: &str, state: &FilterState) {
    for (key, value) in state.iter() {
        let path = if prefix.is_empty() { key.clone() } else { format!("{}.{}", prefix, key) };
        match value {
            FilterValue::Scalar(text) => {
                serializer.append_pair(&path, text);
            }
            FilterValue::Flag(flag) => {
                serializer.append_pair(&path, if *flag { "true" } else { "false" });
            }
            FilterValue::Sequence(items) => {
                let array_key = format!("{}[]", path);
                for item in items {
                    serializer.append_pair(&array_key, item);
                }
            }
            FilterValue::Nested(inner) => append_pairs(serializer, &path, inner),
        }
    }
}

#[derive(Debug)]
enum Pending {
    Text(String),
    List(BTreeMap<usize, String>),
    Map(PendingMap),
}

type PendingMap = BTreeMap<String, Pending>;

#[derive(Debug, PartialEq)]
enum Slot {
    Scalar,
    Append,
    Index(usize),
}

/// `a.b.c[2]` parses to parents `[a, b]`, name `c`, slot `Index(2)`.
#[derive(Debug)]
struct KeyPath<'a> {
    parents: Vec<&'a str>,
    name: &'a str,
    slot: Slot,
}

impl<'a> KeyPath<'a> {
    fn parse(key: &'a str) -> Result<Self, MalformedKeyError> {
        let mut segments: Vec<&str> = key.split('.').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(MalformedKeyError::new(key, MalformedKeyReason::EmptySegment));
        }
        let last = segments.pop().unwrap_or_default();
        let (name, slot) = match last.split_once('[') {
            None => (last, Slot::Scalar),
            Some((name, rest)) => {
                let index = rest.split(']').next().unwrap_or_default();
                let slot = if index.is_empty() {
                    Slot::Append
                } else {
                    let parsed = index
                        .parse::<usize>()
                        .map_err(|_| MalformedKeyError::new(key, MalformedKeyReason::InvalidIndex(index.to_string())))?;
                    Slot::Index(parsed)
                };
                (name, slot)
            }
        };
        if name.is_empty() {
            return Err(MalformedKeyError::new(key, MalformedKeyReason::EmptyName));
        }
        if segments.iter().chain([&name]).any(|segment| segment.contains(['[', ']'])) {
            return Err(MalformedKeyError::new(key, MalformedKeyReason::BracketInName));
        }
        Ok(Self { parents: segments, name, slot })
    }
}

fn assign(root: &mut PendingMap, key: &str, value: String) -> Result<(), MalformedKeyError> {
    let path = KeyPath::parse(key)?;
    let mut map = root;
    for parent in path.parents {
        map = child_map(map, parent);
    }
    match path.slot {
        Slot::Scalar => {
            if value.is_empty() {
                map.remove(path.name);
            } else {
                map.insert(path.name.to_string(), Pending::Text(value));
            }
        }
        slot => {
            let node = map.entry(path.name.to_string()).or_insert_with(|| Pending::List(BTreeMap::new()));
            if !matches!(node, Pending::List(_)) {
                *node = Pending::List(BTreeMap::new());
            }
            if let Pending::List(items) = node {
                let index = match slot {
                    Slot::Index(index) => index,
                    _ => match items.keys().next_back() {
                        None => 0,
                        Some(last) => last.checked_add(1).ok_or_else(|| {
                            MalformedKeyError::new(key, MalformedKeyReason::InvalidIndex(format!("{}+1", last)))
                        })?,
                    },
                };
                items.insert(index, value);
            }
        }
    }
    Ok(())
}

/// Returns the nested map under `name`, replacing any non-map value.
fn child_map<'m>(map: &'m mut PendingMap, name: &str) -> &'m mut PendingMap {
    let node = map.entry(name.to_string()).or_insert_with(|| Pending::Map(PendingMap::new()));
    if !matches!(node, Pending::Map(_)) {
        *node = Pending::Map(PendingMap::new());
    }
    match node {
        Pending::Map(inner) => inner,
        _ => unreachable!("node was just made a map"),
    }
}

fn finish(map: PendingMap) -> FilterState {
    let mut state = FilterState::new();
    for (key, node) in map {
        let value = match node {
            Pending::Text(text) => FilterValue::text(text),
            Pending::List(items) => FilterValue::Sequence(items.into_values().collect()),
            Pending::Map(inner) => FilterValue::Nested(finish(inner)),
        };
        state.set(key, value);
    }
    state
}

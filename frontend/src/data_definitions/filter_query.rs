//! Filter state carried in the query string of the search page route.

use std::{fmt::Display, str::FromStr};

use common::filter_state::FilterState;
use common::query_string;

// The router spreads the whole query string into this type: it has to be built
// from `&str` and display back in the same encoding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterQuery(pub FilterState);

impl From<FilterState> for FilterQuery {
    fn from(value: FilterState) -> Self {
        FilterQuery(value)
    }
}

impl From<&str> for FilterQuery {
    fn from(query: &str) -> Self {
        FilterQuery(query_string::decode(query))
    }
}

impl FromStr for FilterQuery {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FilterQuery::from(s))
    }
}

impl Display for FilterQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", query_string::encode(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_route() {
        let query = FilterQuery::from("in_text=true&groupby=year");
        assert_eq!(query.to_string(), "groupby=year&in_text=true");
        assert_eq!(FilterQuery::from(query.to_string().as_str()), query);
    }

    #[test]
    fn empty_query_is_empty_state() {
        assert!(FilterQuery::from("").0.is_empty());
        assert_eq!(FilterQuery::default().to_string(), "");
    }
}

//! Filter selections with an "all" sentinel.
//!
//! Dashboard filters arrive as raw strings where `"all"` (or nothing at all)
//! means "do not filter on this field".

use core::str::FromStr;

/// Sentinel value meaning "no filter".
pub const ALL: &str = "all";

/// Either every value (`All`) or exactly one concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> Selection<T> {
    /// `Some(v)` becomes `Only(v)`, `None` becomes `All`.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Only(v),
            None => Self::All,
        }
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::All => None,
            Self::Only(v) => Some(v),
        }
    }
}

impl<T: PartialEq> Selection<T> {
    /// `true` when the selection admits `value`.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(v) => v == value,
        }
    }
}

impl<T: FromStr> Selection<T> {
    /// Parse a raw filter parameter. `None` and `"all"` yield `All`.
    ///
    /// The sentinel comparison is exact: `"All"` is handed to `T::from_str`.
    pub fn parse(raw: Option<&str>) -> Result<Self, T::Err> {
        match raw {
            None => Ok(Self::All),
            Some(ALL) => Ok(Self::All),
            Some(s) => s.parse().map(Self::Only),
        }
    }
}

impl<T> From<T> for Selection<T> {
    fn from(value: T) -> Self {
        Self::Only(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_matches_everything() {
        let sel: Selection<String> = Selection::All;
        assert!(sel.matches(&"Power".to_string()));
        assert!(sel.matches(&String::new()));
    }

    #[test]
    fn only_matches_exactly() {
        let sel = Selection::Only("Electronics".to_string());
        assert!(sel.matches(&"Electronics".to_string()));
        assert!(!sel.matches(&"electronics".to_string()));
    }

    #[test]
    fn parse_treats_sentinel_and_none_as_all() {
        assert_eq!(Selection::<String>::parse(None).unwrap(), Selection::All);
        assert_eq!(Selection::<String>::parse(Some("all")).unwrap(), Selection::All);
        assert_eq!(
            Selection::<String>::parse(Some("Parts")).unwrap(),
            Selection::Only("Parts".to_string())
        );
    }

    #[test]
    fn parse_propagates_value_errors() {
        assert!(Selection::<u32>::parse(Some("many")).is_err());
        assert_eq!(Selection::<u32>::parse(Some("3")).unwrap(), Selection::Only(3));
    }
}

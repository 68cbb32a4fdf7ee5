use std::fmt::Display;

/// A single field value exposed by a record for display, searching and scoping.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Null,
    String(String),
}

impl FilterValue {
    /// Case-insensitive substring match. Null values never match a non-empty needle.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }

        match self {
            FilterValue::Null => false,
            other => other
                .to_string()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

impl Display for FilterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterValue::Null => Ok(()),
            FilterValue::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::String(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::String(value.to_string())
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        FilterValue::String(value.clone())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FilterValue::Null)
    }
}

pub trait Filterable {
    fn get(&self, key: &str) -> FilterValue;
}

/// Restricts a collection to records whose `field` equals `value` exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    pub field: &'static str,
    pub value: String,
}

impl Scope {
    pub fn new(field: &'static str, value: impl ToString) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }

    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        item.get(self.field) == FilterValue::String(self.value.clone())
    }
}

/// Selects the subset of `items` in scope whose `field` contains `needle`, preserving order.
pub fn search<T: Filterable + Clone>(
    items: &[T],
    field: &str,
    needle: &str,
    scope: Option<&Scope>,
) -> Vec<T> {
    items
        .iter()
        .filter(|item| scope.map(|s| s.matches(*item)).unwrap_or(true))
        .filter(|item| item.get(field).contains_ignore_case(needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        name: &'static str,
        kind: &'static str,
        note: Option<&'static str>,
    }

    impl Filterable for Item {
        fn get(&self, key: &str) -> FilterValue {
            match key {
                "name" => self.name.into(),
                "kind" => self.kind.into(),
                "note" => self.note.into(),
                _ => FilterValue::Null,
            }
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "Alpha", kind: "a", note: None },
            Item { name: "beta", kind: "b", note: Some("Hello") },
            Item { name: "ALPHABET", kind: "b", note: None },
        ]
    }

    #[test]
    fn empty_search_returns_everything() {
        assert_eq!(search(&items(), "name", "", None), items());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let found = search(&items(), "name", "alpha", None);
        assert_eq!(
            found.iter().map(|i| i.name).collect::<Vec<_>>(),
            vec!["Alpha", "ALPHABET"]
        );
    }

    #[test]
    fn null_fields_never_match() {
        let found = search(&items(), "note", "h", None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "beta");
    }

    #[test]
    fn whitespace_in_the_needle_is_significant() {
        let items = vec![
            Item { name: "Summer Sale", kind: "a", note: None },
            Item { name: "Spotlight", kind: "a", note: None },
        ];

        let names = |needle| {
            search(&items, "name", needle, None)
                .into_iter()
                .map(|i| i.name)
                .collect::<Vec<_>>()
        };

        assert_eq!(names(" "), vec!["Summer Sale"]);
        assert_eq!(names("sale "), Vec::<&str>::new());
        assert_eq!(names("t "), Vec::<&str>::new());
        assert_eq!(names("r s"), vec!["Summer Sale"]);
    }

    #[test]
    fn scope_applies_before_search() {
        let scope = Scope::new("kind", "b");
        let found = search(&items(), "name", "alpha", Some(&scope));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "ALPHABET");
    }

    #[test]
    fn display_of_values() {
        assert_eq!(FilterValue::Null.to_string(), "");
        assert_eq!(FilterValue::from(None::<&str>).to_string(), "");
        assert_eq!(FilterValue::from("x").to_string(), "x");
    }
}

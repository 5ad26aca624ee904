//! Search and category filtering for dashboard record lists

/// A record that can be narrowed by free text and by category
pub trait Filterable {
    /// Display fields the search text is matched against
    fn search_fields(&self) -> Vec<&str>;

    /// Field compared exactly against a category selection
    fn category(&self) -> Option<&str> {
        None
    }
}

/// Category selection with an "all" sentinel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn only(value: impl Into<String>) -> Self {
        CategoryFilter::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    /// Whether a record category passes. Records without a category only
    /// pass the "all" selection.
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(wanted.as_str()),
        }
    }

    /// Label for a selector, `all_label` for the sentinel
    pub fn label<'a>(&'a self, all_label: &'a str) -> &'a str {
        match self {
            CategoryFilter::All => all_label,
            CategoryFilter::Only(value) => value,
        }
    }
}

/// Case-insensitive substring test of `query` against any search field.
/// An empty query matches everything.
pub fn matches_query<R: Filterable + ?Sized>(record: &R, query: &str) -> bool {
    let query = query.to_lowercase();
    query.is_empty()
        || record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
}

/// Records passing both the text query and the category filter, in their
/// original order
pub fn filter_records<'r, R: Filterable>(
    records: &'r [R],
    query: &str,
    category: &CategoryFilter,
) -> Vec<&'r R> {
    records
        .iter()
        .filter(|record| category.matches(record.category()))
        .filter(|record| matches_query(*record, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        id: &'static str,
        name: &'static str,
        dept: Option<&'static str>,
    }

    impl Filterable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name, self.id]
        }

        fn category(&self) -> Option<&str> {
            self.dept
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: "CS21B001", name: "Alice Johnson", dept: Some("cs") },
            Row { id: "CS21B002", name: "Bob Smith", dept: Some("ee") },
            Row { id: "EE21B003", name: "Charlie Brown", dept: Some("cs") },
            Row { id: "ME21B004", name: "Diana Prince", dept: None },
        ]
    }

    fn ids(filtered: &[&Row]) -> Vec<&'static str> {
        filtered.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let rows = rows();
        let filtered = filter_records(&rows, "", &CategoryFilter::All);
        assert_eq!(filtered.len(), rows.len());
        assert_eq!(ids(&filtered), vec!["CS21B001", "CS21B002", "EE21B003", "ME21B004"]);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let rows = rows();
        assert_eq!(ids(&filter_records(&rows, "ALICE", &CategoryFilter::All)), vec!["CS21B001"]);
        assert_eq!(ids(&filter_records(&rows, "smith", &CategoryFilter::All)), vec!["CS21B002"]);
    }

    #[test]
    fn test_query_matches_any_field_and_keeps_order() {
        let rows = rows();
        let filtered = filter_records(&rows, "cs21", &CategoryFilter::All);
        assert_eq!(ids(&filtered), vec!["CS21B001", "CS21B002"]);

        // "b0" hits every id
        let filtered = filter_records(&rows, "b0", &CategoryFilter::All);
        assert_eq!(filtered.len(), 4);
    }

    #[test]
    fn test_whitespace_is_part_of_query() {
        let rows = rows();
        assert!(filter_records(&rows, "smith ", &CategoryFilter::All).is_empty());
        assert!(filter_records(&rows, " bob", &CategoryFilter::All).is_empty());
        assert_eq!(ids(&filter_records(&rows, "bob smith", &CategoryFilter::All)), vec!["CS21B002"]);
    }

    #[test]
    fn test_no_match() {
        let rows = rows();
        assert!(filter_records(&rows, "zzz", &CategoryFilter::All).is_empty());
    }

    #[test]
    fn test_category_exact_match() {
        let rows = rows();
        let cs = CategoryFilter::only("cs");
        assert_eq!(ids(&filter_records(&rows, "", &cs)), vec!["CS21B001", "EE21B003"]);

        // Exact, not substring or case-folded
        assert!(filter_records(&rows, "", &CategoryFilter::only("c")).is_empty());
        assert!(filter_records(&rows, "", &CategoryFilter::only("CS")).is_empty());
    }

    #[test]
    fn test_query_and_category_combine() {
        let rows = rows();
        let filtered = filter_records(&rows, "brown", &CategoryFilter::only("cs"));
        assert_eq!(ids(&filtered), vec!["EE21B003"]);
        assert!(filter_records(&rows, "bob", &CategoryFilter::only("cs")).is_empty());
    }

    #[test]
    fn test_uncategorized_only_in_all() {
        let rows = rows();
        let filtered = filter_records(&rows, "diana", &CategoryFilter::All);
        assert_eq!(filtered.len(), 1);
        assert!(filter_records(&rows, "diana", &CategoryFilter::only("me")).is_empty());
    }

    #[test]
    fn test_category_label() {
        assert_eq!(CategoryFilter::All.label("All Departments"), "All Departments");
        assert_eq!(CategoryFilter::only("cs").label("All Departments"), "cs");
        assert!(CategoryFilter::default().is_all());
    }
}

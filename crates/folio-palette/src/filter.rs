#![forbid(unsafe_code)]

//! Substring filter over navigation entries.
//!
//! An entry matches when the query is a case-insensitive substring of its
//! name or of its category label. Matches keep their original relative order;
//! there is no ranking. The empty query matches everything.

use folio_content::NavigationEntry;

/// Entries matching `query`, in source order.
#[must_use]
pub fn filter<'a>(query: &str, entries: &'a [NavigationEntry]) -> Vec<&'a NavigationEntry> {
    filter_indices(query, entries)
        .into_iter()
        .map(|i| &entries[i])
        .collect()
}

/// Indices into `entries` of the entries matching `query`, ascending.
#[must_use]
pub fn filter_indices(query: &str, entries: &[NavigationEntry]) -> Vec<usize> {
    if query.is_empty() {
        return (0..entries.len()).collect();
    }
    let needle = query.to_lowercase();
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry_matches(entry, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// Whether `entry` matches an already-lowercased needle.
fn entry_matches(entry: &NavigationEntry, needle: &str) -> bool {
    entry.name().to_lowercase().contains(needle)
        || entry.category().label().to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_content::{Category, Content};
    use proptest::prelude::*;

    fn nav(name: &str) -> NavigationEntry {
        NavigationEntry::new(name.to_lowercase(), name, "/", Category::Navigation)
    }

    fn names<'a>(found: &[&'a NavigationEntry]) -> Vec<&'a str> {
        found.iter().map(|e| e.name()).collect()
    }

    #[test]
    fn empty_query_is_identity() {
        let entries = Content::builtin().entries().to_vec();
        let found = filter("", &entries);
        assert_eq!(found.len(), entries.len());
        assert!(found.iter().zip(&entries).all(|(a, b)| *a == b));
    }

    #[test]
    fn proj_selects_projects_only() {
        let entries = vec![nav("Home"), nav("Projects"), nav("Blog")];
        assert_eq!(names(&filter("proj", &entries)), vec!["Projects"]);
    }

    #[test]
    fn match_is_case_insensitive() {
        let entries = vec![nav("Home"), nav("Projects")];
        assert_eq!(names(&filter("PROJ", &entries)), vec!["Projects"]);
        assert_eq!(names(&filter("hOmE", &entries)), vec!["Home"]);
    }

    #[test]
    fn category_label_matches() {
        let entries = Content::builtin().entries().to_vec();
        let found = filter("social", &entries);
        assert_eq!(names(&found), vec!["GitHub Profile"]);
        // Every navigation entry matches its category label.
        assert_eq!(filter("navig", &entries).len(), 9);
    }

    #[test]
    fn no_match_is_empty() {
        let entries = vec![nav("Home")];
        assert!(filter("zzz", &entries).is_empty());
        assert!(filter_indices("zzz", &entries).is_empty());
    }

    #[test]
    fn substring_not_fuzzy() {
        // "pjs" is a subsequence of "Projects" but not a substring.
        let entries = vec![nav("Projects")];
        assert!(filter("pjs", &entries).is_empty());
    }

    fn arb_entries() -> impl Strategy<Value = Vec<NavigationEntry>> {
        let category = prop_oneof![
            Just(Category::Navigation),
            Just(Category::Social),
            Just(Category::Resources),
        ];
        prop::collection::vec(("[a-zA-Z ]{0,12}", category), 0..12).prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (name, cat))| NavigationEntry::new(format!("e{i}"), name, "/", cat))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn results_are_sound_complete_and_ordered(
            entries in arb_entries(),
            query in "[a-zA-Z ]{0,4}",
        ) {
            let indices = filter_indices(&query, &entries);
            let needle = query.to_lowercase();
            let expected: Vec<usize> = entries
                .iter()
                .enumerate()
                .filter(|(_, e)| {
                    e.name().to_lowercase().contains(&needle)
                        || e.category().label().to_lowercase().contains(&needle)
                })
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(&indices, &expected);
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn empty_query_returns_all(entries in arb_entries()) {
            prop_assert_eq!(filter("", &entries).len(), entries.len());
        }
    }
}

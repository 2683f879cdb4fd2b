use std::collections::HashSet;

use indexmap::IndexMap;

use crate::model::item::Item;

/// One selectable row exposed to navigation: either a single item or a
/// collapsed group's header. Row indices are never stored; navigation works
/// on these identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A collapsed group's header line (group name)
    Header(String),
    /// A single visible item (item id)
    Todo(String),
}

/// Bucket items by group in first-occurrence order, trusting collection
/// order — the store's canonical sort already yields alphabetical grouping,
/// and this layer must not re-sort.
pub fn group_buckets(items: &[Item], hide_completed: bool) -> IndexMap<Option<String>, Vec<&Item>> {
    let mut buckets: IndexMap<Option<String>, Vec<&Item>> = IndexMap::new();
    for item in items {
        if hide_completed && item.done {
            continue;
        }
        buckets.entry(item.group.clone()).or_default().push(item);
    }
    buckets
}

/// Named groups present in the collection, in first-occurrence order.
/// Ignores the completed-filter: collapse state applies to the group itself.
pub fn group_names(items: &[Item]) -> Vec<String> {
    let mut names = Vec::new();
    for item in items {
        if let Some(group) = &item.group
            && !names.contains(group)
        {
            names.push(group.clone());
        }
    }
    names
}

/// Derive the selectable-entries sequence. A collapsed named group
/// contributes one `Header`; an expanded one contributes one `Todo` per
/// member. The ungrouped bucket's members are always individually visible.
pub fn build_entries(
    items: &[Item],
    collapsed: &HashSet<String>,
    hide_completed: bool,
) -> Vec<Entry> {
    let mut entries = Vec::new();
    for (group, members) in group_buckets(items, hide_completed) {
        match &group {
            Some(name) if collapsed.contains(name) => {
                entries.push(Entry::Header(name.clone()));
            }
            _ => {
                entries.extend(members.iter().map(|item| Entry::Todo(item.id.clone())));
            }
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::Priority;
    use pretty_assertions::assert_eq;

    fn item(id: &str, group: Option<&str>, text: &str, done: bool) -> Item {
        let mut it = Item::new(
            id.into(),
            Priority::None,
            group.map(|g| g.to_string()),
            text.into(),
        );
        it.done = done;
        it
    }

    fn sample() -> Vec<Item> {
        vec![
            item("a", Some("Work"), "apple", false),
            item("b", Some("Work"), "zebra", true),
            item("c", Some("Home"), "dishes", false),
            item("d", None, "solo", false),
        ]
    }

    #[test]
    fn buckets_follow_first_occurrence_order() {
        let items = sample();
        let buckets = group_buckets(&items, false);
        let keys: Vec<_> = buckets.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![Some("Work".to_string()), Some("Home".to_string()), None]
        );
        assert_eq!(buckets[&Some("Work".to_string())].len(), 2);
    }

    #[test]
    fn hide_completed_filters_members() {
        let items = sample();
        let buckets = group_buckets(&items, true);
        assert_eq!(buckets[&Some("Work".to_string())].len(), 1);
        assert_eq!(buckets[&Some("Work".to_string())][0].id, "a");
    }

    #[test]
    fn entries_expand_all_by_default() {
        let items = sample();
        let entries = build_entries(&items, &HashSet::new(), false);
        assert_eq!(
            entries,
            vec![
                Entry::Todo("a".into()),
                Entry::Todo("b".into()),
                Entry::Todo("c".into()),
                Entry::Todo("d".into()),
            ]
        );
    }

    #[test]
    fn collapsed_group_becomes_single_header() {
        let items = sample();
        let collapsed: HashSet<String> = ["Work".to_string()].into();
        let entries = build_entries(&items, &collapsed, false);
        assert_eq!(
            entries,
            vec![
                Entry::Header("Work".into()),
                Entry::Todo("c".into()),
                Entry::Todo("d".into()),
            ]
        );
    }

    #[test]
    fn ungrouped_items_never_collapse() {
        let items = vec![item("d", None, "solo", false)];
        // A stray name in the collapsed set cannot hide ungrouped members
        let collapsed: HashSet<String> = ["solo".to_string()].into();
        let entries = build_entries(&items, &collapsed, false);
        assert_eq!(entries, vec![Entry::Todo("d".into())]);
    }

    #[test]
    fn fully_hidden_group_contributes_nothing_when_expanded() {
        let items = vec![item("b", Some("Work"), "zebra", true)];
        let entries = build_entries(&items, &HashSet::new(), true);
        assert!(entries.is_empty());
    }

    #[test]
    fn group_names_dedup_in_order() {
        let items = sample();
        assert_eq!(group_names(&items), vec!["Work".to_string(), "Home".to_string()]);
    }
}

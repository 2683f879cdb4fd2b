use std::collections::HashSet;

use crate::model::entries::{self, Entry};
use crate::model::item::Item;

/// Durable logical focus: an item identity or a group identity, never a row
/// index. Row indices are invalidated by every resort, filter toggle, or
/// collapse change; identities survive them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    Todo(String),
    Header(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

fn focus_of(entry: &Entry) -> Focus {
    match entry {
        Entry::Todo(id) => Focus::Todo(id.clone()),
        Entry::Header(name) => Focus::Header(name.clone()),
    }
}

fn matches(entry: &Entry, focus: &Focus) -> bool {
    match (entry, focus) {
        (Entry::Todo(id), Focus::Todo(fid)) => id == fid,
        (Entry::Header(name), Focus::Header(fname)) => name == fname,
        _ => false,
    }
}

/// Position of a focus within the entries sequence, by identity match.
pub fn position(entries: &[Entry], focus: &Focus) -> Option<usize> {
    entries.iter().position(|e| matches(e, focus))
}

/// Re-anchor a prior focus against a freshly derived entries sequence:
/// keep it if still present, otherwise fall back to the first entry,
/// or to no selection if the sequence is empty.
pub fn reconcile(entries: &[Entry], prior: Option<&Focus>) -> Option<Focus> {
    if let Some(focus) = prior
        && position(entries, focus).is_some()
    {
        return Some(focus.clone());
    }
    entries.first().map(focus_of)
}

/// Move one step up or down; boundaries clamp, never wrap.
pub fn step(entries: &[Entry], current: Option<&Focus>, direction: Direction) -> Option<Focus> {
    let pos = match current.and_then(|f| position(entries, f)) {
        Some(p) => p,
        None => return entries.first().map(focus_of),
    };
    let next = match direction {
        Direction::Up => pos.saturating_sub(1),
        Direction::Down => (pos + 1).min(entries.len().saturating_sub(1)),
    };
    Some(focus_of(&entries[next]))
}

fn item_group<'a>(items: &'a [Item], id: &str) -> Option<&'a str> {
    items
        .iter()
        .find(|i| i.id == id)
        .and_then(|i| i.group.as_deref())
}

/// First member item of a named group, in collection order. Prefers a
/// member visible under the completed-filter, falling back to any member.
fn first_member(items: &[Item], group: &str, hide_completed: bool) -> Option<Focus> {
    let member = |filter: bool| {
        items
            .iter()
            .find(|i| i.group.as_deref() == Some(group) && !(filter && i.done))
    };
    member(hide_completed)
        .or_else(|| member(false))
        .map(|i| Focus::Todo(i.id.clone()))
}

/// Collapse the focused item's group; focus moves to the new header.
/// Ungrouped items and header focuses are left untouched.
pub fn collapse_focused(
    items: &[Item],
    collapsed: &mut HashSet<String>,
    focus: Option<&Focus>,
) -> Option<Focus> {
    if let Some(Focus::Todo(id)) = focus
        && let Some(group) = item_group(items, id)
    {
        let group = group.to_string();
        collapsed.insert(group.clone());
        return Some(Focus::Header(group));
    }
    focus.cloned()
}

/// Expand the relevant group. A header focus moves to the group's first
/// member; a todo focus just re-opens its own group in place.
pub fn expand_focused(
    items: &[Item],
    collapsed: &mut HashSet<String>,
    focus: Option<&Focus>,
    hide_completed: bool,
) -> Option<Focus> {
    match focus {
        Some(Focus::Header(name)) => {
            collapsed.remove(name);
            first_member(items, name, hide_completed).or_else(|| focus.cloned())
        }
        Some(Focus::Todo(id)) => {
            if let Some(group) = item_group(items, id) {
                collapsed.remove(group);
            }
            focus.cloned()
        }
        None => None,
    }
}

/// If any group is collapsed, expand everything; otherwise collapse every
/// named group. Focus follows: a header lands on its first member after a
/// global expand, an item lands on its header after a global collapse.
pub fn toggle_all_groups(
    items: &[Item],
    collapsed: &mut HashSet<String>,
    focus: Option<&Focus>,
    hide_completed: bool,
) -> Option<Focus> {
    if !collapsed.is_empty() {
        collapsed.clear();
        if let Some(Focus::Header(name)) = focus {
            return first_member(items, name, hide_completed).or_else(|| focus.cloned());
        }
        return focus.cloned();
    }

    collapsed.extend(entries::group_names(items));
    if let Some(Focus::Todo(id)) = focus
        && let Some(group) = item_group(items, id)
    {
        return Some(Focus::Header(group.to_string()));
    }
    focus.cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entries::build_entries;
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
            item("b", Some("Work"), "zebra", false),
            item("c", Some("Home"), "dishes", true),
            item("d", None, "solo", false),
        ]
    }

    #[test]
    fn reconcile_keeps_surviving_focus() {
        let items = sample();
        let entries = build_entries(&items, &HashSet::new(), false);
        let prior = Focus::Todo("b".into());
        assert_eq!(reconcile(&entries, Some(&prior)), Some(prior));
    }

    #[test]
    fn reconcile_falls_back_to_first_entry() {
        let items = sample();
        let entries = build_entries(&items, &HashSet::new(), false);
        let gone = Focus::Todo("deleted".into());
        assert_eq!(reconcile(&entries, Some(&gone)), Some(Focus::Todo("a".into())));
        assert_eq!(reconcile(&[], Some(&gone)), None);
    }

    #[test]
    fn reconcile_drops_focus_hidden_by_filter() {
        let items = sample();
        let entries = build_entries(&items, &HashSet::new(), true);
        // "c" is done and filtered out
        let prior = Focus::Todo("c".into());
        assert_eq!(reconcile(&entries, Some(&prior)), Some(Focus::Todo("a".into())));
    }

    #[test]
    fn step_clamps_at_boundaries() {
        let items = sample();
        let entries = build_entries(&items, &HashSet::new(), false);
        let first = Focus::Todo("a".into());
        let last = Focus::Todo("d".into());
        assert_eq!(step(&entries, Some(&first), Direction::Up), Some(first.clone()));
        assert_eq!(step(&entries, Some(&last), Direction::Down), Some(last.clone()));
        assert_eq!(
            step(&entries, Some(&first), Direction::Down),
            Some(Focus::Todo("b".into()))
        );
    }

    #[test]
    fn step_crosses_group_headers() {
        let items = sample();
        let collapsed: HashSet<String> = ["Work".to_string()].into();
        let entries = build_entries(&items, &collapsed, false);
        // Header(Work), c, d
        let focus = Focus::Header("Work".into());
        assert_eq!(
            step(&entries, Some(&focus), Direction::Down),
            Some(Focus::Todo("c".into()))
        );
    }

    #[test]
    fn collapse_moves_focus_to_header() {
        let items = sample();
        let mut collapsed = HashSet::new();
        let focus = Focus::Todo("b".into());
        let next = collapse_focused(&items, &mut collapsed, Some(&focus));
        assert_eq!(next, Some(Focus::Header("Work".into())));
        assert!(collapsed.contains("Work"));
    }

    #[test]
    fn collapse_ignores_ungrouped() {
        let items = sample();
        let mut collapsed = HashSet::new();
        let focus = Focus::Todo("d".into());
        let next = collapse_focused(&items, &mut collapsed, Some(&focus));
        assert_eq!(next, Some(focus));
        assert!(collapsed.is_empty());
    }

    #[test]
    fn expand_header_lands_on_first_member() {
        let items = sample();
        let mut collapsed: HashSet<String> = ["Work".to_string()].into();
        let focus = Focus::Header("Work".into());
        let next = expand_focused(&items, &mut collapsed, Some(&focus), false);
        assert_eq!(next, Some(Focus::Todo("a".into())));
        assert!(collapsed.is_empty());
    }

    #[test]
    fn expand_prefers_visible_member() {
        let items = vec![
            item("x", Some("Home"), "done first", true),
            item("y", Some("Home"), "still open", false),
        ];
        let mut collapsed: HashSet<String> = ["Home".to_string()].into();
        let focus = Focus::Header("Home".into());
        let next = expand_focused(&items, &mut collapsed, Some(&focus), true);
        assert_eq!(next, Some(Focus::Todo("y".into())));
    }

    #[test]
    fn toggle_all_collapses_every_named_group() {
        let items = sample();
        let mut collapsed = HashSet::new();
        let focus = Focus::Todo("a".into());
        let next = toggle_all_groups(&items, &mut collapsed, Some(&focus), false);
        assert_eq!(next, Some(Focus::Header("Work".into())));
        assert_eq!(collapsed.len(), 2);
    }

    #[test]
    fn toggle_all_expands_when_any_collapsed() {
        let items = sample();
        let mut collapsed: HashSet<String> = ["Work".to_string()].into();
        let focus = Focus::Header("Work".into());
        let next = toggle_all_groups(&items, &mut collapsed, Some(&focus), false);
        assert_eq!(next, Some(Focus::Todo("a".into())));
        assert!(collapsed.is_empty());
    }

    #[test]
    fn toggle_all_leaves_ungrouped_focus_alone() {
        let items = sample();
        let mut collapsed = HashSet::new();
        let focus = Focus::Todo("d".into());
        let next = toggle_all_groups(&items, &mut collapsed, Some(&focus), false);
        assert_eq!(next, Some(Focus::Todo("d".into())));
        assert_eq!(collapsed.len(), 2);
    }
}

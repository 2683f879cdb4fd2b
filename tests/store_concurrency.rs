//! Cross-session behavior of the shared list file: merge-on-write, the
//! authoritative delete path, canonical ordering, and focus durability
//! across externally triggered reloads.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use tally::io::store::Store;
use tally::model::entries::build_entries;
use tally::model::item::{Item, Priority};
use tally::model::selection::{self, Focus};
use tally::ops::item_ops;

fn store_in(dir: &TempDir) -> Store {
    Store::new(dir.path().join("todos.json"))
}

/// The decoded view of an item, independent of on-disk order.
fn decoded(item: &Item) -> (String, Priority, Option<String>, String, bool) {
    (
        item.id.clone(),
        item.priority,
        item.group.clone(),
        item.text.clone(),
        item.done,
    )
}

#[test]
fn round_trip_preserves_decoded_tuples() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    item_ops::create(&mut store, "!! Work: ship the build").unwrap();
    item_ops::create(&mut store, "! Home: water plants").unwrap();
    item_ops::create(&mut store, "buy milk").unwrap();
    let id = item_ops::create(&mut store, "Work: review notes").unwrap();
    item_ops::toggle_done(&mut store, &id).unwrap();

    let before: HashSet<_> = store.load().unwrap().iter().map(decoded).collect();

    // A second session re-saves what it sees; nothing may change
    let mut other = store_in(&dir);
    let seen = other.load().unwrap();
    other.save(&seen).unwrap();

    let after: HashSet<_> = store.load().unwrap().iter().map(decoded).collect();
    assert_eq!(before, after);
}

#[test]
fn merge_keeps_concurrent_additions() {
    let dir = TempDir::new().unwrap();
    let mut session_a = store_in(&dir);
    let mut session_b = store_in(&dir);

    item_ops::create(&mut session_a, "original").unwrap();

    // A derives its working copy, then B adds X and saves
    let mut a_copy = session_a.load().unwrap();
    item_ops::create(&mut session_b, "Work: added by B").unwrap();

    // A saves an edited copy that has never seen X
    a_copy[0].text = "original, edited by A".to_string();
    session_a.save(&a_copy).unwrap();

    let merged = session_a.load().unwrap();
    assert_eq!(merged.len(), 2);
    assert!(
        merged
            .iter()
            .any(|i| i.text == "original, edited by A" && i.group.is_none())
    );
    assert!(
        merged
            .iter()
            .any(|i| i.text == "added by B" && i.group.as_deref() == Some("Work"))
    );
}

#[test]
fn canonical_order_is_insertion_independent() {
    let texts = ["Work: Zebra", "Solo", "Work: Apple", "Home: dishes"];

    let order = |inputs: &[&str]| -> Vec<String> {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        for text in inputs {
            item_ops::create(&mut store, text).unwrap();
        }
        store
            .load()
            .unwrap()
            .into_iter()
            .map(|i| i.text)
            .collect()
    };

    let forward = order(&texts);
    let mut reversed_input = texts;
    reversed_input.reverse();
    let backward = order(&reversed_input);

    assert_eq!(forward, backward);
    assert_eq!(forward, vec!["dishes", "Apple", "Zebra", "Solo"]);
}

#[test]
fn authoritative_delete_survives_a_stale_merge() {
    let dir = TempDir::new().unwrap();
    let mut session_a = store_in(&dir);
    let mut session_b = store_in(&dir);

    let doomed = item_ops::create(&mut session_a, "doomed").unwrap();
    item_ops::create(&mut session_a, "keeper").unwrap();

    // B loads before the delete, so its copy still contains the doomed item
    let stale = session_b.load().unwrap();
    assert!(stale.iter().any(|i| i.id == doomed));

    session_a.delete(&doomed).unwrap();

    // B saves a candidate derived from the stale copy, minus the doomed id.
    // Merge must not restore it: the id is on neither side of the union.
    let candidate: Vec<Item> = stale.into_iter().filter(|i| i.id != doomed).collect();
    session_b.save(&candidate).unwrap();

    let after = session_a.load().unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].text, "keeper");
}

#[test]
fn focus_survives_external_reload() {
    let dir = TempDir::new().unwrap();
    let mut session_a = store_in(&dir);
    let mut session_b = store_in(&dir);

    item_ops::create(&mut session_a, "Work: apple").unwrap();
    let anchored = item_ops::create(&mut session_a, "Work: melon").unwrap();

    let mut items = session_a.load().unwrap();
    let focus = Some(Focus::Todo(anchored.clone()));

    // Another session inserts an item that sorts before the anchor
    item_ops::create(&mut session_b, "Work: banana").unwrap();

    assert!(session_a.external_change());
    items = {
        let reloaded = session_a.load().unwrap();
        assert_eq!(reloaded.len(), items.len() + 1);
        reloaded
    };

    // Identity-based reconcile keeps the anchor even though its row moved
    let entries = build_entries(&items, &HashSet::new(), false);
    let focus = selection::reconcile(&entries, focus.as_ref());
    assert_eq!(focus, Some(Focus::Todo(anchored)));
}

#[test]
fn focus_falls_back_when_anchor_deleted_elsewhere() {
    let dir = TempDir::new().unwrap();
    let mut session_a = store_in(&dir);
    let mut session_b = store_in(&dir);

    let first = item_ops::create(&mut session_a, "apple").unwrap();
    let anchored = item_ops::create(&mut session_a, "melon").unwrap();

    let focus = Some(Focus::Todo(anchored.clone()));
    session_b.delete(&anchored).unwrap();

    let items = session_a.load().unwrap();
    let entries = build_entries(&items, &HashSet::new(), false);
    let focus = selection::reconcile(&entries, focus.as_ref());
    assert_eq!(focus, Some(Focus::Todo(first)));
}

use crate::{Change, DiffError, PageDiff};
use folio_layout::{KeyedList, Layout, Value};
use std::collections::{BTreeMap, HashSet};

/// Diff two layouts
///
/// The returned diff has an empty `version_id`; the version store fills it in
/// when the diff is persisted alongside a version.
pub fn generate_diff(before: &Layout, after: &Layout) -> Result<PageDiff, DiffError> {
    let before = before.to_value()?;
    let after = after.to_value()?;
    Ok(PageDiff::new(diff_values(&before, &after)))
}

/// Diff two value trees rooted at the empty path
pub fn diff_values(before: &Value, after: &Value) -> Vec<Change> {
    let mut changes = Vec::new();
    let mut path = Vec::new();
    diff_value(before, after, &mut path, &mut changes);
    changes
}

fn diff_value(before: &Value, after: &Value, path: &mut Vec<String>, out: &mut Vec<Change>) {
    match (before, after) {
        (Value::Map(old), Value::Map(new)) => diff_maps(old, new, path, out),
        (Value::List(old), Value::List(new)) => diff_lists(old, new, path, out),
        _ => {
            if before != after {
                out.push(Change::modify(path.as_slice(), before.clone(), after.clone()));
            }
        }
    }
}

fn diff_maps(
    before: &BTreeMap<String, Value>,
    after: &BTreeMap<String, Value>,
    path: &mut Vec<String>,
    out: &mut Vec<Change>,
) {
    for (key, old) in before {
        path.push(key.clone());
        match after.get(key) {
            None => out.push(Change::remove(path.as_slice(), old.clone(), None)),
            Some(new) => diff_value(old, new, path, out),
        }
        path.pop();
    }

    for (key, new) in after {
        if !before.contains_key(key) {
            path.push(key.clone());
            out.push(Change::add(path.as_slice(), new.clone(), None));
            path.pop();
        }
    }
}

fn diff_lists(before: &KeyedList, after: &KeyedList, path: &mut Vec<String>, out: &mut Vec<Change>) {
    let before_ids: HashSet<&str> = before.ids().collect();
    let after_ids: HashSet<&str> = after.ids().collect();

    if !survivors_keep_order(before, after, &before_ids, &after_ids) {
        out.push(Change::modify(
            path.as_slice(),
            Value::List(before.clone()),
            Value::List(after.clone()),
        ));
        return;
    }

    // Removals go last-to-first so their reverted additions replay in
    // ascending position order.
    for (index, (id, old)) in before.iter().enumerate().rev() {
        if !after_ids.contains(id) {
            path.push(id.to_string());
            out.push(Change::remove(path.as_slice(), old.clone(), Some(index)));
            path.pop();
        }
    }

    for (index, (id, new)) in after.iter().enumerate() {
        path.push(id.to_string());
        match before.get(id) {
            None => out.push(Change::add(path.as_slice(), new.clone(), Some(index))),
            Some(old) => diff_value(old, new, path, out),
        }
        path.pop();
    }
}

/// Whether the ids present in both lists appear in the same relative order
fn survivors_keep_order(
    before: &KeyedList,
    after: &KeyedList,
    before_ids: &HashSet<&str>,
    after_ids: &HashSet<&str>,
) -> bool {
    let kept_before = before.ids().filter(|id| after_ids.contains(id));
    let kept_after = after.ids().filter(|id| before_ids.contains(id));
    kept_before.eq(kept_after)
}

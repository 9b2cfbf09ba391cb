use crate::{path, Change, ChangeKind, DiffError, PageDiff};
use folio_layout::{Layout, Value};

/// Apply a diff to a copy of `layout`
pub fn apply_diff(layout: &Layout, diff: &PageDiff) -> Result<Layout, DiffError> {
    let mut root = layout.to_value()?;
    apply_changes(&mut root, &diff.changes)?;
    Ok(Layout::from_value(root)?)
}

/// Apply changes in order to a value tree
pub fn apply_changes(root: &mut Value, changes: &[Change]) -> Result<(), DiffError> {
    for change in changes {
        apply_change(root, change)?;
    }
    Ok(())
}

fn apply_change(root: &mut Value, change: &Change) -> Result<(), DiffError> {
    let segments = change.segments();
    let Some((last, parents)) = segments.split_last() else {
        return match change.kind {
            ChangeKind::Remove => Err(DiffError::InvalidChange {
                path: change.path.clone(),
                reason: "the root cannot be removed".to_string(),
            }),
            ChangeKind::Add | ChangeKind::Modify => {
                *root = change.after_value();
                Ok(())
            }
        };
    };

    let mut target = root;
    for (depth, segment) in parents.iter().enumerate() {
        if !target.is_container() {
            return Err(DiffError::NotAContainer {
                path: path::join(&segments[..depth]),
                kind: target.kind(),
            });
        }
        target = target
            .get_mut(segment)
            .ok_or_else(|| DiffError::PathNotFound(path::join(&segments[..=depth])))?;
    }

    match (target, change.kind) {
        (Value::Map(map), ChangeKind::Remove) => {
            map.remove(last);
        }
        (Value::Map(map), ChangeKind::Add | ChangeKind::Modify) => {
            map.insert(last.clone(), change.after_value());
        }
        (Value::List(list), ChangeKind::Remove) => {
            list.remove(last);
        }
        (Value::List(list), ChangeKind::Add | ChangeKind::Modify) => {
            list.upsert(last.clone(), change.after_value(), change.index);
        }
        (other, _) => {
            return Err(DiffError::NotAContainer {
                path: path::join(parents),
                kind: other.kind(),
            });
        }
    }
    Ok(())
}

/// The diff that undoes `diff`: sides swapped, add/remove flipped, order
/// reversed
pub fn revert_diff(diff: &PageDiff) -> PageDiff {
    PageDiff::new(diff.changes.iter().rev().map(Change::inverted).collect())
        .with_version_id(diff.version_id.clone())
}

/// Fold `diffs` over `base` in order
///
/// There is no conflict detection: when two diffs touch the same path the
/// later one wins.
pub fn merge_diffs(base: &Layout, diffs: &[PageDiff]) -> Result<Layout, DiffError> {
    let mut root = base.to_value()?;
    for diff in diffs {
        apply_changes(&mut root, &diff.changes)?;
    }
    Ok(Layout::from_value(root)?)
}

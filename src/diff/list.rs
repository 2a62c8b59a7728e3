use serde_json::Value;
use tracing::debug;

use crate::{
    diff::{Patch, PatchOp},
    path::{Segment, Spath},
};

/// Where an added element lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Index(usize),
    /// Past the last element, written as `-`.
    End,
}

/// A single list edit. Every index is valid against the list as it looks
/// after all preceding edits in the same script have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEdit {
    Remove { index: usize },
    Add { at: Slot, modified_index: usize },
    Move { from: usize, to: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    Original(usize),
    Added(usize),
}

/// Computes the edits that turn `original` into `modified`.
///
/// Elements are matched by value. Unmatched originals are removed first, in
/// original order; then `modified` is walked in order, inserting unmatched
/// elements and moving matched ones that fall outside the longest run of
/// elements already in the right relative order. Repeated values pair up
/// with the first unconsumed occurrence, scanning left to right.
pub fn edit_script<T: PartialEq>(original: &[T], modified: &[T]) -> Vec<ListEdit> {
    let mut edits = Vec::new();
    if original == modified {
        return edits;
    }

    let mut consumed = vec![false; original.len()];
    let matches: Vec<Option<usize>> = modified
        .iter()
        .map(|value| {
            let found = (0..original.len()).find(|&j| !consumed[j] && original[j] == *value);
            if let Some(j) = found {
                consumed[j] = true;
            }
            found
        })
        .collect();

    // Pass 1: removals, shifted by the removals already emitted.
    let mut working = Vec::with_capacity(original.len().max(modified.len()));
    let mut removed = 0;
    for (j, kept) in consumed.iter().enumerate() {
        if *kept {
            working.push(Item::Original(j));
        } else {
            edits.push(ListEdit::Remove { index: j - removed });
            removed += 1;
        }
    }

    let stationary = stationary_elements(&matches);
    let item_at = |i: usize| match matches[i] {
        Some(j) => Item::Original(j),
        None => Item::Added(i),
    };
    let last = modified.len().saturating_sub(1);

    // Pass 2: adds and moves, in modified order.
    for (i, matched) in matches.iter().enumerate() {
        if stationary[i] {
            continue;
        }

        let from = match matched {
            Some(j) => {
                let Some(from) = position(&working, Item::Original(*j)) else {
                    continue;
                };
                working.remove(from);
                Some(from)
            }
            None => None,
        };

        let to = match i.checked_sub(1) {
            Some(prev) => position(&working, item_at(prev)).map_or(working.len(), |p| p + 1),
            None => 0,
        };
        working.insert(to, item_at(i));

        match from {
            Some(from) if from != to => edits.push(ListEdit::Move { from, to }),
            Some(_) => {}
            None => {
                let at = if i == last { Slot::End } else { Slot::Index(to) };
                edits.push(ListEdit::Add {
                    at,
                    modified_index: i,
                });
            }
        }
    }

    edits
}

fn position(working: &[Item], item: Item) -> Option<usize> {
    working.iter().position(|it| *it == item)
}

// Marks the matched elements of `modified` forming a longest strictly
// increasing run of original indexes. Those never need to move.
fn stationary_elements(matches: &[Option<usize>]) -> Vec<bool> {
    let pairs: Vec<(usize, usize)> = matches
        .iter()
        .enumerate()
        .filter_map(|(i, m)| m.map(|j| (i, j)))
        .collect();

    let mut tails: Vec<usize> = Vec::new();
    let mut prev: Vec<Option<usize>> = vec![None; pairs.len()];
    for (k, &(_, j)) in pairs.iter().enumerate() {
        let slot = tails.partition_point(|&t| pairs[t].1 < j);
        if slot > 0 {
            prev[k] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(k);
        } else {
            tails[slot] = k;
        }
    }

    let mut stationary = vec![false; matches.len()];
    let mut cursor = tails.last().copied();
    while let Some(k) = cursor {
        stationary[pairs[k].0] = true;
        cursor = prev[k];
    }
    stationary
}

/// Appends the operations turning `original` into `modified` at `base_path`.
///
/// A missing list on one side becomes a single `add` or `remove` of the
/// whole list; element-level diffing only happens when both are present.
pub fn diff_list<T>(
    original: Option<&[T]>,
    modified: Option<&[T]>,
    base_path: &mut Spath,
    patch_ops: &mut Patch,
) where
    T: PartialEq + Clone + Into<Value>,
{
    let (original, modified) = match (original, modified) {
        (None, None) => return,
        (None, Some(modified)) => {
            patch_ops.push(PatchOp::add(base_path.clone(), to_array(modified)));
            return;
        }
        (Some(_), None) => {
            patch_ops.push(PatchOp::remove(base_path.clone()));
            return;
        }
        (Some(original), Some(modified)) => (original, modified),
    };

    let edits = edit_script(original, modified);
    if !edits.is_empty() {
        debug!(
            path = %base_path,
            original_len = original.len(),
            modified_len = modified.len(),
            edits = edits.len(),
            "list changed"
        );
    }

    for edit in edits {
        let op = match edit {
            ListEdit::Remove { index } => PatchOp::remove(index_path(base_path, index)),
            ListEdit::Add { at, modified_index } => {
                base_path.push(match at {
                    Slot::Index(index) => Segment::Index(index),
                    Slot::End => Segment::Append,
                });
                let op = PatchOp::add(base_path.clone(), modified[modified_index].clone().into());
                base_path.pop();
                op
            }
            ListEdit::Move { from, to } => {
                PatchOp::move_op(index_path(base_path, from), index_path(base_path, to))
            }
        };
        patch_ops.push(op);
    }
}

fn index_path(base_path: &Spath, index: usize) -> Spath {
    base_path.child(Segment::Index(index))
}

fn to_array<T: Clone + Into<Value>>(items: &[T]) -> Value {
    Value::Array(items.iter().cloned().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::patch;

    fn path(raw: &str) -> Spath {
        raw.try_into().unwrap()
    }

    fn diff(original: &[i64], modified: &[i64]) -> Vec<PatchOp> {
        let mut base = path("/l");
        let mut patch = Patch::default();
        diff_list(Some(original), Some(modified), &mut base, &mut patch);
        check!(base == path("/l"));
        patch.into_inner()
    }

    fn apply_to_list(original: &[i64], ops: &[PatchOp]) -> Value {
        let doc = json!({ "l": original });
        let_assert!(Ok(patched) = patch::apply(&doc, ops));
        patched["l"].clone()
    }

    #[test]
    fn equal_lists_produce_nothing() {
        check!(diff(&[1, 2, 3], &[1, 2, 3]).is_empty());
        check!(diff(&[], &[]).is_empty());
    }

    #[test]
    fn both_missing_produce_nothing() {
        let mut base = path("/l");
        let mut patch = Patch::default();
        diff_list::<i64>(None, None, &mut base, &mut patch);

        check!(patch.is_empty());
    }

    #[test]
    fn missing_original_adds_the_whole_list() {
        let mut base = path("/l");
        let mut patch = Patch::default();
        diff_list(None, Some(&[1, 2][..]), &mut base, &mut patch);

        check!(patch.into_inner() == vec![PatchOp::add(path("/l"), json!([1, 2]))]);
    }

    #[test]
    fn missing_modified_removes_the_whole_list() {
        let mut base = path("/l");
        let mut patch = Patch::default();
        diff_list(Some(&[1, 2][..]), None, &mut base, &mut patch);

        check!(patch.into_inner() == vec![PatchOp::remove(path("/l"))]);
    }

    #[test]
    fn append_uses_the_dash_slot() {
        check!(diff(&[1, 2], &[1, 2, 3]) == vec![PatchOp::add(path("/l/-"), json!(3))]);
    }

    #[test]
    fn rotation_is_a_single_move() {
        let ops = diff(&[1, 2, 3], &[2, 3, 1]);

        check!(ops == vec![PatchOp::move_op(path("/l/0"), path("/l/2"))]);
        check!(apply_to_list(&[1, 2, 3], &ops) == json!([2, 3, 1]));
    }

    #[test]
    fn last_to_front_is_a_single_move() {
        check!(diff(&[1, 2, 3, 4], &[4, 1, 2, 3]) == vec![PatchOp::move_op(path("/l/3"), path("/l/0"))]);
    }

    #[test]
    fn reversal_moves_all_but_one() {
        let ops = diff(&[1, 2, 3], &[3, 2, 1]);

        check!(
            ops == vec![
                PatchOp::move_op(path("/l/2"), path("/l/0")),
                PatchOp::move_op(path("/l/2"), path("/l/1")),
            ]
        );
        check!(apply_to_list(&[1, 2, 3], &ops) == json!([3, 2, 1]));
    }

    #[test]
    fn removals_are_shifted_by_earlier_removals() {
        check!(
            diff(&[1, 2, 3, 4], &[1, 3]) == vec![PatchOp::remove(path("/l/1")), PatchOp::remove(path("/l/2"))]
        );
    }

    #[test]
    fn removing_everything() {
        check!(diff(&[1, 2, 3], &[]) == vec![PatchOp::remove(path("/l/0")); 3]);
    }

    #[test]
    fn adds_into_an_empty_list() {
        check!(
            diff(&[], &[1, 2]) == vec![PatchOp::add(path("/l/0"), json!(1)), PatchOp::add(path("/l/-"), json!(2))]
        );
    }

    #[test]
    fn insertions_use_modified_indexes() {
        check!(diff(&[1, 2, 3], &[0, 1, 2, 3]) == vec![PatchOp::add(path("/l/0"), json!(0))]);
        check!(diff(&[1, 2, 3], &[1, 9, 2, 3]) == vec![PatchOp::add(path("/l/1"), json!(9))]);
    }

    #[test]
    fn add_index_accounts_for_elements_still_to_move() {
        let ops = diff(&[1, 2, 3], &[2, 9, 3, 1]);

        check!(
            ops == vec![
                PatchOp::add(path("/l/2"), json!(9)),
                PatchOp::move_op(path("/l/0"), path("/l/3")),
            ]
        );
        check!(apply_to_list(&[1, 2, 3], &ops) == json!([2, 9, 3, 1]));
    }

    #[test]
    fn move_followed_by_append() {
        let ops = diff(&[1, 2], &[2, 1, 3]);

        check!(
            ops == vec![
                PatchOp::move_op(path("/l/1"), path("/l/0")),
                PatchOp::add(path("/l/-"), json!(3)),
            ]
        );
    }

    #[test]
    fn duplicates_match_first_unconsumed_occurrence() {
        let ops = diff(&[1, 1, 2], &[2, 1, 1]);

        check!(ops == vec![PatchOp::move_op(path("/l/2"), path("/l/0"))]);
        check!(apply_to_list(&[1, 1, 2], &ops) == json!([2, 1, 1]));
    }

    #[test]
    fn surplus_duplicate_is_removed() {
        let ops = diff(&[5, 5, 5], &[5]);

        check!(ops == vec![PatchOp::remove(path("/l/1")), PatchOp::remove(path("/l/1"))]);
    }

    #[test]
    fn mixed_removals_adds_and_moves() {
        let original: Vec<i64> = (1..=15).collect();
        let modified = [1, 2, 17, 7, 8, 6, 9, 11, 10, 20, 14, 13, 18];

        let ops = diff(&original, &modified);

        check!(
            ops == vec![
                PatchOp::remove(path("/l/2")),
                PatchOp::remove(path("/l/2")),
                PatchOp::remove(path("/l/2")),
                PatchOp::remove(path("/l/8")),
                PatchOp::remove(path("/l/10")),
                PatchOp::add(path("/l/2"), json!(17)),
                PatchOp::move_op(path("/l/3"), path("/l/5")),
                PatchOp::move_op(path("/l/8"), path("/l/7")),
                PatchOp::add(path("/l/9"), json!(20)),
                PatchOp::move_op(path("/l/11"), path("/l/10")),
                PatchOp::add(path("/l/-"), json!(18)),
            ]
        );
        check!(apply_to_list(&original, &ops) == json!(modified));
    }

    #[test]
    fn base_path_is_nested() {
        let mut base = path("/a/0/tags");
        let mut patch = Patch::default();
        diff_list(Some(&["x", "y"][..]), Some(&["y", "x"][..]), &mut base, &mut patch);

        check!(patch.into_inner() == vec![PatchOp::move_op(path("/a/0/tags/1"), path("/a/0/tags/0"))]);
        check!(base == path("/a/0/tags"));
    }

    #[test]
    fn edit_script_reports_modified_index_of_adds() {
        let edits = edit_script(&['a', 'c'], &['a', 'b', 'c', 'd']);

        check!(
            edits
                == vec![
                    ListEdit::Add {
                        at: Slot::Index(1),
                        modified_index: 1
                    },
                    ListEdit::Add {
                        at: Slot::End,
                        modified_index: 3
                    },
                ]
        );
    }

    proptest! {
        #[test]
        fn applying_the_patch_reproduces_modified(
            original in prop::collection::vec(0i64..6, 0..10),
            modified in prop::collection::vec(0i64..6, 0..10),
        ) {
            let ops = diff(&original, &modified);
            let patched = patch::apply(&json!({ "l": original }), &ops).ok();

            prop_assert_eq!(patched, Some(json!({ "l": modified })));
        }

        #[test]
        fn diffing_a_list_with_itself_is_empty(list in prop::collection::vec(0i64..6, 0..12)) {
            prop_assert!(diff(&list, &list).is_empty());
        }

        #[test]
        fn permutations_use_only_moves(list in prop::collection::vec(0i64..100, 0..10).prop_shuffle()) {
            let mut sorted = list.clone();
            sorted.sort();
            let ops = diff(&sorted, &list);

            let only_moves = ops.iter().all(|op| matches!(op, PatchOp::Move { .. }));
            prop_assert!(only_moves);
            prop_assert!(ops.len() < list.len().max(1));
        }
    }
}

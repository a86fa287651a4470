// Quickfix list editing: deletion of a contiguous block of entries

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// One quickfix entry. Fields the host adds beyond these are carried through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickfixItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default)]
    pub lnum: u32,
    #[serde(default)]
    pub col: u32,
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which entries to delete. Lines are 1-based, as shown in the quickfix window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    /// `count` entries starting at the cursor line; no count means one
    Single { line: usize, count: Option<usize> },
    /// Inclusive visual selection; the ends may be given in either order
    Range { start: usize, end: usize },
}

impl Deletion {
    /// Inclusive first and last line of the block
    pub fn bounds(&self) -> (usize, usize) {
        match *self {
            Deletion::Single { line, count } => {
                let line = line.max(1);
                let count = count.unwrap_or(1).max(1);
                (line, line.saturating_add(count - 1))
            }
            Deletion::Range { start, end } => {
                let (low, high) = if start <= end {
                    (start, end)
                } else {
                    (end, start)
                };
                (low.max(1), high.max(1))
            }
        }
    }
}

/// The replacement list and where the cursor goes next
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletionOutcome<T> {
    pub items: Vec<T>,
    pub removed: usize,
    /// The deletion's start line, clamped to the remaining entries
    pub cursor_line: usize,
}

/// Remove the block addressed by `deletion` from `items`. Lines past the end
/// of the list are ignored.
pub fn delete_items<T: Clone>(items: &[T], deletion: Deletion) -> DeletionOutcome<T> {
    let (first, last) = deletion.bounds();

    let remaining: Vec<T> = items
        .iter()
        .enumerate()
        .filter(|(index, _)| {
            let line = index + 1;
            line < first || line > last
        })
        .map(|(_, item)| item.clone())
        .collect();

    let removed = items.len() - remaining.len();
    let cursor_line = first.min(remaining.len()).max(1);

    debug!(
        first,
        last,
        removed,
        remaining = remaining.len(),
        "Deleted quickfix entries"
    );

    DeletionOutcome {
        items: remaining,
        removed,
        cursor_line,
    }
}

/// A quickfix list as exchanged with the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickfixList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<QuickfixItem>,
}

impl QuickfixList {
    pub fn new(items: Vec<QuickfixItem>) -> Self {
        Self { title: None, items }
    }

    /// Replace the items wholesale with the filtered list; returns the new cursor line
    pub fn delete(&mut self, deletion: Deletion) -> usize {
        let outcome = delete_items(&self.items, deletion);
        self.items = outcome.items;
        outcome.cursor_line
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_deletion_keeps_outer_items() {
        let outcome = delete_items(&[1, 2, 3, 4, 5], Deletion::Range { start: 2, end: 4 });
        assert_eq!(outcome.items, vec![1, 5]);
        assert_eq!(outcome.removed, 3);
        assert_eq!(outcome.cursor_line, 2);
    }

    #[test]
    fn test_range_direction_does_not_matter() {
        let outcome = delete_items(&["a", "b", "c", "d"], Deletion::Range { start: 3, end: 2 });
        assert_eq!(outcome.items, vec!["a", "d"]);
        assert_eq!(outcome.cursor_line, 2);
    }

    #[test]
    fn test_single_defaults_to_one_item() {
        let outcome = delete_items(&[1, 2, 3], Deletion::Single { line: 2, count: None });
        assert_eq!(outcome.items, vec![1, 3]);
        assert_eq!(outcome.cursor_line, 2);
    }

    #[test]
    fn test_single_with_count() {
        let outcome = delete_items(
            &[1, 2, 3, 4],
            Deletion::Single {
                line: 1,
                count: Some(2),
            },
        );
        assert_eq!(outcome.items, vec![3, 4]);
        assert_eq!(outcome.cursor_line, 1);
    }

    #[test]
    fn test_deleting_tail_clamps_cursor() {
        let outcome = delete_items(
            &[1, 2, 3],
            Deletion::Single {
                line: 3,
                count: Some(5),
            },
        );
        assert_eq!(outcome.items, vec![1, 2]);
        assert_eq!(outcome.removed, 1);
        assert_eq!(outcome.cursor_line, 2);
    }

    #[test]
    fn test_huge_count_removes_rest_of_list() {
        let outcome = delete_items(
            &[1, 2, 3, 4],
            Deletion::Single {
                line: 2,
                count: Some(usize::MAX),
            },
        );
        assert_eq!(outcome.items, vec![1]);
        assert_eq!(outcome.removed, 3);
        assert_eq!(outcome.cursor_line, 1);
    }

    #[test]
    fn test_deleting_everything() {
        let outcome = delete_items(&[1, 2], Deletion::Range { start: 1, end: 2 });
        assert!(outcome.items.is_empty());
        assert_eq!(outcome.cursor_line, 1);
    }

    #[test]
    fn test_list_keeps_unknown_fields() {
        let mut list: QuickfixList = serde_json::from_str(
            r#"{"title":"grep","items":[
                {"filename":"a.rs","lnum":1,"col":2,"text":"x","bufnr":4},
                {"filename":"b.rs","lnum":3,"col":1,"text":"y"}
            ]}"#,
        )
        .unwrap();
        let cursor = list.delete(Deletion::Single {
            line: 2,
            count: None,
        });
        assert_eq!(cursor, 1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.items[0].extra["bufnr"], 4);
    }
}

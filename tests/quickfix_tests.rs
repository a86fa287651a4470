// Quickfix list deletion tests

use serde_json::json;

use edkit::quickfix::{delete_items, Deletion, QuickfixItem, QuickfixList};

fn list_of(count: u32) -> QuickfixList {
    QuickfixList::new(
        (1..=count)
            .map(|n| QuickfixItem {
                filename: Some(format!("src/file{n}.rs")),
                lnum: n,
                col: 1,
                text: format!("entry {n}"),
                ..Default::default()
            })
            .collect(),
    )
}

fn lines(list: &QuickfixList) -> Vec<u32> {
    list.items.iter().map(|item| item.lnum).collect()
}

#[test]
fn test_range_deletion_of_middle_block() {
    let mut list = list_of(5);
    let cursor = list.delete(Deletion::Range { start: 2, end: 4 });
    assert_eq!(lines(&list), vec![1, 5]);
    assert_eq!(cursor, 2);
}

#[test]
fn test_reversed_selection_is_the_same_block() {
    let mut forward = list_of(5);
    let mut backward = list_of(5);
    forward.delete(Deletion::Range { start: 2, end: 4 });
    backward.delete(Deletion::Range { start: 4, end: 2 });
    assert_eq!(forward, backward);
}

#[test]
fn test_single_line_with_count() {
    let mut list = list_of(5);
    let cursor = list.delete(Deletion::Single {
        line: 3,
        count: Some(2),
    });
    assert_eq!(lines(&list), vec![1, 2, 5]);
    assert_eq!(cursor, 3);
}

#[test]
fn test_deleting_last_entry_moves_cursor_up() {
    let mut list = list_of(3);
    let cursor = list.delete(Deletion::Single {
        line: 3,
        count: None,
    });
    assert_eq!(lines(&list), vec![1, 2]);
    assert_eq!(cursor, 2);
}

#[test]
fn test_block_past_end_is_truncated() {
    let outcome = delete_items(&list_of(4).items, Deletion::Range { start: 3, end: 10 });
    assert_eq!(outcome.removed, 2);
    assert_eq!(outcome.items.len(), 2);
    assert_eq!(outcome.cursor_line, 2);
}

#[test]
fn test_emptied_list_keeps_cursor_on_first_line() {
    let mut list = list_of(2);
    let cursor = list.delete(Deletion::Range { start: 1, end: 2 });
    assert!(list.is_empty());
    assert_eq!(cursor, 1);
}

#[test]
fn test_host_fields_survive_deletion() {
    let mut list: QuickfixList = serde_json::from_value(json!({
        "title": "grep",
        "items": [
            { "filename": "a.rs", "lnum": 1, "col": 2, "text": "x", "bufnr": 7, "valid": 1 },
            { "filename": "b.rs", "lnum": 3, "col": 4, "text": "y", "bufnr": 8, "valid": 1 }
        ]
    }))
    .unwrap();
    list.delete(Deletion::Single {
        line: 1,
        count: None,
    });

    let value = serde_json::to_value(&list).unwrap();
    assert_eq!(value["title"], "grep");
    assert_eq!(value["items"][0]["bufnr"], 8);
    assert_eq!(value["items"][0]["filename"], "b.rs");
    assert_eq!(list.len(), 1);
}

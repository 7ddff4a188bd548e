use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    error::CatalogError,
    index::{BookIndex, NodeId},
    record::BookRecord,
};

/// Build an index from titles, using the title length as the year
fn index_of(titles: &[&str]) -> BookIndex {
    let mut index = BookIndex::new();
    for title in titles {
        let year = i32::try_from(title.len()).unwrap_or_default();
        assert!(index.insert(BookRecord::new(*title, "Author", year)).is_ok());
    }
    index
}

/// Titles in traversal order
fn titles(index: &BookIndex) -> Vec<String> {
    index.iter().map(|record| record.title.clone()).collect()
}

/// Walk the arena and assert every node respects its (low, high) bounds
fn assert_bst_invariant(index: &BookIndex) {
    let mut pending: Vec<(NodeId, Option<String>, Option<String>)> =
        index.root.map(|id| (id, None, None)).into_iter().collect();
    let mut seen = 0_usize;

    while let Some((id, low, high)) = pending.pop() {
        let node = index.node(id);
        let title = &node.record.title;
        if let Some(low) = &low {
            assert!(title > low, "{title} should be greater than {low}");
        }
        if let Some(high) = &high {
            assert!(title < high, "{title} should be less than {high}");
        }
        if let Some(left) = node.left {
            pending.push((left, low.clone(), Some(title.clone())));
        }
        if let Some(right) = node.right {
            pending.push((right, Some(title.clone()), high.clone()));
        }
        seen = seen.saturating_add(1);
    }

    assert_eq!(seen, index.len());
}

#[test]
fn test_empty_index() {
    let index = BookIndex::new();
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
    assert_eq!(index.height(), 0);
    assert!(index.find("Dune").is_none());
    assert_eq!(index.iter().next(), None);
}

#[test]
fn test_insert_and_find() {
    let mut index = BookIndex::new();
    let dune = BookRecord::new("Dune", "Herbert", 1965);
    assert!(index.insert(dune.clone()).is_ok());

    assert_eq!(index.find("Dune"), Some(&dune));
    assert!(index.contains("Dune"));
    assert!(!index.contains("dune"));
    assert_eq!(index.len(), 1);
}

#[test]
fn test_duplicate_insert_is_rejected() {
    let mut index = index_of(&["M", "C", "T"]);
    let result = index.insert(BookRecord::new("C", "Someone Else", 2000));

    assert_eq!(result, Err(CatalogError::DuplicateTitle("C".to_string())));
    assert_eq!(index.len(), 3);
    assert_eq!(index.find("C").map(|record| record.author.as_str()), Some("Author"));
    assert_bst_invariant(&index);
}

#[test]
fn test_in_order_traversal_is_sorted() {
    let index = index_of(&["Dune", "1984", "Neuromancer", "Emma", "Anathem"]);
    assert_eq!(titles(&index), vec!["1984", "Anathem", "Dune", "Emma", "Neuromancer"]);
}

#[test]
fn test_traversal_is_restartable_and_exact_size() {
    let index = index_of(&["B", "A", "C"]);
    let first = index.iter();
    assert_eq!(first.len(), 3);
    assert_eq!(titles(&index), titles(&index));

    let mut iter = index.iter();
    assert!(iter.next().is_some());
    assert_eq!(iter.len(), 2);
}

#[test]
fn test_sorted_inserts_degrade_to_a_chain() {
    let index = index_of(&["A", "B", "C", "D", "E"]);
    assert_eq!(index.height(), 5);

    let balanced = index_of(&["C", "B", "D", "A", "E"]);
    assert_eq!(balanced.height(), 3);
}

#[test]
fn test_delete_leaf() {
    let mut index = index_of(&["M", "C", "T"]);
    let removed = index.delete("C");

    assert_eq!(removed.map(|record| record.title), Ok("C".to_string()));
    assert_eq!(titles(&index), vec!["M", "T"]);
    assert_bst_invariant(&index);
}

#[test]
fn test_delete_single_child_node() {
    let mut index = index_of(&["M", "C", "A"]);
    assert!(index.delete("C").is_ok());

    assert_eq!(titles(&index), vec!["A", "M"]);
    assert_eq!(index.height(), 2);
    assert_bst_invariant(&index);
}

#[test]
fn test_delete_two_children_returns_original_record() {
    let mut index = BookIndex::new();
    for record in [
        BookRecord::new("M", "Middle", 1),
        BookRecord::new("C", "Left", 2),
        BookRecord::new("T", "Right", 3),
        BookRecord::new("P", "Successor", 4),
        BookRecord::new("R", "After Successor", 5),
    ] {
        assert!(index.insert(record).is_ok());
    }

    let removed = index.delete("M");
    assert_eq!(removed, Ok(BookRecord::new("M", "Middle", 1)));

    // The successor's full record now sits where "M" used to be.
    assert_eq!(index.find("P"), Some(&BookRecord::new("P", "Successor", 4)));
    assert!(index.find("M").is_none());
    assert_eq!(index.len(), 4);
    assert_eq!(titles(&index), vec!["C", "P", "R", "T"]);
    assert_bst_invariant(&index);
}

#[test]
fn test_delete_root_with_direct_successor() {
    let mut index = index_of(&["B", "A", "C", "D"]);
    assert!(index.delete("B").is_ok());

    assert_eq!(titles(&index), vec!["A", "C", "D"]);
    assert_bst_invariant(&index);
}

#[test]
fn test_delete_missing_title() {
    let mut index = index_of(&["M", "C"]);
    let result = index.delete("Z");

    assert_eq!(result, Err(CatalogError::NotFound("Z".to_string())));
    assert_eq!(index.len(), 2);
    assert_eq!(titles(&index), vec!["C", "M"]);
}

#[test]
fn test_delete_last_node_empties_tree() {
    let mut index = index_of(&["Only"]);
    assert!(index.delete("Only").is_ok());

    assert!(index.is_empty());
    assert_eq!(index.height(), 0);
}

#[test]
fn test_freed_slots_are_reused() {
    let mut index = index_of(&["M", "C", "T"]);
    assert!(index.delete("C").is_ok());
    assert!(index.insert(BookRecord::new("D", "Author", 1)).is_ok());

    assert_eq!(index.nodes.len(), 3);
    assert!(index.free.is_empty());
    assert_bst_invariant(&index);
}

#[test]
fn test_random_sequences_keep_invariant() {
    let mut rng = StdRng::seed_from_u64(0x00b0_0c5e);
    let mut titles_pool: Vec<String> = (0..64).map(|n| format!("Title {n:02}")).collect();
    titles_pool.shuffle(&mut rng);

    let mut index = BookIndex::new();
    for title in &titles_pool {
        assert!(index.insert(BookRecord::new(title.as_str(), "Author", 2000)).is_ok());
    }
    assert_bst_invariant(&index);

    titles_pool.shuffle(&mut rng);
    let (removed, kept) = titles_pool.split_at(32);
    for title in removed {
        assert!(index.delete(title).is_ok());
        assert_bst_invariant(&index);
    }

    let mut expected = kept.to_vec();
    expected.sort();
    assert_eq!(titles(&index), expected);
}

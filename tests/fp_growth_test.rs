//! Property tests checking FPGrowth against brute force counting, plus an
//! end to end run from dataset text to rendered itemsets.

use fpgrowth::fptree::compare_by_frequency;
use fpgrowth::itemset_writer::write_itemsets;
use fpgrowth::transaction_reader::TransactionReader;
use fpgrowth::{fp_growth, FPTree, ItemSet};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Cursor;

const LABELS: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

fn arb_transactions() -> impl Strategy<Value = Vec<BTreeSet<usize>>> {
    prop::collection::vec(prop::collection::btree_set(0..LABELS.len(), 1..5), 0..24)
}

fn arb_weighted_transactions() -> impl Strategy<Value = Vec<Vec<(usize, u32)>>> {
    prop::collection::vec(
        prop::collection::btree_map(0..LABELS.len(), 1u32..5, 1..5)
            .prop_map(|items| items.into_iter().collect::<Vec<(usize, u32)>>()),
        0..16,
    )
}

/// Filters and sorts each transaction by global frequency, the way a
/// caller must before inserting into an `FPTree`.
fn build_tree(transactions: &[Vec<(&'static str, u32)>], min_count: u32) -> FPTree<&'static str> {
    let mut frequency: BTreeMap<&str, u32> = BTreeMap::new();
    for transaction in transactions {
        for &(item, count) in transaction {
            *frequency.entry(item).or_insert(0) += count;
        }
    }
    let mut tree = FPTree::new();
    for transaction in transactions {
        let mut sorted: Vec<(&'static str, u32)> = transaction
            .iter()
            .cloned()
            .filter(|(item, _)| frequency[item] >= min_count)
            .collect();
        sorted.sort_by(|a, b| compare_by_frequency(&a.0, frequency[a.0], &b.0, frequency[b.0]));
        if !sorted.is_empty() {
            tree.insert(&sorted);
        }
    }
    tree
}

fn unit_counts(transactions: &[BTreeSet<usize>]) -> Vec<Vec<(&'static str, u32)>> {
    transactions
        .iter()
        .map(|items| items.iter().map(|&i| (LABELS[i], 1)).collect())
        .collect()
}

fn mine(tree: &FPTree<&'static str>, min_count: u32) -> Vec<ItemSet<&'static str>> {
    let mut itemsets = vec![];
    fp_growth(tree, min_count, &[], &mut itemsets);
    itemsets
}

fn normalized(itemsets: &[ItemSet<&'static str>]) -> Vec<(Vec<&'static str>, u32)> {
    let mut v: Vec<(Vec<&'static str>, u32)> = itemsets
        .iter()
        .map(|itemset| {
            let mut items = itemset.items.clone();
            items.sort();
            (items, itemset.support)
        })
        .collect();
    v.sort();
    v
}

fn brute_force(transactions: &[BTreeSet<usize>], min_count: u32) -> Vec<(Vec<&'static str>, u32)> {
    let mut expected = vec![];
    for mask in 1u32..(1 << LABELS.len()) {
        let subset: Vec<usize> = (0..LABELS.len()).filter(|i| mask & (1 << i) != 0).collect();
        let support = transactions
            .iter()
            .filter(|items| subset.iter().all(|i| items.contains(i)))
            .count() as u32;
        if support >= min_count {
            expected.push((subset.iter().map(|&i| LABELS[i]).collect(), support));
        }
    }
    expected.sort();
    expected
}

proptest! {
    #[test]
    fn finds_exactly_the_frequent_itemsets(
        transactions in arb_transactions(),
        min_count in 1u32..5
    ) {
        let tree = build_tree(&unit_counts(&transactions), min_count);
        let itemsets = mine(&tree, min_count);

        prop_assert!(itemsets.iter().all(|itemset| itemset.support >= min_count));
        prop_assert_eq!(normalized(&itemsets), brute_force(&transactions, min_count));
    }

    #[test]
    fn itemsets_are_unique(transactions in arb_transactions(), min_count in 1u32..5) {
        let tree = build_tree(&unit_counts(&transactions), min_count);
        let found = normalized(&mine(&tree, min_count));
        let unique: BTreeSet<Vec<&str>> = found.iter().map(|(items, _)| items.clone()).collect();
        prop_assert_eq!(unique.len(), found.len());
    }

    #[test]
    fn support_is_monotone(transactions in arb_transactions(), min_count in 1u32..4) {
        let tree = build_tree(&unit_counts(&transactions), min_count);
        let found = normalized(&mine(&tree, min_count));
        for (smaller, smaller_support) in &found {
            for (larger, larger_support) in &found {
                let is_subset = smaller.iter().all(|item| larger.contains(item));
                if smaller.len() < larger.len() && is_subset {
                    prop_assert!(smaller_support >= larger_support);
                }
            }
        }
    }

    #[test]
    fn repeated_insert_matches_scaled_insert(
        transactions in arb_weighted_transactions(),
        times in 1u32..4
    ) {
        let transactions: Vec<Vec<(&'static str, u32)>> = transactions
            .iter()
            .map(|items| items.iter().map(|&(i, count)| (LABELS[i], count)).collect())
            .collect();

        let mut repeated = FPTree::new();
        let mut scaled = FPTree::new();
        for transaction in &transactions {
            for _ in 0..times {
                repeated.insert(transaction);
            }
            let multiplied: Vec<(&'static str, u32)> =
                transaction.iter().map(|&(item, count)| (item, count * times)).collect();
            scaled.insert(&multiplied);
        }

        prop_assert_eq!(repeated.num_nodes(), scaled.num_nodes());
        for label in LABELS.iter() {
            prop_assert_eq!(repeated.item_frequency(label), scaled.item_frequency(label));
        }
        prop_assert_eq!(mine(&repeated, 1), mine(&scaled, 1));
    }
}

#[test]
fn end_to_end() {
    // Transaction 4 holds only an infrequent item and adds nothing.
    let input = "4 4\n\
                 1 A 2\n1 B 2\n1 C 1\n\
                 2 A 1\n2 B 1\n\
                 3 B 1\n3 C 1\n\
                 4 D 1\n";
    let dataset = TransactionReader::new(Cursor::new(input))
        .read_dataset()
        .unwrap();

    let mut tree = FPTree::new();
    for transaction in dataset.frequent_transactions(2) {
        tree.insert(&transaction);
    }
    assert_eq!(tree.num_transactions(), 3);
    assert_eq!(tree.num_nodes(), 4);

    let mut itemsets = vec![];
    fp_growth(&tree, 2, &[], &mut itemsets);

    let mut output: Vec<u8> = vec![];
    write_itemsets(&mut output, &itemsets, 2, &dataset.itemizer).unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Frequent Itemsets (MinSup = 2):\n\
         {B} : 4\n\
         {A} : 3\n\
         {A, B} : 3\n\
         {C} : 2\n\
         {C, B} : 2\n"
    );
}

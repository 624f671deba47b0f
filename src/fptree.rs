// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::counter::Counter;
use fnv::FnvHashMap;
use itertools::Itertools;
use std::cmp::Ordering;
use std::hash::Hash;
use std::mem;
use tracing::trace;

/// Bounds an item label must satisfy to be stored in an `FPTree`. The
/// label's `Ord` is the tie-break when two items have equal frequency.
pub trait TreeItem: Clone + Eq + Hash + Ord {}

impl<T> TreeItem for T where T: Clone + Eq + Hash + Ord {}

#[derive(Debug)]
struct FPNode<T> {
    // None only for the root.
    item: Option<T>,
    count: u32,
    children: FnvHashMap<T, usize>,
    parent: Option<usize>,
    // Next node in the tree with the same item, in insertion order.
    next: Option<usize>,
}

impl<T: TreeItem> FPNode<T> {
    fn new(item: Option<T>, parent: Option<usize>) -> FPNode<T> {
        FPNode {
            item,
            count: 0,
            children: FnvHashMap::default(),
            parent,
            next: None,
        }
    }

    fn is_root(&self) -> bool {
        self.item.is_none()
    }
}

/// Per item bookkeeping: the item's total count in this tree, and the
/// first and last nodes of its same-item chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct HeaderEntry {
    frequency: u32,
    head: usize,
    tail: usize,
}

pub struct FPTree<T> {
    nodes: Vec<Vec<FPNode<T>>>,
    header_table: FnvHashMap<T, HeaderEntry>,
    next_node_id: usize,
    num_transactions: u32,
}

static FPTREE_SPLAY: usize = 32;
static ROOT_ID: usize = 0;

impl<T: TreeItem> Default for FPTree<T> {
    fn default() -> Self {
        FPTree::new()
    }
}

impl<T: TreeItem> FPTree<T> {
    pub fn new() -> FPTree<T> {
        let mut tree = FPTree {
            nodes: vec![],
            header_table: FnvHashMap::default(),
            next_node_id: 0,
            num_transactions: 0,
        };
        // Add root.
        tree.push_node(None, None);
        tree
    }

    /// Builds the conditional tree for one item from its conditional
    /// pattern base. Items are re-ranked by their frequency within the
    /// patterns, not by their frequency in the tree the patterns came from.
    pub fn from_conditional_patterns(patterns: &[(Vec<T>, u32)], min_count: u32) -> FPTree<T> {
        let mut local_count: Counter<T> = Counter::new();
        for (path, count) in patterns {
            for item in path {
                local_count.add(item, *count);
            }
        }

        let mut conditional_tree = FPTree::new();
        for (path, count) in patterns {
            let mut transaction: Vec<(T, u32)> = path
                .iter()
                .filter(|item| local_count.get(item) >= min_count)
                .map(|item| (item.clone(), *count))
                .collect();
            if transaction.is_empty() {
                continue;
            }
            transaction.sort_by(|a, b| {
                compare_by_frequency(&a.0, local_count.get(&a.0), &b.0, local_count.get(&b.0))
            });
            conditional_tree.insert(&transaction);
        }
        conditional_tree
    }

    fn push_node(&mut self, item: Option<T>, parent: Option<usize>) -> usize {
        let id = self.next_node_id;
        self.next_node_id += 1;
        let (cohort, element) = self.sub_indicies_of(id);
        // Should only be at most 1 element too small.
        assert!(cohort <= self.nodes.len());
        if self.nodes.len() <= cohort {
            self.nodes.push(Vec::with_capacity(FPTREE_SPLAY));
        }
        assert!(element == self.nodes[cohort].len());
        self.nodes[cohort].push(FPNode::new(item, parent));
        id
    }

    fn add_node(&mut self, parent: usize, item: &T, count: u32) -> usize {
        let id = self.push_node(Some(item.clone()), Some(parent));
        self.get_node_mut(id).count = count;
        self.get_node_mut(parent).children.insert(item.clone(), id);
        self.append_to_chain(item, id, count);
        id
    }

    fn append_to_chain(&mut self, item: &T, id: usize, count: u32) {
        let previous_tail = match self.header_table.get_mut(item) {
            Some(entry) => {
                entry.frequency += count;
                Some(mem::replace(&mut entry.tail, id))
            }
            None => {
                self.header_table.insert(
                    item.clone(),
                    HeaderEntry {
                        frequency: count,
                        head: id,
                        tail: id,
                    },
                );
                None
            }
        };
        if let Some(tail) = previous_tail {
            self.get_node_mut(tail).next = Some(id);
        }
    }

    fn sub_indicies_of(&self, id: usize) -> (usize, usize) {
        (id / FPTREE_SPLAY, id % FPTREE_SPLAY)
    }

    fn get_node_mut(&mut self, id: usize) -> &mut FPNode<T> {
        let (cohort, index) = self.sub_indicies_of(id);
        if cohort >= self.nodes.len() || index >= self.nodes[cohort].len() {
            panic!("Invalid node id")
        }
        &mut self.nodes[cohort][index]
    }

    fn get_node(&self, id: usize) -> &FPNode<T> {
        let (cohort, index) = self.sub_indicies_of(id);
        if cohort >= self.nodes.len() || index >= self.nodes[cohort].len() {
            panic!("Invalid node id")
        }
        &self.nodes[cohort][index]
    }

    fn child_of(&self, id: usize, item: &T) -> Option<usize> {
        self.get_node(id).children.get(item).cloned()
    }

    fn insert_child(&mut self, id: usize, item: &T, count: u32) -> usize {
        match self.child_of(id, item) {
            Some(child_id) => {
                self.get_node_mut(child_id).count += count;
                if let Some(entry) = self.header_table.get_mut(item) {
                    entry.frequency += count;
                }
                child_id
            }
            None => self.add_node(id, item, count),
        }
    }

    /// Inserts one transaction. The caller must already have dropped
    /// infrequent items and sorted the rest by decreasing frequency; this
    /// is not checked.
    pub fn insert(&mut self, transaction: &[(T, u32)]) {
        // Start iterating at the root node.
        let mut id = ROOT_ID;
        for (item, count) in transaction {
            id = self.insert_child(id, item, *count);
        }
        self.num_transactions += 1;
    }

    /// Node ids carrying `item`, following the same-item chain from the
    /// header table.
    fn chain(&self, item: &T) -> Chain<'_, T> {
        Chain {
            tree: self,
            next: self.header_table.get(item).map(|entry| entry.head),
        }
    }

    /// The conditional pattern base of `item`: for every node carrying it,
    /// the path from the root down to (excluding) that node, weighted by
    /// that node's count. Nodes hanging directly off the root contribute
    /// nothing.
    pub fn conditional_patterns(&self, item: &T) -> Vec<(Vec<T>, u32)> {
        self.chain(item)
            .filter_map(|node_id| {
                let path = self.path_from_root_to_excluding(node_id);
                if path.is_empty() {
                    None
                } else {
                    Some((path, self.get_node(node_id).count))
                }
            })
            .collect()
    }

    pub fn construct_conditional_tree(&self, item: &T, min_count: u32) -> FPTree<T> {
        let patterns = self.conditional_patterns(item);
        let conditional_tree = FPTree::from_conditional_patterns(&patterns, min_count);
        trace!(
            patterns = patterns.len(),
            nodes = conditional_tree.num_nodes(),
            "built conditional tree"
        );
        conditional_tree
    }

    fn path_from_root_to_excluding(&self, node_id: usize) -> Vec<T> {
        let mut path = vec![];
        let mut parent = self.get_node(node_id).parent;
        while let Some(id) = parent {
            let node = self.get_node(id);
            match node.item {
                Some(ref item) => path.push(item.clone()),
                None => break,
            }
            parent = node.parent;
        }
        path.reverse();
        path
    }

    /// Items whose frequency in this tree is at least `min_count`, most
    /// frequent first, ties broken by ascending item.
    pub fn sorted_header_table(&self, min_count: u32) -> Vec<(T, u32)> {
        self.header_table
            .iter()
            .filter(|(_, entry)| entry.frequency >= min_count)
            .map(|(item, entry)| (item.clone(), entry.frequency))
            .sorted_by(|a, b| compare_by_frequency(&a.0, a.1, &b.0, b.1))
            .collect()
    }

    pub fn item_frequency(&self, item: &T) -> u32 {
        match self.header_table.get(item) {
            Some(entry) => entry.frequency,
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.get_node(ROOT_ID).children.is_empty()
    }

    /// Number of nodes, excluding the root.
    pub fn num_nodes(&self) -> usize {
        self.next_node_id - 1
    }

    pub fn num_transactions(&self) -> u32 {
        self.num_transactions
    }
}

struct Chain<'a, T> {
    tree: &'a FPTree<T>,
    next: Option<usize>,
}

impl<'a, T: TreeItem> Iterator for Chain<'a, T> {
    type Item = usize;
    fn next(&mut self) -> Option<usize> {
        let id = self.next?;
        let node = self.tree.get_node(id);
        debug_assert!(!node.is_root());
        self.next = node.next;
        Some(id)
    }
}

/// Orders items by decreasing count, then by increasing item.
pub fn compare_by_frequency<T: Ord>(a: &T, a_count: u32, b: &T, b_count: u32) -> Ordering {
    b_count.cmp(&a_count).then_with(|| a.cmp(b))
}

#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct ItemSet<T> {
    /// Items in the order they were added while mining.
    pub items: Vec<T>,
    pub support: u32,
}

impl<T> ItemSet<T> {
    pub fn new(items: Vec<T>, support: u32) -> ItemSet<T> {
        ItemSet { items, support }
    }
}

/// Appends every itemset of `fptree` with support at least `min_count` to
/// `itemsets`, each prefixed by `path`. Pass an empty `path` for the
/// initial tree. Itemsets are appended depth first, in header table order.
pub fn fp_growth<T: TreeItem>(
    fptree: &FPTree<T>,
    min_count: u32,
    path: &[T],
    itemsets: &mut Vec<ItemSet<T>>,
) {
    for (item, count) in fptree.sorted_header_table(min_count) {
        let mut itemset: Vec<T> = Vec::with_capacity(path.len() + 1);
        itemset.extend_from_slice(path);
        itemset.push(item.clone());
        itemsets.push(ItemSet::new(itemset.clone(), count));

        let conditional_tree = fptree.construct_conditional_tree(&item, min_count);
        if !conditional_tree.is_empty() {
            fp_growth(&conditional_tree, min_count, &itemset, itemsets);
        }
    }
}

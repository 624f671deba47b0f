use crate::fptree::compare_by_frequency;
use crate::item::Item;

/// Dataset wide item counts, indexed by item id.
#[derive(Clone, Debug, Default)]
pub struct ItemCounter {
    counter: Vec<u32>,
}

impl ItemCounter {
    pub fn new() -> ItemCounter {
        ItemCounter { counter: vec![] }
    }
    pub fn add(&mut self, item: &Item, count: u32) {
        let index = item.as_index();
        if self.counter.len() <= index {
            self.counter.resize(index + 1, 0);
        }
        self.counter[index] += count;
    }
    pub fn get(&self, item: &Item) -> u32 {
        let index = item.as_index();
        if index >= self.counter.len() {
            0
        } else {
            self.counter[index]
        }
    }
    pub fn items_with_count_at_least(&self, min_count: u32) -> Vec<Item> {
        let mut v: Vec<Item> = vec![];
        for (i, &count) in self.counter.iter().enumerate() {
            if count >= min_count {
                v.push(Item::with_id(i as u32));
            }
        }
        v
    }
    /// Drops items counted fewer than `min_count` times, and sorts the rest
    /// by decreasing count, ties broken by increasing item.
    pub fn filter_and_sort(&self, transaction: &mut Vec<(Item, u32)>, min_count: u32) {
        transaction.retain(|(item, _)| self.get(item) >= min_count);
        transaction
            .sort_by(|a, b| compare_by_frequency(&a.0, self.get(&a.0), &b.0, self.get(&b.0)));
    }
}

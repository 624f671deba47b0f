use crate::item::Item;
use fnv::FnvHashMap;
use itertools::Itertools;

/// Maps item labels to `Item`s and back. Ids are assigned in ascending
/// label order, starting at 0.
pub struct Itemizer {
    item_str_to_id: FnvHashMap<String, Item>,
    item_id_to_str: Vec<String>,
}

impl Itemizer {
    pub fn from_labels<I, S>(labels: I) -> Itemizer
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let item_id_to_str: Vec<String> = labels
            .into_iter()
            .map(|label| String::from(label.as_ref()))
            .sorted()
            .dedup()
            .collect();
        let item_str_to_id = item_id_to_str
            .iter()
            .enumerate()
            .map(|(index, label)| (label.clone(), Item::with_id(index as u32)))
            .collect();
        Itemizer {
            item_str_to_id,
            item_id_to_str,
        }
    }
    pub fn id_of(&self, item: &str) -> Option<Item> {
        self.item_str_to_id.get(item).cloned()
    }
    pub fn str_of(&self, id: Item) -> &str {
        &self.item_id_to_str[id.as_index()]
    }
    pub fn len(&self) -> usize {
        self.item_id_to_str.len()
    }
    pub fn is_empty(&self) -> bool {
        self.item_id_to_str.is_empty()
    }
}

use crate::itemizer::Itemizer;

/// An interned item label. Ids come from an `Itemizer`, which hands them
/// out in label order, so comparing two `Item`s compares their labels.
#[derive(Copy, Clone, Hash, PartialOrd, PartialEq, Eq, Ord, Debug)]
pub struct Item {
    id: u32,
}

impl Item {
    pub fn with_id(id: u32) -> Item {
        Item { id }
    }
    pub fn as_index(&self) -> usize {
        self.id as usize
    }
    /// Renders `items` as labels separated by ", ", in the order given.
    pub fn item_vec_to_string(items: &[Item], itemizer: &Itemizer) -> String {
        items.iter().map(|&item| itemizer.str_of(item)).collect::<Vec<&str>>().join(", ")
    }
}

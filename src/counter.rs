use fnv::FnvHashMap;
use std::cmp;
use std::hash::Hash;

pub struct Counter<T> {
    counter: FnvHashMap<T, u32>,
}

impl<T> Counter<T>
where
    T: cmp::Eq,
    T: Hash,
    T: Clone,
{
    pub fn new() -> Counter<T> {
        Counter {
            counter: FnvHashMap::default(),
        }
    }
    pub fn add(&mut self, item: &T, count: u32) {
        if let Some(total) = self.counter.get_mut(item) {
            *total += count;
            return;
        }
        self.counter.insert(item.clone(), count);
    }
    pub fn get(&self, item: &T) -> u32 {
        match self.counter.get(item) {
            Some(count) => *count,
            None => 0,
        }
    }
}

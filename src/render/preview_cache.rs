use crate::render::image_preview::PreviewCells;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewKey {
    pub hash: u64,
    pub width: u16,
    pub height: u16,
}

/// Small LRU of rendered image previews.
#[derive(Debug, Default)]
pub struct PreviewCache {
    cap: usize,
    order: VecDeque<PreviewKey>,
    map: HashMap<PreviewKey, Arc<PreviewCells>>,
}

impl PreviewCache {
    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            order: VecDeque::new(),
            map: HashMap::new(),
        }
    }

    pub fn get(&mut self, key: PreviewKey) -> Option<Arc<PreviewCells>> {
        let val = self.map.get(&key)?.clone();
        self.touch(key);
        Some(val)
    }

    pub fn contains(&self, key: PreviewKey) -> bool {
        self.map.contains_key(&key)
    }

    pub fn put(&mut self, key: PreviewKey, val: Arc<PreviewCells>) {
        if self.map.insert(key, val).is_some() {
            self.touch(key);
            return;
        }
        self.order.push_back(key);

        while self.order.len() > self.cap {
            if let Some(old) = self.order.pop_front() {
                self.map.remove(&old);
            }
        }
    }

    fn touch(&mut self, key: PreviewKey) {
        if let Some(pos) = self.order.iter().position(|k| *k == key) {
            self.order.remove(pos);
            self.order.push_back(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(hash: u64) -> PreviewKey {
        PreviewKey { hash, width: 4, height: 2 }
    }

    fn cells() -> Arc<PreviewCells> {
        Arc::new(PreviewCells::empty())
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = PreviewCache::new(2);
        cache.put(key(1), cells());
        cache.put(key(2), cells());
        assert!(cache.get(key(1)).is_some());
        cache.put(key(3), cells());
        assert!(cache.contains(key(1)));
        assert!(!cache.contains(key(2)));
        assert!(cache.contains(key(3)));
    }

    #[test]
    fn reinsert_does_not_grow() {
        let mut cache = PreviewCache::new(2);
        cache.put(key(1), cells());
        cache.put(key(1), cells());
        cache.put(key(2), cells());
        assert!(cache.contains(key(1)) && cache.contains(key(2)));
    }
}

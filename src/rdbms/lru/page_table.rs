use super::arena::{Arena, SlotId};
use crate::storage::entity::PageId;

// page_id mod バケット数 でハッシュし, 衝突はノードのチェインでつなぐ
#[derive(Debug)]
pub struct PageTable {
    buckets: Vec<Option<SlotId>>,
}

impl PageTable {
    pub fn new(num_buckets: usize) -> Self {
        Self {
            buckets: vec![None; num_buckets],
        }
    }

    fn bucket(&self, page_id: PageId) -> usize {
        (page_id.to_u64() % self.buckets.len() as u64) as usize
    }

    pub fn lookup(&self, arena: &Arena, page_id: PageId) -> Option<SlotId> {
        let mut cursor = self.buckets[self.bucket(page_id)];
        while let Some(slot) = cursor {
            let node = &arena[slot];
            if node.block.page_id == page_id {
                return Some(slot);
            }
            cursor = node.bucket_next;
        }
        None
    }

    // バケットの先頭に挿入する
    pub fn insert(&mut self, arena: &mut Arena, slot: SlotId) {
        let bucket = self.bucket(arena[slot].block.page_id);
        arena[slot].bucket_next = self.buckets[bucket];
        self.buckets[bucket] = Some(slot);
    }

    pub fn remove(&mut self, arena: &mut Arena, slot: SlotId) -> bool {
        let bucket = self.bucket(arena[slot].block.page_id);
        let next = arena[slot].bucket_next;
        if self.buckets[bucket] == Some(slot) {
            self.buckets[bucket] = next;
            arena[slot].bucket_next = None;
            return true;
        }
        let mut cursor = self.buckets[bucket];
        while let Some(prev) = cursor {
            if arena[prev].bucket_next == Some(slot) {
                arena[prev].bucket_next = next;
                arena[slot].bucket_next = None;
                return true;
            }
            cursor = arena[prev].bucket_next;
        }
        false
    }
}

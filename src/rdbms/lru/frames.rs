use std::collections::BTreeSet;
use std::ops::{Index, IndexMut};

use crate::buffer::entity::{Frame, FrameId};
use crate::storage::entity::PageId;

// フレーム本体と, そのフレームを使っているページの対応
pub struct FrameTable {
    frames: Vec<Frame>,
    owners: Vec<Option<PageId>>,
    free: BTreeSet<FrameId>,
}

impl FrameTable {
    pub fn new(pool_size: usize, page_size: usize) -> Self {
        let mut frames = vec![];
        frames.resize_with(pool_size, || Frame::new(page_size));
        Self {
            frames,
            owners: vec![None; pool_size],
            free: (0..pool_size).map(FrameId).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    // 番号が最も小さい空きフレームを割り当てる
    pub fn occupy(&mut self, page_id: PageId) -> Option<FrameId> {
        let frame_id = *self.free.iter().next()?;
        self.free.remove(&frame_id);
        self.owners[frame_id.0] = Some(page_id);
        Some(frame_id)
    }

    pub fn release(&mut self, frame_id: FrameId) {
        self.owners[frame_id.0] = None;
        self.free.insert(frame_id);
    }

    pub fn owner(&self, frame_id: FrameId) -> Option<PageId> {
        self.owners[frame_id.0]
    }
}

impl Index<FrameId> for FrameTable {
    type Output = Frame;
    fn index(&self, index: FrameId) -> &Self::Output {
        &self.frames[index.0]
    }
}

impl IndexMut<FrameId> for FrameTable {
    fn index_mut(&mut self, index: FrameId) -> &mut Self::Output {
        &mut self.frames[index.0]
    }
}

use log::{debug, error, info, trace};

use crate::buffer::{
    config::{BufferPoolConfig, VictimPolicy},
    entity::{ControlBlock, FrameId, Stats},
    manager::*,
};
use crate::storage::{
    entity::PageId,
    manager::{self, StorageManager},
};

mod arena;
mod frames;
mod list;
mod page_table;

use self::arena::{Arena, SlotId};
use self::frames::FrameTable;
use self::list::LruList;
use self::page_table::PageTable;

// LruTail では固定中のページも追い出される. drop 時にダーティなページを書き出す
pub struct LruManager<T: StorageManager> {
    disk: T,
    policy: VictimPolicy,
    frames: FrameTable,
    arena: Arena,
    page_table: PageTable,
    lru: LruList,
    stats: Stats,
    // close 済みなら drop で書き出さない
    closed: bool,
}

impl<T: StorageManager> LruManager<T> {
    pub fn new(disk: T, pool_size: usize) -> Result<Self, Error> {
        Self::with_config(disk, BufferPoolConfig::new(pool_size))
    }

    pub fn with_config(disk: T, config: BufferPoolConfig) -> Result<Self, Error> {
        config.validate()?;
        let pool_size = config.pool_size;
        let frames = FrameTable::new(pool_size, disk.page_size());
        Ok(Self {
            disk,
            policy: config.victim_policy,
            frames,
            arena: Arena::with_capacity(pool_size),
            page_table: PageTable::new(pool_size),
            lru: LruList::default(),
            stats: Stats::default(),
            closed: false,
        })
    }

    pub fn capacity(&self) -> usize {
        self.frames.capacity()
    }

    pub fn resident_count(&self) -> usize {
        self.arena.len()
    }

    pub fn is_resident(&self, page_id: PageId) -> bool {
        self.page_table.lookup(&self.arena, page_id).is_some()
    }

    pub fn control_block(&self, page_id: PageId) -> Option<&ControlBlock> {
        let slot = self.page_table.lookup(&self.arena, page_id)?;
        Some(&self.arena[slot].block)
    }

    // 新しい順
    pub fn resident_pages(&self) -> Vec<PageId> {
        let mut pages: Vec<_> = self
            .lru
            .iter_from_tail(&self.arena)
            .map(|slot| self.arena[slot].block.page_id)
            .collect();
        pages.reverse();
        pages
    }

    // 古い順にすべて追い出してから同期する
    pub fn shutdown(&mut self) -> Result<(), Error> {
        let resident = self.resident_count();
        while let Some(victim) = self.lru.tail() {
            self.evict(victim)?;
        }
        self.disk.sync()?;
        info!(
            "buffer pool shut down, {} pages released, {} writes in total",
            resident, self.stats.writes
        );
        Ok(())
    }

    pub fn close(mut self) -> Result<(), Error> {
        self.closed = true;
        self.shutdown()
    }

    fn select_victim(&self) -> Option<SlotId> {
        match self.policy {
            VictimPolicy::LruTail => self.lru.tail(),
            VictimPolicy::SkipPinned => self
                .lru
                .iter_from_tail(&self.arena)
                .find(|&slot| self.arena[slot].block.pin_count == 0),
        }
    }

    fn evict(&mut self, slot: SlotId) -> Result<(), Error> {
        let victim = self.arena[slot].block;
        debug_assert_eq!(Some(victim.page_id), self.frames.owner(victim.frame_id));
        // ページテーブル, LRU リストの順に外す
        let removed = self.page_table.remove(&mut self.arena, slot);
        debug_assert!(removed);
        let older = self.arena[slot].older;
        self.lru.unlink(&mut self.arena, slot);
        // ダーティなら書き出す
        if victim.is_dirty {
            if let Err(err) = self
                .disk
                .write_page(victim.page_id, &self.frames[victim.frame_id])
            {
                // 書き出せなかったページは元の位置に残しておく
                self.page_table.insert(&mut self.arena, slot);
                match older {
                    Some(older) => self.lru.insert_newer_than(&mut self.arena, older, slot),
                    None => self.lru.push_back(&mut self.arena, slot),
                }
                return Err(err.into());
            }
            self.stats.writes += 1;
            debug!("wrote back page {} from frame {}", victim.page_id, victim.frame_id);
        }
        self.frames.release(victim.frame_id);
        self.arena.remove(slot);
        debug!(
            "evicted page {} (pin count {}) from frame {}",
            victim.page_id, victim.pin_count, victim.frame_id
        );
        Ok(())
    }

    // 空きフレームがなければ犠牲ページを追い出してからフレームを確保する
    fn reserve_frame(&mut self, page_id: PageId) -> Result<FrameId, Error> {
        if self.frames.free_count() == 0 {
            let victim = self.select_victim().ok_or(Error::NoFreeFrame)?;
            self.evict(victim)?;
        }
        self.frames.occupy(page_id).ok_or(Error::NoFreeFrame)
    }

    fn install(&mut self, page_id: PageId, frame_id: FrameId, is_dirty: bool) {
        let slot = self.arena.insert(ControlBlock {
            page_id,
            frame_id,
            pin_count: 1,
            is_dirty,
        });
        self.page_table.insert(&mut self.arena, slot);
        self.lru.push_front(&mut self.arena, slot);
    }

    fn ensure_on_disk(&self, page_id: PageId) -> Result<(), Error> {
        let page_count = self.disk.page_count();
        if page_id.to_u64() >= page_count {
            return Err(manager::Error::OutOfRange {
                page_id,
                page_count,
            }
            .into());
        }
        Ok(())
    }
}

impl<T: StorageManager> BufferPoolManager for LruManager<T> {
    fn fix(&mut self, page_id: PageId, is_write: bool) -> Result<FrameId, Error> {
        self.stats.requests += 1;
        if let Some(slot) = self.page_table.lookup(&self.arena, page_id) {
            self.stats.hits += 1;
            self.lru.move_to_front(&mut self.arena, slot);
            debug_assert_eq!(Some(slot), self.lru.head());
            let block = &mut self.arena[slot].block;
            block.is_dirty |= is_write;
            block.pin_count += 1;
            trace!("hit page {} in frame {}", page_id, block.frame_id);
            return Ok(block.frame_id);
        }
        // 存在しないページのために他のページを追い出さない
        self.ensure_on_disk(page_id)?;
        self.stats.reads += 1;
        let frame_id = self.reserve_frame(page_id)?;
        if let Err(err) = self.disk.read_page(page_id, &mut self.frames[frame_id]) {
            self.frames.release(frame_id);
            return Err(err.into());
        }
        self.install(page_id, frame_id, is_write);
        trace!("loaded page {} into frame {}", page_id, frame_id);
        Ok(frame_id)
    }

    fn allocate_new_page(&mut self, page_id: PageId) -> Result<FrameId, Error> {
        if self.is_resident(page_id) {
            return Err(Error::AlreadyResident { page_id });
        }
        let next = PageId(self.disk.page_count());
        if page_id != next {
            return Err(Error::NotNextPage { page_id, next });
        }
        let frame_id = self.reserve_frame(page_id)?;
        self.frames[frame_id].fill(0);
        let extended = self.disk.extend_by_one();
        debug_assert_eq!(page_id, extended);
        self.install(page_id, frame_id, true);
        debug!("allocated page {} in frame {}", page_id, frame_id);
        Ok(frame_id)
    }

    fn unfix(&mut self, page_id: PageId) -> Result<FrameId, Error> {
        let slot = self
            .page_table
            .lookup(&self.arena, page_id)
            .ok_or(Error::NotFound { page_id })?;
        let block = &mut self.arena[slot].block;
        if block.pin_count == 0 {
            return Err(Error::PinUnderflow { page_id });
        }
        block.pin_count -= 1;
        Ok(block.frame_id)
    }

    fn free_frame_count(&self) -> usize {
        self.capacity() - self.resident_count()
    }

    fn page_count(&self) -> u64 {
        self.disk.page_count()
    }

    fn stats(&self) -> Stats {
        self.stats
    }

    fn frame(&self, frame_id: FrameId) -> &[u8] {
        &self.frames[frame_id]
    }

    fn frame_mut(&mut self, frame_id: FrameId) -> &mut [u8] {
        &mut self.frames[frame_id]
    }

    fn flush(&mut self) -> Result<(), Error> {
        let dirty: Vec<SlotId> = self
            .lru
            .iter_from_tail(&self.arena)
            .filter(|&slot| self.arena[slot].block.is_dirty)
            .collect();
        for slot in dirty {
            let block = self.arena[slot].block;
            self.disk
                .write_page(block.page_id, &self.frames[block.frame_id])?;
            self.arena[slot].block.is_dirty = false;
            self.stats.writes += 1;
        }
        self.disk.sync()?;
        Ok(())
    }
}

impl<T: StorageManager> Drop for LruManager<T> {
    fn drop(&mut self) {
        if self.closed || self.resident_count() == 0 {
            return;
        }
        if let Err(err) = self.shutdown() {
            error!("failed to write back buffer pool: {}", err);
        }
    }
}

use std::io::{Read, Write};

use super::entity::{PageId, DEFAULT_PAGE_SIZE};
use super::manager::*;

pub struct MemoryManager {
    page_size: usize,
    heap: Vec<Box<[u8]>>,
}

impl MemoryManager {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            heap: vec![],
        }
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageManager for MemoryManager {
    fn page_size(&self) -> usize {
        self.page_size
    }
    fn page_count(&self) -> u64 {
        self.heap.len() as u64
    }
    fn extend_by_one(&mut self) -> PageId {
        let page_id = PageId(self.heap.len() as u64);
        self.heap.push(vec![0; self.page_size].into_boxed_slice());
        page_id
    }
    fn read_page(&mut self, page_id: PageId, data: &mut [u8]) -> Result<()> {
        self.check_access(page_id, data.len())?;
        let mut row: &[u8] = &self.heap[page_id.to_u64() as usize];
        row.read_exact(data)?;
        Ok(())
    }
    fn write_page(&mut self, page_id: PageId, data: &[u8]) -> Result<()> {
        self.check_access(page_id, data.len())?;
        let mut row: &mut [u8] = &mut self.heap[page_id.to_u64() as usize];
        row.write_all(data)?;
        Ok(())
    }
    fn sync(&mut self) -> Result<()> {
        Ok(())
    }
}

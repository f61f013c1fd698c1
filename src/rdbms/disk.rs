use std::fs::{File, OpenOptions};
use std::io::{self, prelude::*, ErrorKind, SeekFrom};
use std::path::Path;

use log::{debug, info};

use crate::storage::{
    entity::{PageId, DEFAULT_PAGE_SIZE},
    manager::*,
};

// ページ i はオフセット i * page_size にある. ヘッダはない.
// ページ数は open 時のファイル長から求めるので, 外からファイルを伸縮させるとずれる
pub struct DiskManager {
    // ヒープファイルのファイルディスクリプタ
    heap_file: File,
    page_size: usize,
    // 論理的なページ数. 次に採番するページIDでもある
    page_count: u64,
}

impl DiskManager {
    pub fn new(heap_file: File) -> Result<Self> {
        Self::with_page_size(heap_file, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(heap_file: File, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(io::Error::new(ErrorKind::InvalidInput, "page size must be positive").into());
        }
        let heap_file_size = heap_file.metadata()?.len();
        // 末尾の半端なページは数えない
        let page_count = heap_file_size / page_size as u64;
        Ok(Self {
            heap_file,
            page_size,
            page_count,
        })
    }

    pub fn open(heap_file_path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_page_size(heap_file_path, DEFAULT_PAGE_SIZE)
    }

    pub fn open_with_page_size(heap_file_path: impl AsRef<Path>, page_size: usize) -> Result<Self> {
        let heap_file_path = heap_file_path.as_ref();
        let heap_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(heap_file_path)?;
        let disk = Self::with_page_size(heap_file, page_size)?;
        info!(
            "opened {} with {} pages of {} bytes",
            heap_file_path.display(),
            disk.page_count,
            disk.page_size
        );
        Ok(disk)
    }

    pub fn close(mut self) -> Result<()> {
        self.sync()
    }

    fn offset(&self, page_id: PageId) -> u64 {
        self.page_size as u64 * page_id.to_u64()
    }
}

impl StorageManager for DiskManager {
    fn page_size(&self) -> usize {
        self.page_size
    }
    fn page_count(&self) -> u64 {
        self.page_count
    }
    fn extend_by_one(&mut self) -> PageId {
        let page_id = self.page_count;
        self.page_count += 1;
        PageId(page_id)
    }
    fn read_page(&mut self, page_id: PageId, data: &mut [u8]) -> Result<()> {
        self.check_access(page_id, data.len())?;
        // オフセットを計算
        let offset = self.offset(page_id);
        // ページ先頭へシーク
        self.heap_file.seek(SeekFrom::Start(offset))?;
        // データを読み出す. まだ書かれていない領域はゼロページとみなす
        let mut filled = 0;
        while filled < data.len() {
            match self.heap_file.read(&mut data[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        if filled < data.len() {
            debug!("short read of page {} ({} bytes), zero-filling", page_id, filled);
            data[filled..].fill(0);
        }
        Ok(())
    }
    fn write_page(&mut self, page_id: PageId, data: &[u8]) -> Result<()> {
        self.check_access(page_id, data.len())?;
        // オフセットを計算
        let offset = self.offset(page_id);
        // ページ先頭へシーク
        self.heap_file.seek(SeekFrom::Start(offset))?;
        // データを書きこむ
        self.heap_file.write_all(data)?;
        Ok(())
    }
    fn sync(&mut self) -> Result<()> {
        self.heap_file.flush()?;
        self.heap_file.sync_all()?;
        Ok(())
    }
}

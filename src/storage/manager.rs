use super::entity::PageId;

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("page {page_id} is out of range (page count: {page_count})")]
    OutOfRange { page_id: PageId, page_count: u64 },
    #[error("buffer of {actual} bytes does not match page size {expected}")]
    BufferSize { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

pub trait StorageManager {
    // 1 ページのバイト数
    fn page_size(&self) -> usize;
    // 論理的に存在するページ数
    fn page_count(&self) -> u64;
    // ページ数を 1 つ増やして新しいページIDを返す. データは書き出さない
    fn extend_by_one(&mut self) -> PageId;
    // ページのデータを読み出す
    fn read_page(&mut self, page_id: PageId, data: &mut [u8]) -> Result<()>;
    // データをページに書き出す
    fn write_page(&mut self, page_id: PageId, data: &[u8]) -> Result<()>;
    // 同期処理
    fn sync(&mut self) -> Result<()>;

    fn check_access(&self, page_id: PageId, len: usize) -> Result<()> {
        let page_count = self.page_count();
        if page_id.to_u64() >= page_count {
            return Err(Error::OutOfRange {
                page_id,
                page_count,
            });
        }
        let expected = self.page_size();
        if len != expected {
            return Err(Error::BufferSize {
                expected,
                actual: len,
            });
        }
        Ok(())
    }
}

use super::entity::{FrameId, Stats};
use crate::storage::{entity::PageId, manager};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Disk(#[from] manager::Error),
    #[error("page {page_id} is not resident in buffer pool")]
    NotFound { page_id: PageId },
    #[error("page {page_id} is not pinned")]
    PinUnderflow { page_id: PageId },
    #[error("no free buffer available in buffer pool")]
    NoFreeFrame,
    #[error("page {page_id} is already resident in buffer pool")]
    AlreadyResident { page_id: PageId },
    #[error("page {page_id} is not the next page on storage (next is {next})")]
    NotNextPage { page_id: PageId, next: PageId },
    #[error("invalid buffer pool configuration: {0}")]
    Config(String),
}

pub trait BufferPoolManager {
    // ページを固定してフレームIDを返す. is_write ならダーティになる
    fn fix(&mut self, page_id: PageId, is_write: bool) -> Result<FrameId, Error>;
    // ストレージを 1 ページ伸ばし, ゼロ埋めしたフレームに固定する.
    // page_id は現在のページ数と一致していなければならない
    fn allocate_new_page(&mut self, page_id: PageId) -> Result<FrameId, Error>;
    // 固定を 1 つ解除する
    fn unfix(&mut self, page_id: PageId) -> Result<FrameId, Error>;
    // 空きフレーム数
    fn free_frame_count(&self) -> usize;
    // ストレージ上のページ数
    fn page_count(&self) -> u64;
    fn stats(&self) -> Stats;
    // フレームの中身
    fn frame(&self, frame_id: FrameId) -> &[u8];
    fn frame_mut(&mut self, frame_id: FrameId) -> &mut [u8];
    // ダーティなページをすべてストレージに書き出す
    fn flush(&mut self) -> Result<(), Error>;

    // 次のページIDで新たにページを生成する
    fn new_page(&mut self) -> Result<(PageId, FrameId), Error> {
        let page_id = PageId(self.page_count());
        let frame_id = self.allocate_new_page(page_id)?;
        Ok((page_id, frame_id))
    }
}

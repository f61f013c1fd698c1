use anyhow::Result;
use log::info;

use pagepool::buffer::{config::BufferPoolConfig, manager::BufferPoolManager};
use pagepool::rdbms::{disk::DiskManager, lru::LruManager};
use pagepool::storage::entity::PageId;

const NUM_PAGES: u64 = 4096;
const NUM_REQUESTS: u64 = 50_000;

fn main() -> Result<()> {
    env_logger::init();

    // config
    let disk = DiskManager::open("sample-db.dbf")?;
    let mut bufmgr = LruManager::with_config(disk, BufferPoolConfig::default())?;

    // init db
    while bufmgr.page_count() < NUM_PAGES {
        let (page_id, frame_id) = bufmgr.new_page()?;
        bufmgr.frame_mut(frame_id)[..8].copy_from_slice(&page_id.to_u64().to_le_bytes());
        bufmgr.unfix(page_id)?;
    }
    info!("{} pages on disk", bufmgr.page_count());

    // 小さいページIDほど頻繁にアクセスする
    for i in 0..NUM_REQUESTS {
        let page_id = PageId((i * i) % (i % NUM_PAGES + 1));
        let is_write = i % 10 == 0;
        bufmgr.fix(page_id, is_write)?;
        bufmgr.unfix(page_id)?;
    }

    println!("{}", bufmgr.stats());
    bufmgr.close()?;
    Ok(())
}

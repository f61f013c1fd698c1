pub mod entity;
pub mod manager;

// メモリ上のページ群による storagemanager の実装
pub mod memory;

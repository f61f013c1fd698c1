// Disk を使った storagemanager の具体的な実装
pub mod disk;

// LRU を使った buffer pool による buffermanager の具体的な実装
pub mod lru;

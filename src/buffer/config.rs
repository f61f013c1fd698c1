use super::entity::DEFAULT_POOL_SIZE;
use super::manager::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VictimPolicy {
    // 固定中でも LRU の末尾を追い出す
    LruTail,
    // 固定されていない中で最も古いページ. すべて固定中なら NoFreeFrame
    SkipPinned,
}

impl Default for VictimPolicy {
    fn default() -> Self {
        VictimPolicy::LruTail
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferPoolConfig {
    // フレーム数
    pub pool_size: usize,
    pub victim_policy: VictimPolicy,
}

impl BufferPoolConfig {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool_size,
            victim_policy: VictimPolicy::default(),
        }
    }

    pub fn with_victim_policy(mut self, victim_policy: VictimPolicy) -> Self {
        self.victim_policy = victim_policy;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.pool_size == 0 {
            return Err(Error::Config("pool_size must be > 0".to_string()));
        }
        Ok(())
    }
}

impl Default for BufferPoolConfig {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE)
    }
}

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::storage::entity::PageId;

pub const DEFAULT_POOL_SIZE: usize = 1024;

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub usize);
impl FrameId {
    pub fn to_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1 ページ分のメモリ領域
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Box<[u8]>,
}

impl Frame {
    pub fn new(page_size: usize) -> Self {
        Self {
            bytes: vec![0u8; page_size].into_boxed_slice(),
        }
    }
}

impl Deref for Frame {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.bytes
    }
}

impl DerefMut for Frame {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bytes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBlock {
    pub page_id: PageId,
    pub frame_id: FrameId,
    pub pin_count: u32,
    pub is_dirty: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub requests: u64,
    pub hits: u64,
    pub reads: u64,
    pub writes: u64,
}

impl Stats {
    // リクエストがなければ NaN
    pub fn hit_rate(&self) -> f64 {
        self.hits as f64 / self.requests as f64
    }

    pub fn total_io(&self) -> u64 {
        self.reads + self.writes
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total requests: {}", self.requests)?;
        writeln!(f, "num of hits: {}", self.hits)?;
        writeln!(f, "num of read from disk: {}", self.reads)?;
        writeln!(f, "num of write to disk: {}", self.writes)?;
        writeln!(f, "total I/Os: {}", self.total_io())?;
        write!(f, "hit rate: {:.6}", self.hit_rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_test() {
        let stats = Stats::default();
        assert!(stats.hit_rate().is_nan());

        let stats = Stats {
            requests: 4,
            hits: 3,
            reads: 1,
            writes: 2,
        };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
        assert_eq!(3, stats.total_io());
    }

    #[test]
    fn display_test() {
        let stats = Stats {
            requests: 2,
            hits: 1,
            reads: 1,
            writes: 0,
        };
        let report = stats.to_string();
        assert!(report.contains("total requests: 2"));
        assert!(report.contains("total I/Os: 1"));
        assert!(report.ends_with("hit rate: 0.500000"));
    }
}

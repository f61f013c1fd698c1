pub mod buffer;
pub mod rdbms;
pub mod storage;

pub mod event;
pub mod id;
pub mod storage;
pub mod task;
pub mod timer;

mod serde_util;

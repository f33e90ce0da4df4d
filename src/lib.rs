pub mod alert;
pub mod conf;
pub mod disk;
pub mod engine;
pub mod error;
pub mod metainfo;
pub mod path;
pub mod storage_info;

mod define;
pub use define::*;

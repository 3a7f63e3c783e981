mod common;
mod kv;

pub use common::*;
pub use kv::*;

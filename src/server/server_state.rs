/*!
服务器状态有关的函数
*/

use std::sync::Arc;

use chashmap::CHashMap;
use once_cell::sync::Lazy;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::config::Config;
use crate::database;
use crate::oss;

/** `DocumentLockMap` 文档键到写锁的哈希表
*/
pub type DocumentLockMap = CHashMap<String, Arc<Mutex<()>>>;

/** `document_locks` 文档写锁池。
 文档库没有跨读写的原子性，同一文档的读改写必须拿着
 对应键的锁进行，否则并发写会互相覆盖丢失更新。
*/
#[allow(non_upper_case_globals)]
pub static document_locks: Lazy<DocumentLockMap> = Lazy::new(|| CHashMap::new());

/** `lock_document` 取得某个文档键的写锁
*/
pub async fn lock_document(key: &str) -> OwnedMutexGuard<()> {
    document_locks.upsert(key.to_string(), || Arc::new(Mutex::new(())), |_| {});
    let lock = {
        let guard = document_locks.get(key).unwrap();
        Arc::clone(&*guard)
    };
    return lock.lock_owned().await;
}

pub struct ServerState;

impl ServerState {
    pub async fn start() {
        database::connect_database().await;
        if Config::get().s3_oss.enable {
            oss::initialize_storage().await;
        }
    }
}

use crate::config::Config;

use super::redis;

/// 连接文档库，memory后端无需建立连接
pub async fn connect_database() {
    if use_redis() {
        redis::connect_database()
            .await
            .expect("Redis 数据库连接失败");
    }
}

pub(super) fn use_redis() -> bool {
    return Config::get().database.backend == "redis";
}

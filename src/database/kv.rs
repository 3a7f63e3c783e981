/*!
 仓库接口：get / set / delete / get_by_prefix。
 文档一律是序列化后的JSON字符串，模式只由上层服务约束，
 存储后端不感知内容。
*/

use super::{common, memory, redis};
use crate::config::datatype::SerializedDocument;

/// 读取一个文档
pub async fn get(key: &str) -> Result<Option<SerializedDocument>, ()> {
    if common::use_redis() {
        return redis::kv_get(key).await;
    }
    return memory::kv_get(key).await;
}

/// 写入一个文档，覆盖旧值
pub async fn set(key: &str, value: SerializedDocument) -> Result<(), ()> {
    if common::use_redis() {
        return redis::kv_set(key, value).await;
    }
    return memory::kv_set(key, value).await;
}

/// 删除一个文档
pub async fn delete(key: &str) -> Result<(), ()> {
    if common::use_redis() {
        return redis::kv_delete(key).await;
    }
    return memory::kv_delete(key).await;
}

/// 按前缀扫描，返回所有匹配文档的值，键字典序排列
pub async fn get_by_prefix(prefix: &str) -> Result<Vec<SerializedDocument>, ()> {
    if common::use_redis() {
        return redis::kv_get_by_prefix(prefix).await;
    }
    return memory::kv_get_by_prefix(prefix).await;
}

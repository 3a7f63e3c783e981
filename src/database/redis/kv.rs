use std::fmt::Write;
use std::ops::DerefMut;

use log::error;
use mobc_redis::redis;
use mobc_redis::redis::AsyncCommands;
use smartstring::alias::String as KeyString;

use super::common::get_con;
use crate::config::datatype::SerializedDocument;

pub async fn kv_get(key: &str) -> Result<Option<SerializedDocument>, ()> {
    let mut con = get_con().await?;
    return con
        .get::<_, Option<SerializedDocument>>(key)
        .await
        .map_err(|err| {
            error!("Redis GET {} 失败: {}", key, err);
        });
}

pub async fn kv_set(key: &str, value: SerializedDocument) -> Result<(), ()> {
    let mut con = get_con().await?;
    return con.set::<_, _, ()>(key, value).await.map_err(|err| {
        error!("Redis SET {} 失败: {}", key, err);
    });
}

pub async fn kv_delete(key: &str) -> Result<(), ()> {
    let mut con = get_con().await?;
    return con.del::<_, ()>(key).await.map_err(|err| {
        error!("Redis DEL {} 失败: {}", key, err);
    });
}

pub async fn kv_get_by_prefix(prefix: &str) -> Result<Vec<SerializedDocument>, ()> {
    let mut con = get_con().await?;

    let mut pattern: KeyString = KeyString::new();
    write!(pattern, "{}*", prefix).ok();

    let mut keys: Vec<String> = con
        .keys::<_, Vec<String>>(pattern.as_str())
        .await
        .map_err(|err| {
            error!("Redis KEYS {} 失败: {}", prefix, err);
        })?;

    if keys.is_empty() {
        return Ok(Vec::new());
    }
    keys.sort();

    let values: Vec<Option<SerializedDocument>> = redis::cmd("MGET")
        .arg(&keys)
        .query_async(con.deref_mut())
        .await
        .map_err(|err| {
            error!("Redis MGET 失败: {}", err);
        })?;

    return Ok(values.into_iter().flatten().collect());
}

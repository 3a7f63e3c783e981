/*!
 内存文档库后端，测试时替代Redis使用。
*/

use std::collections::BTreeMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::config::datatype::SerializedDocument;

// 有序映射使前缀扫描即区间扫描
#[allow(non_upper_case_globals)]
static store: Lazy<Mutex<BTreeMap<String, SerializedDocument>>> =
    Lazy::new(|| Mutex::new(BTreeMap::new()));

pub async fn kv_get(key: &str) -> Result<Option<SerializedDocument>, ()> {
    return Ok(store.lock().unwrap().get(key).cloned());
}

pub async fn kv_set(key: &str, value: SerializedDocument) -> Result<(), ()> {
    store.lock().unwrap().insert(key.to_string(), value);
    return Ok(());
}

pub async fn kv_delete(key: &str) -> Result<(), ()> {
    store.lock().unwrap().remove(key);
    return Ok(());
}

pub async fn kv_get_by_prefix(prefix: &str) -> Result<Vec<SerializedDocument>, ()> {
    let guard = store.lock().unwrap();
    let values = guard
        .range(prefix.to_string()..)
        .take_while(|(key, _)| key.starts_with(prefix))
        .map(|(_, value)| value.clone())
        .collect();
    return Ok(values);
}

/// 清空全部文档，测试runner收尾时调用
pub fn clear() {
    store.lock().unwrap().clear();
}

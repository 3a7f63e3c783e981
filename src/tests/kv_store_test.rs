use crate::database::kv;

pub async fn test_for_set_and_get() -> Result<(), ()> {
    kv::set("kvtest:a", "1".to_string()).await?;
    match kv::get("kvtest:a").await? {
        Some(value) if value == "1" => Ok(()),
        _ => panic!("set_and_get"),
    }
}

pub async fn test_for_get_absent() -> Result<(), ()> {
    match kv::get("kvtest:absent").await? {
        None => Ok(()),
        Some(_) => panic!("get_absent"),
    }
}

pub async fn test_for_overwrite() -> Result<(), ()> {
    kv::set("kvtest:b", "old".to_string()).await?;
    kv::set("kvtest:b", "new".to_string()).await?;
    match kv::get("kvtest:b").await? {
        Some(value) if value == "new" => Ok(()),
        _ => panic!("overwrite"),
    }
}

pub async fn test_for_delete() -> Result<(), ()> {
    kv::set("kvtest:c", "1".to_string()).await?;
    kv::delete("kvtest:c").await?;
    match kv::get("kvtest:c").await? {
        None => Ok(()),
        Some(_) => panic!("delete"),
    }
}

pub async fn test_for_get_by_prefix() -> Result<(), ()> {
    kv::set("kvscan:2", "two".to_string()).await?;
    kv::set("kvscan:1", "one".to_string()).await?;
    kv::set("kvscan:3", "three".to_string()).await?;
    kv::set("kvother:1", "other".to_string()).await?;

    let values = kv::get_by_prefix("kvscan:").await?;
    if values != vec!["one".to_string(), "two".to_string(), "three".to_string()] {
        panic!("get_by_prefix: {:?}", values);
    }

    // 前缀必须整段匹配,"kvscan"不能扫到"kvother"
    let empty = kv::get_by_prefix("kvscan:9").await?;
    if !empty.is_empty() {
        panic!("get_by_prefix_empty");
    }
    return Ok(());
}

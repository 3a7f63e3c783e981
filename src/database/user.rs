use crate::config::datatype::UserId;
use crate::user::UserProfile;

use super::{index, kv};

/// 读出用户资料
pub async fn get_user_profile(user_id: &str) -> Result<Option<UserProfile>, ()> {
    return match kv::get(index::user_profile_key(user_id).as_str()).await? {
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|_| ()),
        None => Ok(None),
    };
}

/// 写回用户资料
pub async fn put_user_profile(profile: &UserProfile) -> Result<(), ()> {
    let raw = serde_json::to_string(profile).map_err(|_| ())?;
    return kv::set(index::user_profile_key(&profile.id).as_str(), raw).await;
}

/// 扫描全部用户资料
pub async fn scan_user_profiles() -> Result<Vec<UserProfile>, ()> {
    let raws = kv::get_by_prefix(index::USER_PREFIX).await?;
    let mut profiles = Vec::with_capacity(raws.len());
    for raw in raws {
        profiles.push(serde_json::from_str(&raw).map_err(|_| ())?);
    }
    return Ok(profiles);
}

/// 读出用户的关注列表，尚无记录时为空表
pub async fn get_subscriptions(user_id: &str) -> Result<Vec<UserId>, ()> {
    return match kv::get(index::subscriptions_key(user_id).as_str()).await? {
        Some(raw) => serde_json::from_str(&raw).map_err(|_| ()),
        None => Ok(Vec::new()),
    };
}

/// 写回用户的关注列表
pub async fn put_subscriptions(user_id: &str, subscriptions: &[UserId]) -> Result<(), ()> {
    let raw = serde_json::to_string(subscriptions).map_err(|_| ())?;
    return kv::set(index::subscriptions_key(user_id).as_str(), raw).await;
}

/// 扫描全部关注列表
pub async fn scan_subscriptions() -> Result<Vec<Vec<UserId>>, ()> {
    let raws = kv::get_by_prefix(index::SUBSCRIPTIONS_PREFIX).await?;
    let mut lists = Vec::with_capacity(raws.len());
    for raw in raws {
        lists.push(serde_json::from_str(&raw).map_err(|_| ())?);
    }
    return Ok(lists);
}

use crate::chat::{ChatMessage, Streak};

use super::{index, kv};

/// 读出一个聊天的全部消息，尚无记录时为空表
pub async fn get_chat_messages(chat_id: &str) -> Result<Vec<ChatMessage>, ()> {
    return match kv::get(index::chat_messages_key(chat_id).as_str()).await? {
        Some(raw) => serde_json::from_str(&raw).map_err(|_| ()),
        None => Ok(Vec::new()),
    };
}

/// 整体写回一个聊天的消息列表
pub async fn put_chat_messages(chat_id: &str, messages: &[ChatMessage]) -> Result<(), ()> {
    let raw = serde_json::to_string(messages).map_err(|_| ())?;
    return kv::set(index::chat_messages_key(chat_id).as_str(), raw).await;
}

/// 读出一个聊天的streak记录
pub async fn get_streak(chat_id: &str) -> Result<Option<Streak>, ()> {
    return match kv::get(index::streak_key(chat_id).as_str()).await? {
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|_| ()),
        None => Ok(None),
    };
}

/// 写回一个聊天的streak记录
pub async fn put_streak(chat_id: &str, streak: &Streak) -> Result<(), ()> {
    let raw = serde_json::to_string(streak).map_err(|_| ())?;
    return kv::set(index::streak_key(chat_id).as_str(), raw).await;
}

/// 扫描全部聊天的消息列表
pub async fn scan_chat_message_logs() -> Result<Vec<Vec<ChatMessage>>, ()> {
    let raws = kv::get_by_prefix(index::CHAT_MESSAGES_PREFIX).await?;
    let mut logs = Vec::with_capacity(raws.len());
    for raw in raws {
        logs.push(serde_json::from_str(&raw).map_err(|_| ())?);
    }
    return Ok(logs);
}

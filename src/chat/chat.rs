use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    config::{
        datatype::{ChatId, UserId},
        Config,
    },
    database::{self, index},
    server::{error::ApiError, server_state},
    user::UserProfile,
};

use super::{today_utc, ChatMessage, Streak};

/** `ChatSummary` 聊天列表中一项的视图，读取时计算，不落库
*/
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub chat_id: ChatId,
    pub other_user: Option<UserProfile>,
    pub last_message: ChatMessage,
    pub streak: Streak,
    pub messages_count: usize,
}

/** `derive_chat_id` 把无序的用户对映射到确定的聊天ID：
 两个ID字典序排序后用':'连接，与参数顺序无关。
 自聊不在此处拦截，调用方负责拒绝。
*/
pub fn derive_chat_id(user_a: &str, user_b: &str) -> ChatId {
    if user_a <= user_b {
        return format!("{}:{}", user_a, user_b);
    }
    return format!("{}:{}", user_b, user_a);
}

/** `other_participant` 聊天ID中去掉自己后剩下的一方
*/
pub fn other_participant(chat_id: &str, user_id: &str) -> Option<UserId> {
    return chat_id
        .split(':')
        .find(|part| *part != user_id)
        .map(|part| part.to_string());
}

/** `send_message` 发送一条私聊消息并推进streak。
 消息追加与streak更新都是读改写，持同一个聊天的锁串行化，
 并发发送不会互相覆盖。
*/
pub async fn send_message(
    sender_id: &UserId,
    recipient_id: &UserId,
    text: &str,
) -> Result<ChatMessage, ApiError> {
    if sender_id == recipient_id {
        return Err(ApiError::Validation("Cannot message yourself".to_string()));
    }
    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::Validation(
            "Message text cannot be empty".to_string(),
        ));
    }
    if text.len() > Config::get().safety.max_msg_length as usize {
        return Err(ApiError::Validation("Message text too long".to_string()));
    }

    let chat_id = derive_chat_id(sender_id, recipient_id);

    let _guard = server_state::lock_document(index::chat_messages_key(&chat_id).as_str()).await;

    let message = ChatMessage {
        id: Uuid::new_v4().to_string(),
        chat_id: chat_id.clone(),
        sender_id: sender_id.clone(),
        recipient_id: recipient_id.clone(),
        text: text.to_string(),
        created_at: Utc::now(),
    };

    let mut messages = database::get_chat_messages(&chat_id)
        .await
        .map_err(|_| ApiError::Internal)?;
    messages.push(message.clone());
    database::put_chat_messages(&chat_id, &messages)
        .await
        .map_err(|_| ApiError::Internal)?;

    update_streak(&chat_id, sender_id, recipient_id)
        .await
        .map_err(|_| ApiError::Internal)?;

    return Ok(message);
}

/// 消息落库后推进聊天的streak；当天已记录时不产生写入
async fn update_streak(
    chat_id: &str,
    sender_id: &UserId,
    recipient_id: &UserId,
) -> Result<(), ()> {
    let streak = match database::get_streak(chat_id).await? {
        Some(streak) => streak,
        None => Streak::never((sender_id.clone(), recipient_id.clone())),
    };

    let next = streak.advance(today_utc());
    if next == streak {
        return Ok(());
    }
    return database::put_streak(chat_id, &next).await;
}

/** `get_messages` 全量拉取与某个用户的聊天记录与当前streak
*/
pub async fn get_messages(
    requester_id: &UserId,
    other_user_id: &UserId,
) -> Result<(Vec<ChatMessage>, Streak), ApiError> {
    let chat_id = derive_chat_id(requester_id, other_user_id);

    let messages = database::get_chat_messages(&chat_id)
        .await
        .map_err(|_| ApiError::Internal)?;
    let streak = match database::get_streak(&chat_id)
        .await
        .map_err(|_| ApiError::Internal)?
    {
        Some(streak) => streak,
        None => Streak::never((requester_id.clone(), other_user_id.clone())),
    };

    return Ok((messages, streak));
}

/** `get_chat_list` 请求者参与的全部聊天摘要，
 按最后一条消息时间倒序排列
*/
pub async fn get_chat_list(requester_id: &UserId) -> Result<Vec<ChatSummary>, ApiError> {
    let logs = database::scan_chat_message_logs()
        .await
        .map_err(|_| ApiError::Internal)?;

    let mut chats = Vec::new();
    for messages in logs {
        let last_message = match messages.last() {
            Some(message) => message.clone(),
            None => continue,
        };
        let chat_id = last_message.chat_id.clone();

        // 聊天ID形如"a:b"，按参与者精确匹配而不是子串
        if !chat_id.split(':').any(|part| part == requester_id) {
            continue;
        }

        let other_user_id = other_participant(&chat_id, requester_id);
        let other_user = match &other_user_id {
            Some(id) => database::get_user_profile(id)
                .await
                .map_err(|_| ApiError::Internal)?,
            None => None,
        };

        let streak = match database::get_streak(&chat_id)
            .await
            .map_err(|_| ApiError::Internal)?
        {
            Some(streak) => streak,
            None => Streak::never((requester_id.clone(), other_user_id.unwrap_or_default())),
        };

        chats.push(ChatSummary {
            chat_id,
            other_user,
            last_message,
            streak,
            messages_count: messages.len(),
        });
    }

    chats.sort_by(|a, b| b.last_message.created_at.cmp(&a.last_message.created_at));

    return Ok(chats);
}

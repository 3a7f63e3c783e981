use chrono::{Duration, Utc};

use crate::chat::{self, today_utc};
use crate::database;
use crate::server::error::ApiError;
use crate::user::UserProfile;

fn profile(user_id: &str, username: &str) -> UserProfile {
    return UserProfile {
        id: user_id.to_string(),
        email: format!("{}@example.com", username),
        username: username.to_string(),
        display_name: username.to_string(),
        bio: String::new(),
        avatar: String::new(),
        is_verified: false,
        is_admin: false,
        created_at: Utc::now(),
    };
}

pub async fn test_for_send_first_message() -> Result<(), ()> {
    let message = chat::send_message(&"chat_a".to_string(), &"chat_b".to_string(), "hello")
        .await
        .map_err(|_| ())?;

    if message.chat_id != "chat_a:chat_b" || message.text != "hello" {
        panic!("send_first_message");
    }

    let streak = database::get_streak("chat_a:chat_b").await?.unwrap();
    if streak.count != 1 || streak.last_date != Some(today_utc()) {
        panic!("send_first_message_streak");
    }
    return Ok(());
}

pub async fn test_for_same_day_second_message() -> Result<(), ()> {
    chat::send_message(&"chat_b".to_string(), &"chat_a".to_string(), "hi back")
        .await
        .map_err(|_| ())?;

    let messages = database::get_chat_messages("chat_a:chat_b").await?;
    if messages.len() != 2 || messages[0].text != "hello" || messages[1].text != "hi back" {
        panic!("same_day_second_message_order");
    }

    // 同一天的第二条消息不改变streak
    let streak = database::get_streak("chat_a:chat_b").await?.unwrap();
    if streak.count != 1 {
        panic!("same_day_second_message_streak");
    }
    return Ok(());
}

pub async fn test_for_consecutive_day_streak() -> Result<(), ()> {
    // 把记录改成昨天,下一条消息应把streak推到2
    let chat_id = chat::derive_chat_id("chat_a", "chat_b");
    let mut streak = database::get_streak(&chat_id).await?.unwrap();
    streak.last_date = Some(today_utc() - Duration::days(1));
    database::put_streak(&chat_id, &streak).await?;

    chat::send_message(&"chat_a".to_string(), &"chat_b".to_string(), "next day")
        .await
        .map_err(|_| ())?;

    let streak = database::get_streak(&chat_id).await?.unwrap();
    if streak.count != 2 || streak.last_date != Some(today_utc()) {
        panic!("consecutive_day_streak");
    }
    return Ok(());
}

pub async fn test_for_gap_resets_streak() -> Result<(), ()> {
    let chat_id = chat::derive_chat_id("chat_a", "chat_b");
    let mut streak = database::get_streak(&chat_id).await?.unwrap();
    streak.count = 9;
    streak.last_date = Some(today_utc() - Duration::days(3));
    database::put_streak(&chat_id, &streak).await?;

    chat::send_message(&"chat_a".to_string(), &"chat_b".to_string(), "long time")
        .await
        .map_err(|_| ())?;

    let streak = database::get_streak(&chat_id).await?.unwrap();
    if streak.count != 1 || streak.last_date != Some(today_utc()) {
        panic!("gap_resets_streak");
    }
    return Ok(());
}

pub async fn test_for_self_message_rejected() -> Result<(), ()> {
    match chat::send_message(&"chat_a".to_string(), &"chat_a".to_string(), "hi").await {
        Err(ApiError::Validation(_)) => {}
        _ => panic!("self_message_rejected"),
    }

    // 拒绝后不能留下任何消息或streak记录
    let messages = database::get_chat_messages("chat_a:chat_a").await?;
    let streak = database::get_streak("chat_a:chat_a").await?;
    if !messages.is_empty() || streak.is_some() {
        panic!("self_message_no_mutation");
    }
    return Ok(());
}

pub async fn test_for_empty_text_rejected() -> Result<(), ()> {
    let before = database::get_chat_messages("chat_a:chat_b").await?.len();

    match chat::send_message(&"chat_a".to_string(), &"chat_b".to_string(), "   ").await {
        Err(ApiError::Validation(_)) => {}
        _ => panic!("empty_text_rejected"),
    }

    let after = database::get_chat_messages("chat_a:chat_b").await?.len();
    if before != after {
        panic!("empty_text_no_mutation");
    }
    return Ok(());
}

pub async fn test_for_concurrent_sends_keep_both() -> Result<(), ()> {
    let task_one = tokio::spawn(async {
        chat::send_message(&"race_a".to_string(), &"race_b".to_string(), "one").await
    });
    let task_two = tokio::spawn(async {
        chat::send_message(&"race_b".to_string(), &"race_a".to_string(), "two").await
    });

    task_one.await.map_err(|_| ())?.map_err(|_| ())?;
    task_two.await.map_err(|_| ())?.map_err(|_| ())?;

    // 读改写按聊天串行化,并发发送不能互相覆盖
    let messages = database::get_chat_messages("race_a:race_b").await?;
    if messages.len() != 2 {
        panic!("concurrent_sends_keep_both: {}", messages.len());
    }

    let streak = database::get_streak("race_a:race_b").await?.unwrap();
    if streak.count != 1 {
        panic!("concurrent_sends_streak");
    }
    return Ok(());
}

pub async fn test_for_get_messages() -> Result<(), ()> {
    let (messages, streak) =
        chat::get_messages(&"chat_a".to_string(), &"chat_b".to_string())
            .await
            .map_err(|_| ())?;

    if messages.is_empty() || streak.count == 0 {
        panic!("get_messages");
    }
    for pair in messages.windows(2) {
        if pair[0].created_at > pair[1].created_at {
            panic!("get_messages_order");
        }
    }

    // 没有历史的聊天返回空表与零streak
    let (messages, streak) =
        chat::get_messages(&"chat_a".to_string(), &"chat_nobody".to_string())
            .await
            .map_err(|_| ())?;
    if !messages.is_empty() || streak.count != 0 || streak.last_date.is_some() {
        panic!("get_messages_empty");
    }
    return Ok(());
}

pub async fn test_for_chat_list() -> Result<(), ()> {
    database::put_user_profile(&profile("list_b", "listb")).await?;
    database::put_user_profile(&profile("list_c", "listc")).await?;

    chat::send_message(&"list_a".to_string(), &"list_b".to_string(), "first chat")
        .await
        .map_err(|_| ())?;
    chat::send_message(&"list_a".to_string(), &"list_c".to_string(), "second chat")
        .await
        .map_err(|_| ())?;

    let chats = chat::get_chat_list(&"list_a".to_string())
        .await
        .map_err(|_| ())?;

    if chats.len() != 2 {
        panic!("chat_list_len: {}", chats.len());
    }
    // 最近活跃的聊天排在前面
    if chats[0].chat_id != "list_a:list_c" || chats[1].chat_id != "list_a:list_b" {
        panic!("chat_list_order");
    }
    if chats[0].messages_count != 1 || chats[0].streak.count != 1 {
        panic!("chat_list_summary");
    }
    match &chats[0].other_user {
        Some(other) if other.username == "listc" => {}
        _ => panic!("chat_list_other_user"),
    }

    // 旁观者看不到别人的聊天
    let unrelated = chat::get_chat_list(&"list_z".to_string())
        .await
        .map_err(|_| ())?;
    if !unrelated.is_empty() {
        panic!("chat_list_unrelated");
    }
    return Ok(());
}

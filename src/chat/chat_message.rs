use serde::{Deserialize, Serialize};

use crate::config::datatype::{ChatId, MessageId, Timestamp, UserId};

/** `ChatMessage` 私聊消息数据类型。创建后不再变更，也不会删除。
*/
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub text: String,
    pub created_at: Timestamp,
}

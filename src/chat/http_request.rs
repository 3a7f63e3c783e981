/*!
 私聊与streak的HTTP接口
*/

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    auth::authenticate,
    chat::{self, ChatMessage, ChatSummary, Streak},
    config::datatype::UserId,
    server::error::ApiError,
};

/** `SendMessageData` 发送消息所用的数据类型
*/
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageData {
    pub recipient_id: UserId,
    pub text: String,
}

#[derive(Serialize, Debug)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message: ChatMessage,
}

/** `send_message` 发送私聊消息
*/
#[post("/message")]
pub async fn send_message(
    json: web::Json<SendMessageData>,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&request).await?;
    let message = chat::send_message(&user.id, &json.recipient_id, &json.text).await?;
    return Ok(HttpResponse::Ok().json(SendMessageResponse {
        success: true,
        message,
    }));
}

#[derive(Serialize, Debug)]
pub struct GetMessagesResponse {
    pub messages: Vec<ChatMessage>,
    pub streak: Streak,
}

/** `get_messages` 拉取与某个用户的全部消息与streak
*/
#[get("/messages/{user_id}")]
pub async fn get_messages(
    path: web::Path<UserId>,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&request).await?;
    let other_user_id = path.into_inner();
    let (messages, streak) = chat::get_messages(&user.id, &other_user_id).await?;
    return Ok(HttpResponse::Ok().json(GetMessagesResponse { messages, streak }));
}

#[derive(Serialize, Debug)]
pub struct GetChatsResponse {
    pub chats: Vec<ChatSummary>,
}

/** `get_chats` 请求者的聊天列表
*/
#[get("/chats")]
pub async fn get_chats(request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&request).await?;
    let chats = chat::get_chat_list(&user.id).await?;
    return Ok(HttpResponse::Ok().json(GetChatsResponse { chats }));
}

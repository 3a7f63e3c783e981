/*!
 * 私聊与streak逻辑的封装。
*/

pub mod http_request;

mod chat;
mod chat_message;
mod streak;

pub use chat::*;
pub use chat_message::*;
pub use streak::*;

/*! 数据类型定义 */
use chrono::{DateTime, NaiveDate, Utc};

// User
/** `UserId` 用户ID，由身份服务分配的稳定标识
*/
pub type UserId = String;

// Chat
/** `ChatId` 聊天ID，由两个用户ID排序拼接派生
*/
pub type ChatId = String;

/** `MessageId` 消息ID
*/
pub type MessageId = String;

// Video
/** `VideoId` 视频ID
*/
pub type VideoId = String;

/** `CommentId` 评论ID
*/
pub type CommentId = String;

/** `Timestamp` 时间戳，序列化为 ISO 8601 字符串
*/
pub type Timestamp = DateTime<Utc>;

/** `DayStamp` 日历日，序列化为 YYYY-MM-DD
*/
pub type DayStamp = NaiveDate;

/** `SerializedDocument` 文档库中序列化的JSON文档
*/
pub type SerializedDocument = String;

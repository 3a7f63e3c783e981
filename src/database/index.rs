/*!
 文档键的构造，所有键型集中在此，前缀约定为实体名加冒号。
*/

use smartstring::alias::String;
use std::fmt::Write;

pub const USER_PREFIX: &str = "user:";

pub const VIDEO_PREFIX: &str = "video:";

pub const USER_VIDEOS_PREFIX: &str = "user-videos:";

pub const LIKES_PREFIX: &str = "likes:";

pub const COMMENTS_PREFIX: &str = "comments:";

pub const SUBSCRIPTIONS_PREFIX: &str = "subscriptions:";

pub const ANALYTICS_PREFIX: &str = "analytics:";

pub const CHAT_MESSAGES_PREFIX: &str = "messages:";

pub const STREAK_PREFIX: &str = "streak:";

pub fn user_profile_key(user_id: &str) -> String {
    let mut str: String = String::new();
    write!(str, "{}{}", USER_PREFIX, user_id).ok();
    return str;
}

pub fn video_key(video_id: &str) -> String {
    let mut str: String = String::new();
    write!(str, "{}{}", VIDEO_PREFIX, video_id).ok();
    return str;
}

pub fn user_videos_key(user_id: &str) -> String {
    let mut str: String = String::new();
    write!(str, "{}{}", USER_VIDEOS_PREFIX, user_id).ok();
    return str;
}

pub fn likes_key(video_id: &str) -> String {
    let mut str: String = String::new();
    write!(str, "{}{}", LIKES_PREFIX, video_id).ok();
    return str;
}

pub fn comments_key(video_id: &str) -> String {
    let mut str: String = String::new();
    write!(str, "{}{}", COMMENTS_PREFIX, video_id).ok();
    return str;
}

pub fn subscriptions_key(user_id: &str) -> String {
    let mut str: String = String::new();
    write!(str, "{}{}", SUBSCRIPTIONS_PREFIX, user_id).ok();
    return str;
}

pub fn analytics_key(video_id: &str) -> String {
    let mut str: String = String::new();
    write!(str, "{}{}", ANALYTICS_PREFIX, video_id).ok();
    return str;
}

pub fn chat_messages_key(chat_id: &str) -> String {
    let mut str: String = String::new();
    write!(str, "{}{}", CHAT_MESSAGES_PREFIX, chat_id).ok();
    return str;
}

pub fn streak_key(chat_id: &str) -> String {
    let mut str: String = String::new();
    write!(str, "{}{}", STREAK_PREFIX, chat_id).ok();
    return str;
}

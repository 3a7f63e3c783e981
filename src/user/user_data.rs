use serde::{Deserialize, Serialize};

use crate::config::datatype::{Timestamp, UserId};

/** `UserProfile` 用户资料的数据类型
*/
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub avatar: String,
    pub is_verified: bool,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

/** `ProfileUpdateData` 客户端可写的资料字段，缺省的字段保持不变。
 id、email与标记位不开放给客户端。
*/
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateData {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

/** `UserProfileView` 带统计数字的用户资料视图，读取时计算
*/
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileView {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub videos_count: usize,
    pub followers_count: usize,
    pub following_count: usize,
}

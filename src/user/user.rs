use chrono::Utc;
use log::info;

use crate::{
    auth::AuthUser,
    config::{datatype::UserId, Config, USERNAME_PATTERN},
    database::{self, index},
    server::{error::ApiError, server_state},
    video::VideoInfo,
};

use super::{ProfileUpdateData, UserProfile, UserProfileView};

/** `check_username` 用户名格式与长度检查
*/
pub fn check_username(username: &str) -> Result<(), ApiError> {
    if username.len() > Config::get().user.max_user_name_length as usize
        || !USERNAME_PATTERN.is_match(username)
    {
        return Err(ApiError::Validation("Invalid username".to_string()));
    }
    return Ok(());
}

/** `check_display_name` 显示名长度检查
*/
pub fn check_display_name(display_name: &str) -> Result<(), ApiError> {
    if display_name.len() > Config::get().user.max_display_name_length as usize {
        return Err(ApiError::Validation("Display name too long".to_string()));
    }
    return Ok(());
}

/** `register_profile` 注册后写入用户资料。
 系统中第一个注册的用户自动获得认证与管理员标记。
*/
pub async fn register_profile(
    auth_user: &AuthUser,
    username: &str,
    display_name: &str,
) -> Result<(UserProfile, bool), ApiError> {
    let existing = database::scan_user_profiles()
        .await
        .map_err(|_| ApiError::Internal)?;
    let is_first_user = existing.is_empty();

    let profile = UserProfile {
        id: auth_user.id.clone(),
        email: auth_user.email.clone(),
        username: username.to_string(),
        display_name: display_name.to_string(),
        bio: String::new(),
        avatar: String::new(),
        is_verified: is_first_user,
        is_admin: is_first_user,
        created_at: Utc::now(),
    };
    database::put_user_profile(&profile)
        .await
        .map_err(|_| ApiError::Internal)?;

    info!("用户注册完成: {}, 首个用户: {}", profile.email, is_first_user);

    return Ok((profile, is_first_user));
}

/** `get_profile` 读取用户资料，不存在时报NotFound
*/
pub async fn get_profile(user_id: &str) -> Result<UserProfile, ApiError> {
    return match database::get_user_profile(user_id)
        .await
        .map_err(|_| ApiError::Internal)?
    {
        Some(profile) => Ok(profile),
        None => Err(ApiError::NotFound("User not found")),
    };
}

/** `get_profile_view` 用户资料加统计数字与作品列表
*/
pub async fn get_profile_view(
    user_id: &str,
) -> Result<(UserProfileView, Vec<VideoInfo>), ApiError> {
    let profile = get_profile(user_id).await?;

    let video_ids = database::get_user_videos(user_id)
        .await
        .map_err(|_| ApiError::Internal)?;
    let mut videos = Vec::with_capacity(video_ids.len());
    for video_id in &video_ids {
        if let Some(video) = database::get_video(video_id)
            .await
            .map_err(|_| ApiError::Internal)?
        {
            videos.push(video);
        }
    }

    // 粉丝数没有反向索引，只能全量扫描关注列表得出
    let all_subscriptions = database::scan_subscriptions()
        .await
        .map_err(|_| ApiError::Internal)?;
    let followers_count = all_subscriptions
        .iter()
        .filter(|list| list.iter().any(|id| id == user_id))
        .count();
    let following_count = database::get_subscriptions(user_id)
        .await
        .map_err(|_| ApiError::Internal)?
        .len();

    let view = UserProfileView {
        videos_count: videos.len(),
        followers_count,
        following_count,
        profile,
    };

    return Ok((view, videos));
}

/** `update_profile` 合并客户端提交的资料变更
*/
pub async fn update_profile(
    user_id: &UserId,
    data: &ProfileUpdateData,
) -> Result<UserProfile, ApiError> {
    if let Some(username) = &data.username {
        check_username(username)?;
    }
    if let Some(display_name) = &data.display_name {
        check_display_name(display_name)?;
    }
    if let Some(bio) = &data.bio {
        if bio.len() > Config::get().safety.max_bio_length as usize {
            return Err(ApiError::Validation("Bio too long".to_string()));
        }
    }

    let _guard = server_state::lock_document(index::user_profile_key(user_id).as_str()).await;

    let mut profile = get_profile(user_id).await?;
    if let Some(username) = &data.username {
        profile.username = username.clone();
    }
    if let Some(display_name) = &data.display_name {
        profile.display_name = display_name.clone();
    }
    if let Some(bio) = &data.bio {
        profile.bio = bio.clone();
    }
    if let Some(avatar) = &data.avatar {
        profile.avatar = avatar.clone();
    }
    database::put_user_profile(&profile)
        .await
        .map_err(|_| ApiError::Internal)?;

    return Ok(profile);
}

/** `toggle_subscription` 关注或取关，返回操作后是否处于关注状态
*/
pub async fn toggle_subscription(
    user_id: &UserId,
    target_user_id: &UserId,
) -> Result<bool, ApiError> {
    if user_id == target_user_id {
        return Err(ApiError::Validation(
            "Cannot subscribe to yourself".to_string(),
        ));
    }

    let _guard = server_state::lock_document(index::subscriptions_key(user_id).as_str()).await;

    let mut subscriptions = database::get_subscriptions(user_id)
        .await
        .map_err(|_| ApiError::Internal)?;
    let already_subscribed = subscriptions.iter().any(|id| id == target_user_id);
    if already_subscribed {
        subscriptions.retain(|id| id != target_user_id);
    } else {
        subscriptions.push(target_user_id.clone());
    }
    database::put_subscriptions(user_id, &subscriptions)
        .await
        .map_err(|_| ApiError::Internal)?;

    return Ok(!already_subscribed);
}

/*!
 管理员操作：认证标记、管理员授予、用户列表
*/

use crate::{
    config::datatype::UserId,
    database::{self, index},
    server::{error::ApiError, server_state},
};

use super::{get_profile, UserProfile};

/** `require_admin` 校验请求者具有管理员标记
*/
pub async fn require_admin(user_id: &str) -> Result<(), ApiError> {
    let profile = match database::get_user_profile(user_id)
        .await
        .map_err(|_| ApiError::Internal)?
    {
        Some(profile) => profile,
        None => return Err(ApiError::Forbidden("Admin access required")),
    };
    if !profile.is_admin {
        return Err(ApiError::Forbidden("Admin access required"));
    }
    return Ok(());
}

/** `set_verified` 设置目标用户的认证标记
*/
pub async fn set_verified(
    target_user_id: &UserId,
    verified: bool,
) -> Result<UserProfile, ApiError> {
    let _guard =
        server_state::lock_document(index::user_profile_key(target_user_id).as_str()).await;

    let mut profile = get_profile(target_user_id).await?;
    profile.is_verified = verified;
    database::put_user_profile(&profile)
        .await
        .map_err(|_| ApiError::Internal)?;

    return Ok(profile);
}

/** `set_admin` 设置目标用户的管理员标记
*/
pub async fn set_admin(target_user_id: &UserId, is_admin: bool) -> Result<UserProfile, ApiError> {
    let _guard =
        server_state::lock_document(index::user_profile_key(target_user_id).as_str()).await;

    let mut profile = get_profile(target_user_id).await?;
    profile.is_admin = is_admin;
    database::put_user_profile(&profile)
        .await
        .map_err(|_| ApiError::Internal)?;

    return Ok(profile);
}

/** `list_users` 全部用户资料
*/
pub async fn list_users() -> Result<Vec<UserProfile>, ApiError> {
    return database::scan_user_profiles()
        .await
        .map_err(|_| ApiError::Internal);
}

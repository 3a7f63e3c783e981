/*!
 注册登录、用户资料与管理员操作的HTTP接口
*/

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{self, authenticate, AuthError},
    config::datatype::UserId,
    oss,
    server::error::ApiError,
    user::{self, ProfileUpdateData, UserProfile, UserProfileView},
    video::VideoInfo,
};

/** `SignUpData` 注册所用的数据类型
*/
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignUpData {
    pub email: String,
    pub password: String,
    pub username: String,
    pub display_name: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub success: bool,
    pub user_id: UserId,
    pub is_first_user: bool,
}

/** `sign_up` 注册：先在身份服务建号，再写入资料
*/
#[post("/signup")]
pub async fn sign_up(json: web::Json<SignUpData>) -> Result<HttpResponse, ApiError> {
    user::check_username(&json.username)?;
    user::check_display_name(&json.display_name)?;

    let auth_user = match auth::create_user(
        &json.email,
        &json.password,
        &json.username,
        &json.display_name,
    )
    .await
    {
        Ok(auth_user) => auth_user,
        Err(AuthError::Rejected(msg)) => return Err(ApiError::Validation(msg)),
        Err(_) => return Err(ApiError::Internal),
    };

    let (profile, is_first_user) =
        user::register_profile(&auth_user, &json.username, &json.display_name).await?;

    return Ok(HttpResponse::Ok().json(SignUpResponse {
        success: true,
        user_id: profile.id,
        is_first_user,
    }));
}

/** `SignInData` 登录所用的数据类型
*/
#[derive(Serialize, Deserialize, Debug)]
pub struct SignInData {
    pub email: String,
    pub password: String,
}

/** `sign_in` 登录：把密码凭证转发给身份服务，原样返回令牌响应
*/
#[post("/signin")]
pub async fn sign_in(json: web::Json<SignInData>) -> Result<HttpResponse, ApiError> {
    return match auth::sign_in_with_password(&json.email, &json.password).await {
        Ok(tokens) => Ok(HttpResponse::Ok().json(tokens)),
        Err(AuthError::Rejected(_)) | Err(AuthError::TokenInvalid) => {
            Err(ApiError::Unauthenticated)
        }
        Err(AuthError::Provider) => Err(ApiError::Internal),
    };
}

#[derive(Serialize, Debug)]
pub struct GetUserResponse {
    pub user: UserProfileView,
    pub videos: Vec<VideoInfo>,
}

/** `get_user` 用户资料与作品列表
*/
#[get("/user/{id}")]
pub async fn get_user(path: web::Path<UserId>) -> Result<HttpResponse, ApiError> {
    let (view, videos) = user::get_profile_view(&path.into_inner()).await?;
    return Ok(HttpResponse::Ok().json(GetUserResponse { user: view, videos }));
}

#[derive(Serialize, Debug)]
pub struct UpdateProfileResponse {
    pub success: bool,
    pub user: UserProfile,
}

/** `update_profile` 更新自己的资料
*/
#[post("/update-profile")]
pub async fn update_profile(
    json: web::Json<ProfileUpdateData>,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let auth_user = authenticate(&request).await?;
    let profile = user::update_profile(&auth_user.id, &json).await?;
    return Ok(HttpResponse::Ok().json(UpdateProfileResponse {
        success: true,
        user: profile,
    }));
}

/** `UploadAvatarData` 申请头像上传所用的数据类型
*/
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UploadAvatarData {
    pub file_name: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UploadAvatarResponse {
    pub success: bool,
    pub upload_url: String,
    pub avatar_url: String,
}

/** `upload_avatar` 头像上传：发预签名PUT地址，客户端直传OSS，
 拿到的读取地址由客户端写回资料的avatar字段
*/
#[post("/upload-avatar")]
pub async fn upload_avatar(
    json: web::Json<UploadAvatarData>,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let auth_user = authenticate(&request).await?;

    let file_name = format!("{}-{}", auth_user.id, json.file_name);
    let upload = oss::presign_avatar_put(&file_name).map_err(|_| ApiError::Internal)?;
    let avatar = oss::presign_avatar_get(&file_name).map_err(|_| ApiError::Internal)?;

    return Ok(HttpResponse::Ok().json(UploadAvatarResponse {
        success: true,
        upload_url: upload.url,
        avatar_url: avatar.url,
    }));
}

/** `SubscribeData` 关注所用的数据类型
*/
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeData {
    pub target_user_id: UserId,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub success: bool,
    pub is_subscribed: bool,
}

/** `subscribe` 关注或取关目标用户
*/
#[post("/subscribe")]
pub async fn subscribe(
    json: web::Json<SubscribeData>,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let auth_user = authenticate(&request).await?;
    let is_subscribed = user::toggle_subscription(&auth_user.id, &json.target_user_id).await?;
    return Ok(HttpResponse::Ok().json(SubscribeResponse {
        success: true,
        is_subscribed,
    }));
}

/** `AdminVerifyData` 设置认证标记所用的数据类型
*/
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AdminVerifyData {
    pub target_user_id: UserId,
    pub verified: bool,
}

#[derive(Serialize, Debug)]
pub struct AdminUserResponse {
    pub success: bool,
    pub user: UserProfile,
}

/** `admin_verify` 管理员设置目标用户的认证标记
*/
#[post("/admin/verify")]
pub async fn admin_verify(
    json: web::Json<AdminVerifyData>,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let auth_user = authenticate(&request).await?;
    user::require_admin(&auth_user.id).await?;

    let profile = user::set_verified(&json.target_user_id, json.verified).await?;
    return Ok(HttpResponse::Ok().json(AdminUserResponse {
        success: true,
        user: profile,
    }));
}

/** `AdminGrantData` 授予管理员所用的数据类型
*/
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AdminGrantData {
    pub target_user_id: UserId,
    pub is_admin: bool,
}

/** `admin_grant` 管理员授予或收回目标用户的管理员标记
*/
#[post("/admin/grant")]
pub async fn admin_grant(
    json: web::Json<AdminGrantData>,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let auth_user = authenticate(&request).await?;
    user::require_admin(&auth_user.id).await?;

    let profile = user::set_admin(&json.target_user_id, json.is_admin).await?;
    return Ok(HttpResponse::Ok().json(AdminUserResponse {
        success: true,
        user: profile,
    }));
}

#[derive(Serialize, Debug)]
pub struct AdminUsersResponse {
    pub users: Vec<UserProfile>,
}

/** `admin_users` 管理员拉取全部用户
*/
#[get("/admin/users")]
pub async fn admin_users(request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let auth_user = authenticate(&request).await?;
    user::require_admin(&auth_user.id).await?;

    let users = user::list_users().await?;
    return Ok(HttpResponse::Ok().json(AdminUsersResponse { users }));
}

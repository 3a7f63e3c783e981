use log::error;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{datatype::UserId, Config};

static HTTP: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(
            Config::get().auth.request_timeout_sec,
        ))
        .build()
        .expect("创建HTTP客户端失败")
});

/** `AuthUser` 身份服务确认过的用户
*/
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
}

/** `AuthError` 与身份服务交互的错误分类
*/
#[derive(Debug)]
pub enum AuthError {
    /// 凭证无效或过期
    TokenInvalid,
    /// 身份服务拒绝了请求，附服务端消息
    Rejected(String),
    /// 传输失败或服务端异常
    Provider,
}

#[derive(Serialize)]
struct CreateUserBody<'a> {
    email: &'a str,
    password: &'a str,
    email_confirm: bool,
    user_metadata: UserMetadata<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserMetadata<'a> {
    username: &'a str,
    display_name: &'a str,
}

/** `verify_token` 校验bearer凭证，换取稳定的用户标识
*/
pub async fn verify_token(token: &str) -> Result<AuthUser, AuthError> {
    let auth_config = &Config::get().auth;

    let response = HTTP
        .get(format!("{}/user", auth_config.endpoint))
        .header("apikey", &auth_config.anon_key)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|err| {
            error!("身份服务请求失败: {}", err);
            AuthError::Provider
        })?;

    if !response.status().is_success() {
        return Err(AuthError::TokenInvalid);
    }

    return response.json::<AuthUser>().await.map_err(|err| {
        error!("身份服务响应解析失败: {}", err);
        AuthError::Provider
    });
}

/** `create_user` 在身份服务中创建用户。
 没有独立的邮件服务，邮箱在创建时直接确认。
*/
pub async fn create_user(
    email: &str,
    password: &str,
    username: &str,
    display_name: &str,
) -> Result<AuthUser, AuthError> {
    let auth_config = &Config::get().auth;

    let response = HTTP
        .post(format!("{}/admin/users", auth_config.endpoint))
        .header("apikey", &auth_config.service_key)
        .bearer_auth(&auth_config.service_key)
        .json(&CreateUserBody {
            email,
            password,
            email_confirm: true,
            user_metadata: UserMetadata {
                username,
                display_name,
            },
        })
        .send()
        .await
        .map_err(|err| {
            error!("身份服务请求失败: {}", err);
            AuthError::Provider
        })?;

    let status = response.status();
    if status.is_success() {
        return response.json::<AuthUser>().await.map_err(|err| {
            error!("身份服务响应解析失败: {}", err);
            AuthError::Provider
        });
    }
    if status.is_client_error() {
        return Err(AuthError::Rejected(read_error_message(response).await));
    }

    error!("身份服务创建用户失败: {}", status);
    return Err(AuthError::Provider);
}

/** `sign_in_with_password` 转发密码登录，原样返回服务端的令牌响应
*/
pub async fn sign_in_with_password(email: &str, password: &str) -> Result<Value, AuthError> {
    let auth_config = &Config::get().auth;

    let response = HTTP
        .post(format!("{}/token?grant_type=password", auth_config.endpoint))
        .header("apikey", &auth_config.anon_key)
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .map_err(|err| {
            error!("身份服务请求失败: {}", err);
            AuthError::Provider
        })?;

    let status = response.status();
    if status.is_success() {
        return response.json::<Value>().await.map_err(|err| {
            error!("身份服务响应解析失败: {}", err);
            AuthError::Provider
        });
    }
    if status.is_client_error() {
        return Err(AuthError::Rejected(read_error_message(response).await));
    }

    error!("身份服务登录失败: {}", status);
    return Err(AuthError::Provider);
}

/// 取服务端错误消息，取不到时退化为状态码文本
async fn read_error_message(response: reqwest::Response) -> String {
    let status = response.status();
    if let Ok(body) = response.json::<Value>().await {
        for field in ["msg", "message", "error_description", "error"] {
            if let Some(msg) = body.get(field).and_then(|value| value.as_str()) {
                return msg.to_string();
            }
        }
    }
    return status.to_string();
}

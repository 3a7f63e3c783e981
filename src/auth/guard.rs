use actix_web::HttpRequest;

use crate::server::error::ApiError;

use super::{verify_token, AuthError, AuthUser};

/** `authenticate` 从请求头取出bearer凭证并向身份服务校验
*/
pub async fn authenticate(request: &HttpRequest) -> Result<AuthUser, ApiError> {
    let header = match request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
    {
        Some(header) => header,
        None => return Err(ApiError::Unauthenticated),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(token) => token,
        None => return Err(ApiError::Unauthenticated),
    };

    return match verify_token(token).await {
        Ok(user) => Ok(user),
        Err(AuthError::TokenInvalid) | Err(AuthError::Rejected(_)) => {
            Err(ApiError::Unauthenticated)
        }
        Err(AuthError::Provider) => Err(ApiError::Internal),
    };
}

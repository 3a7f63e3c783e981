/*!
 请求处理的统一错误类型。所有失败在handler边界转换为
 `{"error": "..."}` 形式的JSON响应，内部原因只记录日志，不外传。
*/

use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

/** `ApiError` 错误分类
*/
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 凭证缺失或无效
    Unauthenticated,
    /// 已认证但无权限
    Forbidden(&'static str),
    /// 请求内容不合法
    Validation(String),
    /// 引用的实体不存在
    NotFound(&'static str),
    /// 存储或外部服务失败，具体原因已写入日志
    Internal,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            ApiError::Unauthenticated => write!(f, "Unauthorized"),
            ApiError::Forbidden(msg) => write!(f, "{}", msg),
            ApiError::Validation(msg) => write!(f, "{}", msg),
            ApiError::NotFound(msg) => write!(f, "{}", msg),
            ApiError::Internal => write!(f, "Internal server error"),
        };
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        return match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
    }

    fn error_response(&self) -> HttpResponse {
        return HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        });
    }
}

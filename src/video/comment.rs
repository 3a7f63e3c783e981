use chrono::Utc;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{
        datatype::{CommentId, Timestamp, UserId, VideoId},
        Config,
    },
    database::{self, index},
    server::{error::ApiError, server_state},
    user::UserProfile,
};

/** `Comment` 评论数据类型
*/
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub user_id: UserId,
    pub video_id: VideoId,
    pub text: String,
    pub created_at: Timestamp,
}

/** `CommentWithUser` 评论加作者资料的视图
*/
#[derive(Serialize, Debug)]
pub struct CommentWithUser {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: Option<UserProfile>,
}

/** `add_comment` 发表评论，返回评论与该视频的评论总数
*/
pub async fn add_comment(
    user_id: &UserId,
    video_id: &str,
    text: &str,
) -> Result<(Comment, usize), ApiError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::Validation(
            "Comment text cannot be empty".to_string(),
        ));
    }
    if text.len() > Config::get().safety.max_comment_length as usize {
        return Err(ApiError::Validation("Comment text too long".to_string()));
    }

    let _guard = server_state::lock_document(index::video_key(video_id).as_str()).await;

    let mut video = match database::get_video(video_id)
        .await
        .map_err(|_| ApiError::Internal)?
    {
        Some(video) => video,
        None => return Err(ApiError::NotFound("Video not found")),
    };

    let comment = Comment {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.clone(),
        video_id: video_id.to_string(),
        text: text.to_string(),
        created_at: Utc::now(),
    };

    let mut comments = database::get_comments(video_id)
        .await
        .map_err(|_| ApiError::Internal)?;
    comments.push(comment.clone());
    database::put_comments(video_id, &comments)
        .await
        .map_err(|_| ApiError::Internal)?;

    video.comments = comments.len();
    database::put_video(&video)
        .await
        .map_err(|_| ApiError::Internal)?;

    return Ok((comment, comments.len()));
}

/** `get_comments` 一个视频的全部评论，附作者资料
*/
pub async fn get_comments(video_id: &str) -> Result<Vec<CommentWithUser>, ApiError> {
    let comments = database::get_comments(video_id)
        .await
        .map_err(|_| ApiError::Internal)?;

    let enriched = join_all(comments.into_iter().map(|comment| async move {
        let user = database::get_user_profile(&comment.user_id)
            .await
            .unwrap_or(None);
        CommentWithUser { comment, user }
    }))
    .await;

    return Ok(enriched);
}

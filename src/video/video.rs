use chrono::Utc;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{
        datatype::{Timestamp, UserId, VideoId},
        Config,
    },
    database::{self, index},
    oss::{self, PresignUrl},
    server::{error::ApiError, server_state},
    user::UserProfile,
};

/** `VideoInfo` 视频元数据。likes/comments/views是冗余计数，
 每次变更时由对应列表重新算出。
*/
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub id: VideoId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub url: String,
    #[serde(default)]
    pub is_external: bool,
    pub likes: usize,
    pub comments: usize,
    pub views: u64,
    pub created_at: Timestamp,
}

/** `VideoWithUser` 视频加作者资料的视图
*/
#[derive(Serialize, Debug)]
pub struct VideoWithUser {
    #[serde(flatten)]
    pub video: VideoInfo,
    pub user: Option<UserProfile>,
}

/** `UploadVideoData` 申请上传所用的数据类型
*/
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UploadVideoData {
    pub title: String,
    pub description: String,
    pub file_name: String,
    pub content_type: Option<String>,
}

/** `ImportVideoData` 外链导入所用的数据类型
*/
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ImportVideoData {
    pub url: String,
    pub title: String,
    pub description: String,
}

fn check_title(title: &str) -> Result<(), ApiError> {
    if title.len() > Config::get().safety.max_title_length as usize {
        return Err(ApiError::Validation("Title too long".to_string()));
    }
    return Ok(());
}

/** `create_upload` 登记一个新视频并签发直传地址。
 客户端拿uploadUrl把文件直传OSS，元数据先行落库。
*/
pub async fn create_upload(
    user_id: &UserId,
    data: &UploadVideoData,
) -> Result<(VideoInfo, PresignUrl), ApiError> {
    check_title(&data.title)?;
    if data.file_name.trim().is_empty() {
        return Err(ApiError::Validation("No video file provided".to_string()));
    }

    let video_id = Uuid::new_v4().to_string();
    let file_name = format!("{}-{}", video_id, data.file_name);

    let upload = oss::presign_video_put(&file_name).map_err(|_| ApiError::Internal)?;
    let playback = oss::presign_video_get(&file_name).map_err(|_| ApiError::Internal)?;

    let video = VideoInfo {
        id: video_id,
        user_id: user_id.clone(),
        title: data.title.clone(),
        description: data.description.clone(),
        file_name: Some(file_name),
        url: playback.url,
        is_external: false,
        likes: 0,
        comments: 0,
        views: 0,
        created_at: Utc::now(),
    };
    database::put_video(&video)
        .await
        .map_err(|_| ApiError::Internal)?;

    push_user_video(user_id, &video.id).await?;

    return Ok((video, upload));
}

/// 视频ID前插进作者的作品列表，新的在前
async fn push_user_video(user_id: &UserId, video_id: &VideoId) -> Result<(), ApiError> {
    let _guard = server_state::lock_document(index::user_videos_key(user_id).as_str()).await;

    let mut video_ids = database::get_user_videos(user_id)
        .await
        .map_err(|_| ApiError::Internal)?;
    video_ids.insert(0, video_id.clone());
    return database::put_user_videos(user_id, &video_ids)
        .await
        .map_err(|_| ApiError::Internal);
}

/** `import_external` 保存一条外部链接视频，文件不经过OSS
*/
pub async fn import_external(
    user_id: &UserId,
    data: &ImportVideoData,
) -> Result<VideoInfo, ApiError> {
    check_title(&data.title)?;
    if data.url.trim().is_empty() {
        return Err(ApiError::Validation("No video url provided".to_string()));
    }

    let video = VideoInfo {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.clone(),
        title: data.title.clone(),
        description: data.description.clone(),
        file_name: None,
        url: data.url.clone(),
        is_external: true,
        likes: 0,
        comments: 0,
        views: 0,
        created_at: Utc::now(),
    };
    database::put_video(&video)
        .await
        .map_err(|_| ApiError::Internal)?;

    return Ok(video);
}

/** `get_feed` 按创建时间倒序的视频流，附作者资料
*/
pub async fn get_feed(limit: usize, offset: usize) -> Result<Vec<VideoWithUser>, ApiError> {
    let mut videos = database::scan_videos()
        .await
        .map_err(|_| ApiError::Internal)?;
    videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let page: Vec<VideoInfo> = videos.into_iter().skip(offset).take(limit).collect();

    // 作者资料读不到时置空，不让单个坏档拖垮整个流
    let enriched = join_all(page.into_iter().map(|video| async move {
        let user = database::get_user_profile(&video.user_id)
            .await
            .unwrap_or(None);
        VideoWithUser { video, user }
    }))
    .await;

    return Ok(enriched);
}

/** `get_video` 单个视频加作者资料
*/
pub async fn get_video(video_id: &str) -> Result<VideoWithUser, ApiError> {
    let video = match database::get_video(video_id)
        .await
        .map_err(|_| ApiError::Internal)?
    {
        Some(video) => video,
        None => return Err(ApiError::NotFound("Video not found")),
    };

    let user = database::get_user_profile(&video.user_id)
        .await
        .map_err(|_| ApiError::Internal)?;

    return Ok(VideoWithUser { video, user });
}

/** `toggle_like` 点赞或取消点赞，返回操作后的点赞数与状态。
 点赞列表与元数据计数一起变更，持视频锁串行化。
*/
pub async fn toggle_like(user_id: &UserId, video_id: &str) -> Result<(usize, bool), ApiError> {
    let _guard = server_state::lock_document(index::video_key(video_id).as_str()).await;

    let mut video = match database::get_video(video_id)
        .await
        .map_err(|_| ApiError::Internal)?
    {
        Some(video) => video,
        None => return Err(ApiError::NotFound("Video not found")),
    };

    let mut likes = database::get_likes(video_id)
        .await
        .map_err(|_| ApiError::Internal)?;
    let already_liked = likes.iter().any(|id| id == user_id);
    if already_liked {
        likes.retain(|id| id != user_id);
    } else {
        likes.push(user_id.clone());
    }
    database::put_likes(video_id, &likes)
        .await
        .map_err(|_| ApiError::Internal)?;

    video.likes = likes.len();
    database::put_video(&video)
        .await
        .map_err(|_| ApiError::Internal)?;

    return Ok((video.likes, !already_liked));
}

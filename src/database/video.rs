use crate::config::datatype::{UserId, VideoId};
use crate::video::{Comment, VideoAnalytics, VideoInfo};

use super::{index, kv};

/// 读出视频元数据
pub async fn get_video(video_id: &str) -> Result<Option<VideoInfo>, ()> {
    return match kv::get(index::video_key(video_id).as_str()).await? {
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|_| ()),
        None => Ok(None),
    };
}

/// 写回视频元数据
pub async fn put_video(video: &VideoInfo) -> Result<(), ()> {
    let raw = serde_json::to_string(video).map_err(|_| ())?;
    return kv::set(index::video_key(&video.id).as_str(), raw).await;
}

/// 扫描全部视频元数据
pub async fn scan_videos() -> Result<Vec<VideoInfo>, ()> {
    let raws = kv::get_by_prefix(index::VIDEO_PREFIX).await?;
    let mut videos = Vec::with_capacity(raws.len());
    for raw in raws {
        videos.push(serde_json::from_str(&raw).map_err(|_| ())?);
    }
    return Ok(videos);
}

/// 读出用户的视频ID列表，新的在前
pub async fn get_user_videos(user_id: &str) -> Result<Vec<VideoId>, ()> {
    return match kv::get(index::user_videos_key(user_id).as_str()).await? {
        Some(raw) => serde_json::from_str(&raw).map_err(|_| ()),
        None => Ok(Vec::new()),
    };
}

/// 写回用户的视频ID列表
pub async fn put_user_videos(user_id: &str, video_ids: &[VideoId]) -> Result<(), ()> {
    let raw = serde_json::to_string(video_ids).map_err(|_| ())?;
    return kv::set(index::user_videos_key(user_id).as_str(), raw).await;
}

/// 读出视频的点赞用户列表
pub async fn get_likes(video_id: &str) -> Result<Vec<UserId>, ()> {
    return match kv::get(index::likes_key(video_id).as_str()).await? {
        Some(raw) => serde_json::from_str(&raw).map_err(|_| ()),
        None => Ok(Vec::new()),
    };
}

/// 写回视频的点赞用户列表
pub async fn put_likes(video_id: &str, likes: &[UserId]) -> Result<(), ()> {
    let raw = serde_json::to_string(likes).map_err(|_| ())?;
    return kv::set(index::likes_key(video_id).as_str(), raw).await;
}

/// 读出视频的评论列表
pub async fn get_comments(video_id: &str) -> Result<Vec<Comment>, ()> {
    return match kv::get(index::comments_key(video_id).as_str()).await? {
        Some(raw) => serde_json::from_str(&raw).map_err(|_| ()),
        None => Ok(Vec::new()),
    };
}

/// 写回视频的评论列表
pub async fn put_comments(video_id: &str, comments: &[Comment]) -> Result<(), ()> {
    let raw = serde_json::to_string(comments).map_err(|_| ())?;
    return kv::set(index::comments_key(video_id).as_str(), raw).await;
}

/// 读出视频的留存分析数据，尚无记录时为空数据
pub async fn get_analytics(video_id: &str) -> Result<VideoAnalytics, ()> {
    return match kv::get(index::analytics_key(video_id).as_str()).await? {
        Some(raw) => serde_json::from_str(&raw).map_err(|_| ()),
        None => Ok(VideoAnalytics::default()),
    };
}

/// 写回视频的留存分析数据
pub async fn put_analytics(video_id: &str, analytics: &VideoAnalytics) -> Result<(), ()> {
    let raw = serde_json::to_string(analytics).map_err(|_| ())?;
    return kv::set(index::analytics_key(video_id).as_str(), raw).await;
}

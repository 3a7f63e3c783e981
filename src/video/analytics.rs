use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    config::datatype::{Timestamp, UserId},
    database::{self, index},
    server::{error::ApiError, server_state},
};

use super::VideoInfo;

/** `ViewSample` 单次播放的观看记录
*/
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ViewSample {
    pub timestamp: Timestamp,
    pub watch_time: f64,
    pub duration: f64,
}

/** `VideoAnalytics` 一个视频累计的观看与留存数据
*/
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct VideoAnalytics {
    pub views: Vec<ViewSample>,
    pub retention: Vec<f64>,
}

/** `VideoAnalyticsSummary` 创作中心里单个视频的汇总
*/
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VideoAnalyticsSummary {
    pub video: VideoInfo,
    pub views: u64,
    pub likes: usize,
    pub comments: usize,
    /// 平均留存百分比，保留一位小数
    pub avg_retention: String,
}

/** `record_view` 记录一次播放：计数加一，留存样本入库。
 duration为0时留存按0计，避免除零。
*/
pub async fn record_view(video_id: &str, watch_time: f64, duration: f64) -> Result<(), ApiError> {
    let _guard = server_state::lock_document(index::video_key(video_id).as_str()).await;

    let mut video = match database::get_video(video_id)
        .await
        .map_err(|_| ApiError::Internal)?
    {
        Some(video) => video,
        None => return Err(ApiError::NotFound("Video not found")),
    };

    video.views += 1;
    database::put_video(&video)
        .await
        .map_err(|_| ApiError::Internal)?;

    let retention_rate = if duration > 0.0 {
        watch_time / duration * 100.0
    } else {
        0.0
    };

    let mut analytics = database::get_analytics(video_id)
        .await
        .map_err(|_| ApiError::Internal)?;
    analytics.views.push(ViewSample {
        timestamp: Utc::now(),
        watch_time,
        duration,
    });
    analytics.retention.push(retention_rate);
    database::put_analytics(video_id, &analytics)
        .await
        .map_err(|_| ApiError::Internal)?;

    return Ok(());
}

/** `get_creator_analytics` 创作者名下每个视频的汇总数据，
 只允许本人查看
*/
pub async fn get_creator_analytics(
    requester_id: &UserId,
    user_id: &UserId,
) -> Result<Vec<VideoAnalyticsSummary>, ApiError> {
    if requester_id != user_id {
        return Err(ApiError::Forbidden("You can only view your own analytics"));
    }

    let video_ids = database::get_user_videos(user_id)
        .await
        .map_err(|_| ApiError::Internal)?;

    let mut summaries = Vec::with_capacity(video_ids.len());
    for video_id in &video_ids {
        let video = match database::get_video(video_id)
            .await
            .map_err(|_| ApiError::Internal)?
        {
            Some(video) => video,
            None => continue,
        };
        let analytics = database::get_analytics(video_id)
            .await
            .map_err(|_| ApiError::Internal)?;

        let avg_retention = if analytics.retention.is_empty() {
            0.0
        } else {
            analytics.retention.iter().sum::<f64>() / analytics.retention.len() as f64
        };

        summaries.push(VideoAnalyticsSummary {
            views: video.views,
            likes: video.likes,
            comments: video.comments,
            avg_retention: format!("{:.1}", avg_retention),
            video,
        });
    }

    return Ok(summaries);
}

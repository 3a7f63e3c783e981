/*!
 视频流、上传、互动与分析的HTTP接口
*/

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    auth::authenticate,
    config::{
        datatype::{UserId, VideoId},
        Config,
    },
    server::error::ApiError,
    video::{
        self, Comment, CommentWithUser, ImportVideoData, UploadVideoData, VideoAnalyticsSummary,
        VideoInfo, VideoWithUser,
    },
};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UploadVideoResponse {
    pub success: bool,
    pub video_id: VideoId,
    pub video: VideoInfo,
    pub upload_url: String,
}

/** `upload_video` 申请上传一个新视频
*/
#[post("/upload-video")]
pub async fn upload_video(
    json: web::Json<UploadVideoData>,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let auth_user = authenticate(&request).await?;
    let (video, upload) = video::create_upload(&auth_user.id, &json).await?;
    return Ok(HttpResponse::Ok().json(UploadVideoResponse {
        success: true,
        video_id: video.id.clone(),
        video,
        upload_url: upload.url,
    }));
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ImportVideoResponse {
    pub success: bool,
    pub video_id: VideoId,
    pub video: VideoInfo,
}

/** `import_video` 保存一条外部链接视频
*/
#[post("/import-video")]
pub async fn import_video(
    json: web::Json<ImportVideoData>,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let auth_user = authenticate(&request).await?;
    let video = video::import_external(&auth_user.id, &json).await?;
    return Ok(HttpResponse::Ok().json(ImportVideoResponse {
        success: true,
        video_id: video.id.clone(),
        video,
    }));
}

/** `FeedQuery` 视频流分页参数
*/
#[derive(Deserialize, Debug)]
pub struct FeedQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Serialize, Debug)]
pub struct GetVideosResponse {
    pub videos: Vec<VideoWithUser>,
}

/** `get_videos` 视频流
*/
#[get("/videos")]
pub async fn get_videos(query: web::Query<FeedQuery>) -> Result<HttpResponse, ApiError> {
    let max_limit = Config::get().safety.max_feed_limit as usize;
    let limit = query.limit.unwrap_or(10).min(max_limit);
    let offset = query.offset.unwrap_or(0);

    let videos = video::get_feed(limit, offset).await?;
    return Ok(HttpResponse::Ok().json(GetVideosResponse { videos }));
}

#[derive(Serialize, Debug)]
pub struct GetVideoResponse {
    pub video: VideoWithUser,
}

/** `get_video` 单个视频
*/
#[get("/video/{id}")]
pub async fn get_video(path: web::Path<VideoId>) -> Result<HttpResponse, ApiError> {
    let video = video::get_video(&path.into_inner()).await?;
    return Ok(HttpResponse::Ok().json(GetVideoResponse { video }));
}

/** `LikeData` 点赞所用的数据类型
*/
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LikeData {
    pub video_id: VideoId,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub success: bool,
    pub likes: usize,
    pub is_liked: bool,
}

/** `like_video` 点赞或取消点赞
*/
#[post("/like")]
pub async fn like_video(
    json: web::Json<LikeData>,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let auth_user = authenticate(&request).await?;
    let (likes, is_liked) = video::toggle_like(&auth_user.id, &json.video_id).await?;
    return Ok(HttpResponse::Ok().json(LikeResponse {
        success: true,
        likes,
        is_liked,
    }));
}

/** `CommentData` 评论所用的数据类型
*/
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CommentData {
    pub video_id: VideoId,
    pub text: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub success: bool,
    pub comment: Comment,
    pub total_comments: usize,
}

/** `comment_video` 发表评论
*/
#[post("/comment")]
pub async fn comment_video(
    json: web::Json<CommentData>,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let auth_user = authenticate(&request).await?;
    let (comment, total_comments) = video::add_comment(&auth_user.id, &json.video_id, &json.text).await?;
    return Ok(HttpResponse::Ok().json(CommentResponse {
        success: true,
        comment,
        total_comments,
    }));
}

#[derive(Serialize, Debug)]
pub struct GetCommentsResponse {
    pub comments: Vec<CommentWithUser>,
}

/** `get_comments` 一个视频的评论列表
*/
#[get("/comments/{video_id}")]
pub async fn get_comments(path: web::Path<VideoId>) -> Result<HttpResponse, ApiError> {
    let comments = video::get_comments(&path.into_inner()).await?;
    return Ok(HttpResponse::Ok().json(GetCommentsResponse { comments }));
}

/** `ViewData` 播放上报所用的数据类型
*/
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ViewData {
    pub video_id: VideoId,
    pub watch_time: f64,
    pub duration: f64,
}

#[derive(Serialize, Debug)]
pub struct ViewResponse {
    pub success: bool,
}

/** `record_view` 播放上报，不要求登录
*/
#[post("/view")]
pub async fn record_view(json: web::Json<ViewData>) -> Result<HttpResponse, ApiError> {
    video::record_view(&json.video_id, json.watch_time, json.duration).await?;
    return Ok(HttpResponse::Ok().json(ViewResponse { success: true }));
}

#[derive(Serialize, Debug)]
pub struct GetAnalyticsResponse {
    pub analytics: Vec<VideoAnalyticsSummary>,
}

/** `get_analytics` 创作中心数据，只允许本人查看
*/
#[get("/analytics/{user_id}")]
pub async fn get_analytics(
    path: web::Path<UserId>,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let auth_user = authenticate(&request).await?;
    let analytics = video::get_creator_analytics(&auth_user.id, &path.into_inner()).await?;
    return Ok(HttpResponse::Ok().json(GetAnalyticsResponse { analytics }));
}

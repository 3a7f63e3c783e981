use chrono::{Duration, Utc};

use crate::database;
use crate::server::error::ApiError;
use crate::user::UserProfile;
use crate::video::{self, ImportVideoData, UploadVideoData, VideoInfo};

fn creator_profile() -> UserProfile {
    return UserProfile {
        id: "creator_1".to_string(),
        email: "creator@example.com".to_string(),
        username: "creator".to_string(),
        display_name: "Creator".to_string(),
        bio: String::new(),
        avatar: String::new(),
        is_verified: false,
        is_admin: false,
        created_at: Utc::now(),
    };
}

fn external_video(video_id: &str, title: &str, age: Duration) -> VideoInfo {
    return VideoInfo {
        id: video_id.to_string(),
        user_id: "creator_1".to_string(),
        title: title.to_string(),
        description: String::new(),
        file_name: None,
        url: "https://example.com/v".to_string(),
        is_external: true,
        likes: 0,
        comments: 0,
        views: 0,
        created_at: Utc::now() - age,
    };
}

pub async fn test_for_import_external() -> Result<(), ()> {
    database::put_user_profile(&creator_profile()).await?;

    let data = ImportVideoData {
        url: "https://example.com/clip".to_string(),
        title: "imported clip".to_string(),
        description: "from elsewhere".to_string(),
    };
    let video = video::import_external(&"creator_1".to_string(), &data)
        .await
        .map_err(|_| ())?;

    if !video.is_external || video.url != "https://example.com/clip" || video.file_name.is_some() {
        panic!("import_external");
    }
    if database::get_video(&video.id).await?.is_none() {
        panic!("import_external_persisted");
    }

    let empty = ImportVideoData {
        url: "  ".to_string(),
        title: "no url".to_string(),
        description: String::new(),
    };
    match video::import_external(&"creator_1".to_string(), &empty).await {
        Err(ApiError::Validation(_)) => Ok(()),
        _ => panic!("import_external_empty_url"),
    }
}

pub async fn test_for_create_upload() -> Result<(), ()> {
    let data = UploadVideoData {
        title: "my clip".to_string(),
        description: "first upload".to_string(),
        file_name: "clip.mp4".to_string(),
        content_type: Some("video/mp4".to_string()),
    };
    let (video, upload) = video::create_upload(&"creator_1".to_string(), &data)
        .await
        .map_err(|_| ())?;

    let expected_file = format!("{}-clip.mp4", video.id);
    if video.file_name.as_deref() != Some(expected_file.as_str()) {
        panic!("create_upload_file_name");
    }
    if upload.url.is_empty() || video.url.is_empty() || video.is_external {
        panic!("create_upload_urls");
    }

    // 作品列表新的在前
    let second = UploadVideoData {
        title: "second clip".to_string(),
        description: String::new(),
        file_name: "more.mp4".to_string(),
        content_type: None,
    };
    let (video_2, _) = video::create_upload(&"creator_1".to_string(), &second)
        .await
        .map_err(|_| ())?;

    let listed = database::get_user_videos("creator_1").await?;
    if listed.len() != 2 || listed[0] != video_2.id || listed[1] != video.id {
        panic!("create_upload_order");
    }

    let missing = UploadVideoData {
        title: "no file".to_string(),
        description: String::new(),
        file_name: "  ".to_string(),
        content_type: None,
    };
    match video::create_upload(&"creator_1".to_string(), &missing).await {
        Err(ApiError::Validation(_)) => Ok(()),
        _ => panic!("create_upload_no_file"),
    }
}

pub async fn test_for_feed_sorted() -> Result<(), ()> {
    database::put_video(&external_video("feed_old", "old clip", Duration::hours(2))).await?;
    database::put_video(&external_video("feed_new", "new clip", Duration::hours(1))).await?;

    let feed = video::get_feed(100, 0).await.map_err(|_| ())?;
    let position_new = feed.iter().position(|item| item.video.id == "feed_new");
    let position_old = feed.iter().position(|item| item.video.id == "feed_old");
    match (position_new, position_old) {
        (Some(new), Some(old)) if new < old => {}
        _ => panic!("feed_sorted"),
    }

    // 作者资料跟着视频一起返回
    match feed.iter().find(|item| item.video.id == "feed_new") {
        Some(item) => match &item.user {
            Some(user) if user.id == "creator_1" => {}
            _ => panic!("feed_user"),
        },
        None => panic!("feed_missing"),
    }

    let single = video::get_feed(1, 0).await.map_err(|_| ())?;
    if single.len() != 1 {
        panic!("feed_limit");
    }

    let shifted = video::get_feed(1, 1).await.map_err(|_| ())?;
    if shifted.len() != 1 || shifted[0].video.id == single[0].video.id {
        panic!("feed_offset");
    }
    return Ok(());
}

pub async fn test_for_get_video() -> Result<(), ()> {
    let found = video::get_video("feed_new").await.map_err(|_| ())?;
    if found.video.title != "new clip" {
        panic!("get_video");
    }

    match video::get_video("missing_video").await {
        Err(ApiError::NotFound(_)) => Ok(()),
        _ => panic!("get_video_missing"),
    }
}

pub async fn test_for_like_toggle() -> Result<(), ()> {
    let (likes, is_liked) = video::toggle_like(&"fan_1".to_string(), "feed_new")
        .await
        .map_err(|_| ())?;
    if likes != 1 || !is_liked {
        panic!("like_on");
    }

    let (likes, is_liked) = video::toggle_like(&"fan_1".to_string(), "feed_new")
        .await
        .map_err(|_| ())?;
    if likes != 0 || is_liked {
        panic!("like_off");
    }

    // 冗余计数跟着列表走
    let stored = database::get_video("feed_new").await?.unwrap();
    if stored.likes != 0 {
        panic!("like_denormalized");
    }

    match video::toggle_like(&"fan_1".to_string(), "missing_video").await {
        Err(ApiError::NotFound(_)) => Ok(()),
        _ => panic!("like_missing_video"),
    }
}

pub async fn test_for_comments() -> Result<(), ()> {
    let (comment, total) = video::add_comment(&"fan_1".to_string(), "feed_new", "nice!")
        .await
        .map_err(|_| ())?;
    if comment.text != "nice!" || total != 1 {
        panic!("comment_first");
    }

    let (_, total) = video::add_comment(&"fan_2".to_string(), "feed_new", "agreed")
        .await
        .map_err(|_| ())?;
    if total != 2 {
        panic!("comment_second");
    }

    let stored = database::get_video("feed_new").await?.unwrap();
    if stored.comments != 2 {
        panic!("comment_denormalized");
    }

    let listed = video::get_comments("feed_new").await.map_err(|_| ())?;
    if listed.len() != 2 || listed[0].comment.text != "nice!" {
        panic!("comment_list");
    }

    match video::add_comment(&"fan_1".to_string(), "feed_new", "   ").await {
        Err(ApiError::Validation(_)) => Ok(()),
        _ => panic!("comment_empty"),
    }
}

pub async fn test_for_view_and_analytics() -> Result<(), ()> {
    let listed = database::get_user_videos("creator_1").await?;
    let video_id = listed[0].clone();

    video::record_view(&video_id, 5.0, 10.0).await.map_err(|_| ())?;
    video::record_view(&video_id, 10.0, 10.0).await.map_err(|_| ())?;

    let stored = database::get_video(&video_id).await?.unwrap();
    if stored.views != 2 {
        panic!("view_count");
    }

    let analytics = database::get_analytics(&video_id).await?;
    if analytics.retention != vec![50.0, 100.0] || analytics.views.len() != 2 {
        panic!("view_samples");
    }

    let summaries =
        video::get_creator_analytics(&"creator_1".to_string(), &"creator_1".to_string())
            .await
            .map_err(|_| ())?;
    let summary = match summaries.iter().find(|entry| entry.video.id == video_id) {
        Some(summary) => summary,
        None => panic!("analytics_missing_video"),
    };
    if summary.views != 2 || summary.avg_retention != "75.0" {
        panic!("analytics_summary");
    }

    // 其他人看不到创作者的数据
    match video::get_creator_analytics(&"fan_1".to_string(), &"creator_1".to_string()).await {
        Err(ApiError::Forbidden(_)) => {}
        _ => panic!("analytics_forbidden"),
    }

    match video::record_view("missing_video", 1.0, 2.0).await {
        Err(ApiError::NotFound(_)) => Ok(()),
        _ => panic!("view_missing_video"),
    }
}

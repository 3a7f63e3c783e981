use chrono::{Duration, Utc};
use log::{info, warn};
use once_cell::sync::Lazy;
use s3::{error::S3Error, Bucket, BucketConfiguration, Region};
use serde::{Deserialize, Serialize};

use crate::config::{datatype::Timestamp, Config};

/// `VIDEO_BUCKET` 视频桶客户端
pub static VIDEO_BUCKET: Lazy<Bucket> =
    Lazy::new(|| create_bucket(&Config::get().s3_oss.video_bucket_name));

/// `AVATAR_BUCKET` 头像桶客户端
pub static AVATAR_BUCKET: Lazy<Bucket> =
    Lazy::new(|| create_bucket(&Config::get().s3_oss.avatar_bucket_name));

/// `PresignUrl` 预签名url数据类型
#[derive(Debug, Serialize, Deserialize)]
pub struct PresignUrl {
    pub path: String,
    pub url: String,
    pub expire: Timestamp,
}

fn region() -> Region {
    let s3_config = &Config::get().s3_oss;
    return Region::Custom {
        region: s3_config.region.clone(),
        endpoint: s3_config.endpoint.clone(),
    };
}

fn credentials() -> s3::creds::Credentials {
    let s3_config = &Config::get().s3_oss;
    return s3::creds::Credentials {
        access_key: Some(s3_config.access_key.clone()),
        secret_key: Some(s3_config.secret_key.clone()),
        security_token: None,
        session_token: None,
        expiration: None,
    };
}

fn create_bucket(bucket_name: &str) -> Bucket {
    return Bucket::new(bucket_name, region(), credentials())
        .expect("创建S3 Bucket失败，请检查OSS配置")
        .with_path_style();
}

/// `initialize_storage` 启动时确保视频桶与头像桶存在
pub async fn initialize_storage() {
    let s3_config = &Config::get().s3_oss;
    for bucket_name in [
        &s3_config.video_bucket_name,
        &s3_config.avatar_bucket_name,
    ] {
        match Bucket::create_with_path_style(
            bucket_name,
            region(),
            credentials(),
            BucketConfiguration::default(),
        )
        .await
        {
            Ok(_) => info!("Bucket created: {}", bucket_name),
            Err(err) => warn!("创建Bucket {} 失败（可能已存在）: {}", bucket_name, err),
        }
    }
}

fn presign_put(bucket: &Bucket, file_name: &str, expire: u32) -> Result<PresignUrl, S3Error> {
    let mut path = "/".to_string();
    path.push_str(file_name);

    let url = bucket.presign_put(&path, expire, None)?;

    return Ok(PresignUrl {
        path,
        url,
        expire: Utc::now() + Duration::seconds(expire as i64),
    });
}

fn presign_get(bucket: &Bucket, file_name: &str, expire: u32) -> Result<PresignUrl, S3Error> {
    let mut path = "/".to_string();
    path.push_str(file_name);

    let url = bucket.presign_get(&path, expire, None)?;

    return Ok(PresignUrl {
        path,
        url,
        expire: Utc::now() + Duration::seconds(expire as i64),
    });
}

/// `presign_video_put`获取视频直传的预签名url
pub fn presign_video_put(file_name: &str) -> Result<PresignUrl, S3Error> {
    return presign_put(
        &VIDEO_BUCKET,
        file_name,
        Config::get().s3_oss.presign_put_expire,
    );
}

/// `presign_video_get`获取视频播放的预签名url
pub fn presign_video_get(file_name: &str) -> Result<PresignUrl, S3Error> {
    return presign_get(
        &VIDEO_BUCKET,
        file_name,
        Config::get().s3_oss.presign_get_expire,
    );
}

/// `presign_avatar_put`获取头像直传的预签名url
pub fn presign_avatar_put(file_name: &str) -> Result<PresignUrl, S3Error> {
    return presign_put(
        &AVATAR_BUCKET,
        file_name,
        Config::get().s3_oss.presign_put_expire,
    );
}

/// `presign_avatar_get`获取头像读取的预签名url
pub fn presign_avatar_get(file_name: &str) -> Result<PresignUrl, S3Error> {
    return presign_get(
        &AVATAR_BUCKET,
        file_name,
        Config::get().s3_oss.presign_get_expire,
    );
}

/*! 配置文件解析 */

use std::{
    fs::File,
    io::{Read, Write},
    path::PathBuf,
    process::exit,
};

use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use serde::{Deserialize, Serialize};

static CONFIG: OnceCell<Config> = OnceCell::new();

/** `USERNAME_PATTERN` 从配置文件中生成的用户名正则匹配式
 */
pub static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&Config::get().user.username_check).unwrap());

/** `Config` 配置信息的数据类型
 */
#[derive(Serialize, Debug, Deserialize)]
pub struct Config {
    pub http_worker_num: usize,
    pub tls: TlsConfig,
    pub safety: SafetyConfig,
    pub user: UserConfig,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    pub s3_oss: S3Config,
}

/** `TlsConfig` tls有关的配置信息的数据类型
 */
#[derive(Serialize, Debug, Deserialize)]
pub struct TlsConfig {
    pub enable: bool,
    pub private_key_file: String,
    pub cert_chain_file: String,
}

/** `SafetyConfig` 安全性保证的配置信息的数据类型
 */
#[derive(Debug, Serialize, Deserialize)]
pub struct SafetyConfig {
    pub max_msg_length: u16,
    pub max_comment_length: u16,
    pub max_title_length: u16,
    pub max_bio_length: u16,
    /// 单次拉取视频流的最大条数
    pub max_feed_limit: u16,
}

/** `UserConfig` 用户资料的配置信息的数据类型
 */
#[derive(Debug, Serialize, Deserialize)]
pub struct UserConfig {
    pub max_user_name_length: u32,
    pub max_display_name_length: u32,
    pub username_check: String,
}

/** `AuthConfig` 托管身份服务的配置信息的数据类型
 */
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthConfig {
    /// 身份服务的根地址，如 https://auth.example.com
    pub endpoint: String,
    /// 服务端特权密钥，用于管理接口
    pub service_key: String,
    /// 公开密钥，转发客户端请求时使用
    pub anon_key: String,
    pub request_timeout_sec: u64,
}

/** `DatabaseConfig` 文档库的配置信息的数据类型
 */
#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// "redis" 或 "memory"
    pub backend: String,
    pub address: String,
    pub pool_max_open: usize,
    pub pool_max_idle: usize,
    pub pool_timeout: usize,
    pub pool_expire: usize,
}

/** `S3Config` oss配置信息的数据类型
 */
#[derive(Debug, Serialize, Deserialize)]
pub struct S3Config {
    pub enable: bool,
    pub video_bucket_name: String,
    pub avatar_bucket_name: String,
    pub region: String,
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,

    pub presign_put_expire: u32,
    pub presign_get_expire: u32,
}

impl Config {
    /** `init` 试图读取配置文件，生成Config
     */
    pub fn init() {
        match Self::try_read_from_file() {
            Ok(config) => {
                CONFIG.set(config).unwrap();
            }
            Err(_) => {
                println!("未找到配置文件，创建默认配置文件");

                let path = Config::get_config_path().expect("获得配置文件路径失败");

                let config = Config::default();
                let json = serde_json::to_string_pretty(&config).unwrap();

                let mut file = File::create(path).expect("创建配置文件失败");

                file.write_fmt(format_args!("{}", json))
                    .expect("写入配置文件失败");

                println!("默认配置文件写入到{}，请配置数据库、身份服务与OSS", json);
                exit(0);
            }
        }
    }

    /** `init_with` 直接使用给定配置初始化，测试时使用
     */
    pub fn init_with(config: Config) {
        CONFIG.set(config).ok();
    }

    /** `get` 调用已初始化的CONFIG
     */
    pub fn get() -> &'static Config {
        return CONFIG.get().expect("Config未初始化");
    }

    pub(crate) fn default() -> Config {
        let core_num = num_cpus::get();
        Config {
            http_worker_num: core_num,
            tls: TlsConfig {
                enable: false,
                private_key_file: "private.pem".to_string(),
                cert_chain_file: "cert.pem".to_string(),
            },
            safety: SafetyConfig {
                max_msg_length: 500,
                max_comment_length: 500,
                max_title_length: 100,
                max_bio_length: 500,
                max_feed_limit: 50,
            },
            user: UserConfig {
                max_user_name_length: 32,
                max_display_name_length: 64,
                username_check: "^[A-Za-z0-9_.]{3,32}$".to_string(),
            },
            auth: AuthConfig {
                endpoint: "http://localhost:9999".to_string(),
                service_key: "YOUR_SERVICE_KEY".to_string(),
                anon_key: "YOUR_ANON_KEY".to_string(),
                request_timeout_sec: 10,
            },
            database: DatabaseConfig {
                backend: "redis".to_string(),
                address: "redis://127.0.0.1:6379/".to_string(),
                pool_max_open: 16,
                pool_max_idle: 8,
                pool_timeout: 1,
                pool_expire: 60,
            },
            s3_oss: S3Config {
                enable: true,
                region: "zh-east-1".to_string(),
                endpoint: "http://localhost:9000".to_owned(),
                video_bucket_name: "shortkat-videos".to_string(),
                avatar_bucket_name: "shortkat-avatars".to_string(),
                access_key: "YOUR_ACCESS_KEY".to_string(),
                secret_key: "YOUR_SECRET_KEY".to_string(),
                presign_put_expire: 3600,
                presign_get_expire: 3600 * 24 * 365,
            },
        }
    }

    fn get_config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let mut path = std::env::current_dir()?;
        path.push("config/config.json");
        return Ok(path);
    }

    fn try_read_from_file() -> Result<Config, Box<dyn std::error::Error>> {
        let path = Self::get_config_path()?;

        let mut file = File::open(path)?;

        let mut json = String::new();
        file.read_to_string(&mut json).expect("配置文件读取失败");

        let obj = serde_json::from_str(&json).expect("配置文件序列化失败，请检查格式");

        return Ok(obj);
    }
}

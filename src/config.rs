//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，部分字段可由环境变量覆盖

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 数据集配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// 预抓取的股票 JSON 文件路径
    #[serde(default = "default_stocks_path")]
    pub stocks_path: PathBuf,
}

/// 课程文档配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoursesConfig {
    /// 拉取上游文档超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 转换后 HTML 最大字符数，超出截断
    #[serde(default = "default_max_html_len")]
    pub max_html_len: usize,
    /// /api/docs/{slug} 使用的文档地址
    #[serde(default = "default_documents")]
    pub documents: BTreeMap<String, String>,
    /// /courses/doc/{id} 与 /courses/html/{id} 使用的文档地址
    #[serde(default = "default_course_documents")]
    pub course_documents: BTreeMap<String, String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 数据集配置
    #[serde(default)]
    pub data: DataConfig,
    /// 课程文档配置
    #[serde(default)]
    pub courses: CoursesConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
    /// 实际加载的配置文件（日志初始化后再输出）
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }
fn default_stocks_path() -> PathBuf { PathBuf::from("data/psx_stocks.json") }
fn default_timeout() -> u64 { 30 }
fn default_max_html_len() -> usize { 200_000 }
fn default_log_level() -> String { "info".to_string() }

const CDN_BASE: &str = "https://cdn.builder.io/o/assets%2Fca35db826797471cb8e33731c10b3ab1%2F";
const CDN_KEY: &str = "apiKey=ca35db826797471cb8e33731c10b3ab1";

fn cdn_url(asset: &str, token: &str) -> String {
    format!("{}{}?alt=media&token={}&{}", CDN_BASE, asset, token, CDN_KEY)
}

fn default_documents() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "stock-trading".to_string(),
            cdn_url("58d9f01979a24a22b84a5e4ecbf44956", "024c66b2-7b02-4425-bcdb-a0459e4729e1"),
        ),
        (
            "stock-investing".to_string(),
            cdn_url("98130912e8b74cc7b49368622974c070", "515822c1-7295-4173-a312-6c47f4fd8fca"),
        ),
        (
            "income-investing".to_string(),
            cdn_url("aa0d9ed465ae42ceaedc8ae65c4eca19", "e0aa017c-0c33-4a20-8da6-b61186729aca"),
        ),
    ])
}

fn default_course_documents() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "income-investing".to_string(),
            cdn_url("f6d7cfe0397347a9bf821fbeef4f4b24", "93be7fdc-bf13-463b-ac99-768362003904"),
        ),
        (
            "stock-investing".to_string(),
            cdn_url("e1a5761f9fa44ab98787183eee34c065", "b590b695-6e58-43f1-819f-418f97bf3f45"),
        ),
        (
            "stock-trading".to_string(),
            cdn_url("6334288fbb4b4667af07062ece679ac5", "7cea295c-ca95-4e20-b87a-55f3b9acffaf"),
        ),
    ])
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            stocks_path: default_stocks_path(),
        }
    }
}

impl Default for CoursesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_html_len: default_max_html_len(),
            documents: default_documents(),
            course_documents: default_course_documents(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值；随后应用环境变量覆盖
    ///
    /// 此时日志尚未初始化，失败原因直接输出到 stderr
    pub fn load() -> Self {
        let config_paths = ["config.json", "config/config.json"];
        let mut config = None;

        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(mut loaded) => {
                        loaded.source = Some(PathBuf::from(path));
                        config = Some(loaded);
                        break;
                    }
                    Err(e) => {
                        eprintln!("加载配置文件 {} 失败: {}", path, e);
                    }
                }
            }
        }

        let mut config = config.unwrap_or_default();
        config.apply_env_overrides();
        config
    }

    /// STOCKS_PATH 覆盖数据文件路径，PORT 覆盖监听端口
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = env::var("STOCKS_PATH") {
            if !path.is_empty() {
                self.data.stocks_path = PathBuf::from(path);
            }
        }
        if let Ok(port) = env::var("PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => eprintln!("PORT 环境变量无效: {}", port),
            }
        }
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.data.stocks_path, PathBuf::from("data/psx_stocks.json"));
        assert_eq!(config.courses.max_html_len, 200_000);
        assert_eq!(config.courses.documents.len(), 3);
        assert!(config.courses.course_documents.contains_key("stock-trading"));
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "server": { "port": 8080 }, "data": { "stocks_path": "/srv/psx.json" } }"#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.data.stocks_path, PathBuf::from("/srv/psx.json"));
        assert_eq!(config.courses.timeout_secs, 30);
        assert!(config.source.is_none());
    }

    #[test]
    fn test_default_document_urls_are_cdn() {
        let config = CoursesConfig::default();
        for url in config.documents.values().chain(config.course_documents.values()) {
            assert!(url.starts_with("https://cdn.builder.io/o/assets%2F"));
            assert!(url.contains("alt=media&token="));
        }
    }
}

//! 课程文档服务
//!
//! 代理上游 CDN 上的 DOCX 课程文档，或在服务端转换为 HTML 返回

mod docx;

use anyhow::Result;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use crate::config::CoursesConfig;
use crate::error::AppError;

pub use docx::{docx_to_html, truncate_html};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// 文档集合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSet {
    /// /api/docs/{slug}
    Api,
    /// /courses/doc/{id}、/courses/html/{id}
    Course,
}

/// 拉取到的文档内容
#[derive(Debug)]
pub struct FetchedDocument {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// 课程文档服务
pub struct CourseDocService {
    client: Client,
    documents: HashMap<String, Url>,
    course_documents: HashMap<String, Url>,
    max_html_len: usize,
}

// 无效地址记录警告后忽略
fn parse_sources<'a>(entries: impl Iterator<Item = (&'a String, &'a String)>) -> HashMap<String, Url> {
    entries
        .filter_map(|(slug, raw)| match Url::parse(raw) {
            Ok(url) => Some((slug.clone(), url)),
            Err(e) => {
                log::warn!("课程文档 {} 地址无效，已忽略: {}", slug, e);
                None
            }
        })
        .collect()
}

impl CourseDocService {
    pub fn new(config: &CoursesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            documents: parse_sources(config.documents.iter()),
            course_documents: parse_sources(config.course_documents.iter()),
            max_html_len: config.max_html_len,
        })
    }

    /// 查找文档地址
    pub fn source(&self, set: DocumentSet, slug: &str) -> Option<&Url> {
        match set {
            DocumentSet::Api => self.documents.get(slug),
            DocumentSet::Course => self.course_documents.get(slug),
        }
    }

    /// 拉取原始文档
    pub async fn fetch(&self, set: DocumentSet, slug: &str) -> Result<FetchedDocument, AppError> {
        let url = self
            .source(set, slug)
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

        log::debug!("拉取课程文档 {} -> {}", slug, url);

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            log::error!("拉取课程文档 {} 失败: {}", slug, e);
            AppError::Internal("Error fetching document".to_string())
        })?;

        if !response.status().is_success() {
            log::warn!("课程文档 {} 上游返回 {}", slug, response.status());
            return Err(AppError::Upstream("Failed to fetch upstream document".to_string()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let bytes = response.bytes().await.map_err(|e| {
            log::error!("读取课程文档 {} 内容失败: {}", slug, e);
            AppError::Internal("Error fetching document".to_string())
        })?;

        Ok(FetchedDocument {
            content_type,
            bytes: bytes.to_vec(),
        })
    }

    /// 拉取课程文档并转换为 HTML（忽略图片，超长截断）
    pub async fn render_html(&self, id: &str) -> Result<String, AppError> {
        let document = self.fetch(DocumentSet::Course, id).await?;

        log::info!("转换课程文档 {} 为 HTML（{} 字节，忽略图片）", id, document.bytes.len());

        let html = docx_to_html(&document.bytes).map_err(|e| {
            log::error!("课程文档 {} 转换失败: {:#}", id, e);
            AppError::Conversion("Error converting document".to_string())
        })?;

        Ok(truncate_html(html, self.max_html_len))
    }
}

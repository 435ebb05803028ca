//! DOCX 转 HTML
//!
//! 只处理 word/document.xml 中的段落和文本：
//! - Heading1~6 / Title 样式转为 <h1>~<h6>
//! - 列表段落转为 <li>，连续的列表项包在 <ul> 中
//! - 加粗、斜体转为 <strong>、<em>
//! - 图片、表格样式等一律忽略

use anyhow::{anyhow, Result};
use regex::Regex;
use std::io::{Cursor, Read};
use std::sync::LazyLock;

/// 空文档时的占位内容
pub const EMPTY_DOCUMENT_HTML: &str = "<p>No content</p>";

/// 截断提示
pub const TRIMMED_NOTICE: &str =
    r#"<p class="text-muted-foreground">(Document trimmed for performance)</p>"#;

// ==================== WordprocessingML 匹配规则 ====================

static SELF_CLOSING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:[pr](?:\s[^>]*)?/>").expect("static pattern"));
static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:p(?:\s[^>]*)?>(.*?)</w:p>").expect("static pattern"));
static PARAGRAPH_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<w:pStyle\s+w:val="([^"]+)""#).expect("static pattern"));
static HEADING_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^heading\s*([1-6])$").expect("static pattern"));
static RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:r(?:\s[^>]*)?>(.*?)</w:r>").expect("static pattern"));
static RUN_PROPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:rPr>(.*?)</w:rPr>").expect("static pattern"));
static BOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<w:b(?:\s+w:val="(?:true|1|on)")?\s*/>"#).expect("static pattern")
});
static ITALIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<w:i(?:\s+w:val="(?:true|1|on)")?\s*/>"#).expect("static pattern")
});
// 文本、制表符、换行按出现顺序处理
static RUN_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab\s*/>|<w:(?:br|cr)(?:\s[^>]*)?/>")
        .expect("static pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParagraphKind {
    Heading(u8),
    ListItem,
    Normal,
}

fn paragraph_kind(body: &str) -> ParagraphKind {
    if let Some(style) = PARAGRAPH_STYLE.captures(body).and_then(|c| c.get(1)) {
        let style = style.as_str();
        if style.eq_ignore_ascii_case("title") {
            return ParagraphKind::Heading(1);
        }
        if let Some(level) = HEADING_STYLE
            .captures(style)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u8>().ok())
        {
            return ParagraphKind::Heading(level);
        }
        if style.contains("List") {
            return ParagraphKind::ListItem;
        }
    }

    if body.contains("<w:numPr>") {
        return ParagraphKind::ListItem;
    }

    ParagraphKind::Normal
}

// XML 文本节点本身已做实体转义，可直接作为 HTML 文本输出
fn convert_run(run: &str) -> String {
    let props = RUN_PROPS
        .captures(run)
        .and_then(|c| c.get(1))
        .map_or("", |m| m.as_str());

    let mut text = String::new();
    for cap in RUN_CONTENT.captures_iter(run) {
        match cap.get(1) {
            Some(t) => text.push_str(t.as_str()),
            None if cap[0].starts_with("<w:tab") => text.push('\t'),
            None => text.push_str("<br />"),
        }
    }

    if text.is_empty() {
        return text;
    }
    if ITALIC.is_match(props) {
        text = format!("<em>{}</em>", text);
    }
    if BOLD.is_match(props) {
        text = format!("<strong>{}</strong>", text);
    }
    text
}

/// 将 document.xml 内容转换为 HTML 片段
pub fn document_xml_to_html(xml: &str) -> String {
    let xml = SELF_CLOSING.replace_all(xml, "");
    let mut html = String::new();
    let mut in_list = false;

    for paragraph in PARAGRAPH.captures_iter(&xml) {
        let body = paragraph.get(1).map_or("", |m| m.as_str());
        let content: String = RUN
            .find_iter(body)
            .map(|run| convert_run(run.as_str()))
            .collect();

        // 跳过空段落
        if content.trim().is_empty() {
            continue;
        }

        match paragraph_kind(body) {
            ParagraphKind::ListItem => {
                if !in_list {
                    html.push_str("<ul>");
                    in_list = true;
                }
                html.push_str(&format!("<li>{}</li>", content));
            }
            kind => {
                if in_list {
                    html.push_str("</ul>");
                    in_list = false;
                }
                match kind {
                    ParagraphKind::Heading(level) => {
                        html.push_str(&format!("<h{0}>{1}</h{0}>", level, content))
                    }
                    _ => html.push_str(&format!("<p>{}</p>", content)),
                }
            }
        }
    }

    if in_list {
        html.push_str("</ul>");
    }
    html
}

/// 解包 DOCX 并转换正文为 HTML
pub fn docx_to_html(bytes: &[u8]) -> Result<String> {
    let cursor = Cursor::new(bytes);
    let mut archive =
        zip::ZipArchive::new(cursor).map_err(|e| anyhow!("打开 DOCX 文件失败: {}", e))?;

    let mut file = archive
        .by_name("word/document.xml")
        .map_err(|e| anyhow!("DOCX 中缺少 word/document.xml: {}", e))?;

    let mut xml = String::new();
    file.read_to_string(&mut xml)?;

    let html = document_xml_to_html(&xml);
    if html.is_empty() {
        return Ok(EMPTY_DOCUMENT_HTML.to_string());
    }
    Ok(html)
}

/// 超过 max_len 个字符时截断并追加提示
pub fn truncate_html(html: String, max_len: usize) -> String {
    match html.char_indices().nth(max_len) {
        Some((idx, _)) => {
            let mut trimmed = html[..idx].to_string();
            trimmed.push_str(TRIMMED_NOTICE);
            trimmed
        }
        None => html,
    }
}

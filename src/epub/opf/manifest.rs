//! 清单模块
//!
//! 提供EPUB包中文件清单的结构定义。

use crate::normalize::deserialize_one_or_many;
use serde::{Deserialize, Serialize};

/// 清单项信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestItem {
    /// 项目ID
    #[serde(rename = "@id", default)]
    pub id: String,
    /// 文件路径(相对于OPF文件)
    #[serde(rename = "@href", default)]
    pub href: String,
    /// 媒体类型
    #[serde(rename = "@media-type", default)]
    pub media_type: String,
    /// 属性(空格分隔，如nav、cover-image等)
    #[serde(rename = "@properties", default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<String>,
}

impl ManifestItem {
    /// 创建新的清单项
    pub fn new(id: impl Into<String>, href: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            href: href.into(),
            media_type: media_type.into(),
            properties: None,
        }
    }

    /// 创建带属性的清单项
    pub fn with_properties(
        id: impl Into<String>,
        href: impl Into<String>,
        media_type: impl Into<String>,
        properties: impl Into<String>,
    ) -> Self {
        Self {
            properties: Some(properties.into()),
            ..Self::new(id, href, media_type)
        }
    }

    /// 检查是否为HTML/XHTML内容文档
    pub fn is_html(&self) -> bool {
        self.media_type == "application/xhtml+xml" || self.media_type == "text/html"
    }
}

/// `<manifest>` 元素
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// 清单项，保持声明顺序
    #[serde(rename = "item", default, deserialize_with = "deserialize_one_or_many")]
    pub items: Vec<ManifestItem>,
}

impl Manifest {
    /// 根据ID获取第一个匹配的清单项的位置
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

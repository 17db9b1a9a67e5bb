//! 出版物清单（Publication Manifest）的输出结构

use crate::epub::error::Result;
use crate::normalize::OneOrMany;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

/// 固定的JSON-LD上下文
pub const PM_CONTEXT: [&str; 2] = ["https://schema.org", "https://www.w3.org/ns/pub-context"];

/// 人员，输出为 `{"type": "Person", "name": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Person {
    pub name: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// 带类型信息的资源链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct LinkedResource {
    pub url: String,
    pub encoding_format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
}

/// readingOrder和resources中的条目：裸URL或LinkedResource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceEntry {
    Url(String),
    Linked(LinkedResource),
}

/// 角色值：恰好一个人时为单个Person，否则为Person数组
pub type RoleValue = OneOrMany<Person>;

/// W3C出版物清单
///
/// 字段按输出顺序声明；缺失的可选字段不会出现在JSON中。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationManifest {
    #[serde(rename = "@context")]
    pub context: [&'static str; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub url: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_progression: Option<String>,
    /// 每个角色一个字段，按角色首次出现的顺序输出
    #[serde(flatten)]
    pub roles: IndexMap<String, RoleValue>,
    pub reading_order: Vec<ResourceEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceEntry>,
}

impl Default for PublicationManifest {
    fn default() -> Self {
        Self {
            context: PM_CONTEXT,
            id: None,
            url: Vec::new(),
            name: None,
            date_published: None,
            date_modified: None,
            in_language: None,
            reading_progression: None,
            roles: IndexMap::new(),
            reading_order: Vec::new(),
            resources: Vec::new(),
        }
    }
}

impl PublicationManifest {
    /// 创建只含`@context`的空清单
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取指定角色的值
    pub fn role(&self, role: &str) -> Option<&RoleValue> {
        self.roles.get(role)
    }

    /// 序列化为JSON文本
    ///
    /// # 参数
    /// * `indent` - 缩进空格数，0表示紧凑输出
    pub fn to_json_string(&self, indent: usize) -> Result<String> {
        if indent == 0 {
            return Ok(serde_json::to_string(self)?);
        }

        let indent = " ".repeat(indent);
        let mut out = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

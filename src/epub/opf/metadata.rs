//! 元数据模块
//!
//! 提供OPF `<metadata>` 部分的记录类型。字段名与XML转JSON约定一致：
//! 属性以`@`为前缀，文本内容为`#text`。

use crate::normalize::deserialize_one_or_many;
use serde::{Deserialize, Serialize};

/// Dublin Core元素(`dc:identifier`、`dc:creator`、`dc:title`等)
///
/// 没有属性的元素在JSON中是一个裸字符串，带属性时是`{"@id": ..., "#text": ...}`对象。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDcElement", into = "RawDcElement")]
pub struct DcElement {
    /// 元素ID（用于unique-identifier和refines关联）
    pub id: Option<String>,
    /// 元素文本内容
    pub text: Option<String>,
}

/// 标识符条目
pub type IdentifierEntry = DcElement;

/// 创建者/贡献者条目
pub type PersonEntry = DcElement;

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawDcElement {
    Text(String),
    Node {
        #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(rename = "#text", default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
}

impl From<RawDcElement> for DcElement {
    fn from(raw: RawDcElement) -> Self {
        match raw {
            RawDcElement::Text(text) => DcElement { id: None, text: Some(text) },
            RawDcElement::Node { id, text } => DcElement { id, text },
        }
    }
}

impl From<DcElement> for RawDcElement {
    fn from(element: DcElement) -> Self {
        match element {
            DcElement { id: None, text: Some(text) } => RawDcElement::Text(text),
            DcElement { id, text } => RawDcElement::Node { id, text },
        }
    }
}

impl DcElement {
    /// 创建不带ID的元素
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: Some(text.into()),
        }
    }

    /// 创建带ID的元素
    pub fn with_id(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            text: Some(text.into()),
        }
    }

    /// 文本内容，缺失时为空字符串
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

/// `<meta>` 元素
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaEntry {
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// property属性值（如role、dcterms:modified）
    #[serde(rename = "@property", default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// 被精化元素的引用（带#前缀）
    #[serde(rename = "@refines", default, skip_serializing_if = "Option::is_none")]
    pub refines: Option<String>,
    /// scheme属性（如marc:relators）
    #[serde(rename = "@scheme", default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(rename = "#text", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl MetaEntry {
    /// 创建基于property的meta
    pub fn property(property: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            property: Some(property.into()),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// 创建role精化meta，如 `<meta refines="#creator" property="role" scheme="marc:relators">aut</meta>`
    pub fn role_refinement(refines: impl Into<String>, role: impl Into<String>, scheme: Option<&str>) -> Self {
        Self {
            property: Some("role".to_string()),
            refines: Some(refines.into()),
            scheme: scheme.map(str::to_string),
            text: Some(role.into()),
            ..Default::default()
        }
    }

    /// 检查property是否为指定值
    pub fn has_property(&self, property: &str) -> bool {
        self.property.as_deref() == Some(property)
    }

    /// 是否为角色精化：refines非空且property为role
    pub fn is_role_refinement(&self) -> bool {
        self.refines.as_deref().is_some_and(|r| !r.is_empty()) && self.has_property("role")
    }

    /// 是否精化指定ID的元素
    pub fn refines_id(&self, id: &str) -> bool {
        self.refines
            .as_deref()
            .and_then(|r| r.strip_prefix('#'))
            .is_some_and(|r| r == id)
    }
}

/// OPF文件中的元数据信息
///
/// 所有"一个或多个"字段在反序列化时就被归一化为有序序列。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "dc:identifier", default, deserialize_with = "deserialize_one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<IdentifierEntry>,
    #[serde(rename = "dc:title", default, deserialize_with = "deserialize_one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub titles: Vec<DcElement>,
    #[serde(rename = "dc:date", default, deserialize_with = "deserialize_one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub dates: Vec<DcElement>,
    #[serde(rename = "dc:language", default, deserialize_with = "deserialize_one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<DcElement>,
    #[serde(rename = "dc:creator", default, deserialize_with = "deserialize_one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<PersonEntry>,
    #[serde(rename = "dc:contributor", default, deserialize_with = "deserialize_one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<PersonEntry>,
    #[serde(rename = "meta", default, deserialize_with = "deserialize_one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub metas: Vec<MetaEntry>,
}

impl Metadata {
    /// 创建空的元数据
    pub fn new() -> Self {
        Self::default()
    }

    /// 按文档顺序查找第一个property为指定值的meta
    pub fn find_meta_by_property(&self, property: &str) -> Option<&MetaEntry> {
        self.metas.iter().find(|meta| meta.has_property(property))
    }

    /// 获取所有角色精化meta（保持文档顺序）
    pub fn role_refinements(&self) -> Vec<&MetaEntry> {
        self.metas.iter().filter(|meta| meta.is_role_refinement()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dc_element_from_bare_string_and_object() {
        let bare: DcElement = serde_json::from_str(r#""Jane Doe""#).unwrap();
        assert_eq!(bare, DcElement::new("Jane Doe"));

        let node: DcElement = serde_json::from_str(r##"{"@id": "c1", "#text": "Jane Doe"}"##).unwrap();
        assert_eq!(node, DcElement::with_id("c1", "Jane Doe"));

        // 未知属性（如xml:lang）被忽略
        let lang: DcElement = serde_json::from_str(r##"{"@xml:lang": "en", "#text": "Title"}"##).unwrap();
        assert_eq!(lang.id, None);
        assert_eq!(lang.text_or_empty(), "Title");
    }

    #[test]
    fn test_dc_element_serializes_back_to_same_shape() {
        assert_eq!(serde_json::to_string(&DcElement::new("x")).unwrap(), r#""x""#);
        assert_eq!(
            serde_json::to_string(&DcElement::with_id("i", "x")).unwrap(),
            r##"{"@id":"i","#text":"x"}"##
        );
    }

    #[test]
    fn test_metadata_normalizes_multiplicity() {
        let json = r##"{
            "dc:title": "Only Title",
            "dc:creator": [{"@id": "a1", "#text": "A"}, "B"],
            "meta": {"@property": "dcterms:modified", "#text": "2024-01-01T00:00:00Z"}
        }"##;
        let metadata: Metadata = serde_json::from_str(json).unwrap();

        assert_eq!(metadata.titles, vec![DcElement::new("Only Title")]);
        assert_eq!(metadata.creators.len(), 2);
        assert!(metadata.contributors.is_empty());
        assert_eq!(metadata.metas.len(), 1);
        assert_eq!(
            metadata.find_meta_by_property("dcterms:modified").and_then(|m| m.text.as_deref()),
            Some("2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn test_role_refinement_filter() {
        let mut metadata = Metadata::new();
        metadata.metas.push(MetaEntry::role_refinement("#c1", "aut", Some("marc:relators")));
        metadata.metas.push(MetaEntry::property("dcterms:modified", "2024"));
        metadata.metas.push(MetaEntry::role_refinement("", "trl", None));
        metadata.metas.push(MetaEntry {
            refines: Some("#c1".to_string()),
            property: Some("file-as".to_string()),
            text: Some("Doe, Jane".to_string()),
            ..Default::default()
        });

        let refinements = metadata.role_refinements();
        assert_eq!(refinements.len(), 1);
        assert!(refinements[0].refines_id("c1"));
        assert!(!refinements[0].refines_id("c2"));
    }
}

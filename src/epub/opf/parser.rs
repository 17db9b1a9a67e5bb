//! OPF解析器模块
//!
//! 提供OPF（Open Packaging Format）文件的解析功能。XML和"属性对象"形式的JSON
//! 两种输入都被转换为同一组类型化记录。

use crate::epub::error::{EpubError, Result};
use crate::epub::opf::{
    manifest::{Manifest, ManifestItem},
    metadata::{DcElement, MetaEntry, Metadata},
    spine::{Spine, SpineItemRef},
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 解析后的OPF包文档
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpfDocument {
    pub package: Package,
}

/// `<package>` 根元素
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// EPUB版本，转换不使用，只在跟踪输出和JSON往返中保留
    #[serde(rename = "@version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// 指向规范标识符的ID
    #[serde(rename = "@unique-identifier", default, skip_serializing_if = "Option::is_none")]
    pub unique_identifier: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub manifest: Manifest,
    #[serde(default)]
    pub spine: Spine,
}

/// 当前所在的OPF部分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Outside,
    Metadata,
    Manifest,
    Spine,
}

/// metadata中正在收集文本的元素
#[derive(Debug)]
enum PendingElement {
    Identifier(DcElement),
    Title(DcElement),
    Date(DcElement),
    Language(DcElement),
    Creator(DcElement),
    Contributor(DcElement),
    Meta(MetaEntry),
}

impl OpfDocument {
    /// 解析OPF文件的XML内容
    ///
    /// # 参数
    /// * `xml_content` - OPF文件的XML内容
    ///
    /// # 返回值
    /// * `Result<OpfDocument>` - 解析后的包文档；没有`<package>`根元素时返回`InvalidPackage`
    pub fn parse_xml(xml_content: &str) -> Result<OpfDocument> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);
        reader.config_mut().expand_empty_elements = true;

        let mut package: Option<Package> = None;
        let mut section = Section::Outside;
        let mut pending: Option<PendingElement> = None;
        let mut text_content = String::new();
        let mut buf = Vec::new();
        // 当前元素的嵌套深度，package为0，其直接子元素为1
        let mut depth = 0usize;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    let level = depth;
                    depth += 1;
                    let local_name = e.local_name();
                    match (section, local_name.as_ref()) {
                        (_, b"package") if level == 0 => {
                            let attributes = Self::collect_attributes(e)?;
                            package = Some(Package {
                                version: attributes.get("version").cloned(),
                                unique_identifier: attributes.get("unique-identifier").cloned(),
                                ..Default::default()
                            });
                        }
                        // collection等元素内的metadata/manifest不属于包级数据
                        (Section::Outside, b"metadata") if level == 1 => section = Section::Metadata,
                        (Section::Outside, b"manifest") if level == 1 => section = Section::Manifest,
                        (Section::Outside, b"spine") if level == 1 => {
                            section = Section::Spine;
                            let attributes = Self::collect_attributes(e)?;
                            if let Some(package) = package.as_mut() {
                                package.spine.page_progression_direction =
                                    attributes.get("page-progression-direction").cloned();
                            }
                        }
                        (Section::Metadata, name) => {
                            pending = Self::start_metadata_element(name, e)?;
                            text_content.clear();
                        }
                        (Section::Manifest, b"item") => {
                            if let Some(package) = package.as_mut() {
                                package.manifest.items.push(Self::parse_manifest_item(e)?);
                            }
                        }
                        (Section::Spine, b"itemref") => {
                            let attributes = Self::collect_attributes(e)?;
                            if let (Some(package), Some(idref)) = (package.as_mut(), attributes.get("idref")) {
                                package.spine.itemrefs.push(SpineItemRef::new(idref.clone()));
                            }
                        }
                        _ => {}
                    }
                }
                Event::End(ref e) => {
                    depth = depth.saturating_sub(1);
                    let local_name = e.local_name();
                    match local_name.as_ref() {
                        b"metadata" | b"manifest" | b"spine" if depth == 1 => {
                            section = Section::Outside;
                        }
                        _ if section == Section::Metadata => {
                            if let (Some(element), Some(package)) = (pending.take(), package.as_mut()) {
                                Self::finish_metadata_element(element, &text_content, &mut package.metadata);
                            }
                            text_content.clear();
                        }
                        _ => {}
                    }
                }
                Event::Text(e) => {
                    if pending.is_some() {
                        text_content.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if pending.is_some() {
                        text_content.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        package
            .map(|package| OpfDocument { package })
            .ok_or_else(|| EpubError::InvalidPackage("没有找到package根元素".to_string()))
    }

    /// 从"属性对象"形式的JSON解析包文档
    ///
    /// 属性以`@`为前缀，文本为`#text`，重复元素可以是单个值或数组。
    pub fn from_json(json: &str) -> Result<OpfDocument> {
        Ok(serde_json::from_str(json)?)
    }

    /// 以"属性对象"形式输出包文档（用于跟踪输出）
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 收集元素的所有属性，键为去掉命名空间前缀的本地名称
    fn collect_attributes(e: &BytesStart) -> Result<HashMap<String, String>> {
        let mut attributes = HashMap::new();
        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
            let value = attr.unescape_value()?.to_string();
            attributes.insert(key, value);
        }
        Ok(attributes)
    }

    /// 处理metadata子元素的开始标签
    ///
    /// 注意：匹配使用本地名称，`<dc:title>` 按 "title" 处理
    fn start_metadata_element(name: &[u8], e: &BytesStart) -> Result<Option<PendingElement>> {
        let attributes = Self::collect_attributes(e)?;
        let element = DcElement {
            id: attributes.get("id").cloned(),
            text: None,
        };

        let pending = match name {
            b"identifier" => PendingElement::Identifier(element),
            b"title" => PendingElement::Title(element),
            b"date" => PendingElement::Date(element),
            b"language" => PendingElement::Language(element),
            b"creator" => PendingElement::Creator(element),
            b"contributor" => PendingElement::Contributor(element),
            b"meta" => PendingElement::Meta(MetaEntry {
                id: element.id,
                property: attributes.get("property").cloned(),
                refines: attributes.get("refines").cloned(),
                scheme: attributes.get("scheme").cloned(),
                text: None,
            }),
            _ => return Ok(None),
        };
        Ok(Some(pending))
    }

    /// 处理metadata子元素的结束标签，把收集到的文本写入元数据
    fn finish_metadata_element(element: PendingElement, text_content: &str, metadata: &mut Metadata) {
        let content = text_content.trim();
        let text = (!content.is_empty()).then(|| content.to_string());

        match element {
            PendingElement::Identifier(e) => metadata.identifiers.push(DcElement { text, ..e }),
            PendingElement::Title(e) => metadata.titles.push(DcElement { text, ..e }),
            PendingElement::Date(e) => metadata.dates.push(DcElement { text, ..e }),
            PendingElement::Language(e) => metadata.languages.push(DcElement { text, ..e }),
            PendingElement::Creator(e) => metadata.creators.push(DcElement { text, ..e }),
            PendingElement::Contributor(e) => metadata.contributors.push(DcElement { text, ..e }),
            PendingElement::Meta(meta) => metadata.metas.push(MetaEntry { text, ..meta }),
        }
    }

    /// 解析清单项
    fn parse_manifest_item(e: &BytesStart) -> Result<ManifestItem> {
        let mut attributes = Self::collect_attributes(e)?;
        Ok(ManifestItem {
            id: attributes.remove("id").unwrap_or_default(),
            href: attributes.remove("href").unwrap_or_default(),
            media_type: attributes.remove("media-type").unwrap_or_default(),
            properties: attributes.remove("properties"),
        })
    }
}

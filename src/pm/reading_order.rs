//! 阅读顺序与资源合并
//!
//! 按文档顺序遍历spine，把每个itemref关联到清单项；被引用的清单项进入`readingOrder`，
//! 其余清单项按声明顺序进入`resources`。

use crate::epub::opf::{Manifest, ManifestItem, Spine};
use crate::pm::model::{LinkedResource, PublicationManifest, ResourceEntry};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::debug;

/// 清单项properties到rel的映射，映射为空字符串的属性在输出中被丢弃
static PROPERTY_RELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("cover-image", "cover"),
        ("mathml", ""),
        ("nav", "content"),
        ("remote-resources", ""),
        ("scripted", ""),
        ("svg", ""),
    ])
});

/// 由properties属性计算rel
///
/// 按单个空格拆分，逐个映射（未知属性映射为空字符串），再用单个空格连接并去掉首尾空白。
/// 结果为空时返回None。
pub fn rel_for_properties(properties: &str) -> Option<String> {
    let rel = properties
        .split(' ')
        .map(|property| PROPERTY_RELS.get(property).copied().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ");
    let rel = rel.trim();
    (!rel.is_empty()).then(|| rel.to_string())
}

/// 把清单项转换为readingOrder/resources条目
///
/// 没有properties的HTML/XHTML文档输出为裸href，其他清单项输出为LinkedResource。
pub fn create_resource(item: &ManifestItem) -> ResourceEntry {
    if item.properties.is_none() && item.is_html() {
        return ResourceEntry::Url(item.href.clone());
    }

    ResourceEntry::Linked(LinkedResource {
        url: item.href.clone(),
        encoding_format: item.media_type.clone(),
        rel: item.properties.as_deref().and_then(rel_for_properties),
    })
}

/// 合并spine和manifest，填写`readingOrder`和`resources`
pub(crate) fn merge_reading_order(manifest: &Manifest, spine: &Spine, output: &mut PublicationManifest) {
    let mut consumed = vec![false; manifest.items.len()];
    let mut reading_order = Vec::with_capacity(spine.itemrefs.len());

    for itemref in &spine.itemrefs {
        match manifest.position(&itemref.idref) {
            Some(index) => {
                reading_order.push(create_resource(&manifest.items[index]));
                consumed[index] = true;
            }
            None => {
                debug!(idref = %itemref.idref, "spine项没有对应的清单项，已跳过");
            }
        }
    }

    output.reading_order = reading_order;
    output.resources = manifest
        .items
        .iter()
        .zip(&consumed)
        .filter(|(_, done)| !**done)
        .map(|(item, _)| create_resource(item))
        .collect();
}

//! 脊柱模块
//!
//! 提供EPUB包中阅读顺序（脊柱）的结构定义。

use crate::normalize::deserialize_one_or_many;
use serde::{Deserialize, Serialize};

/// 脊柱项信息(阅读顺序)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpineItemRef {
    /// 引用的清单项ID
    #[serde(rename = "@idref", default)]
    pub idref: String,
}

impl SpineItemRef {
    /// 创建新的脊柱项
    pub fn new(idref: impl Into<String>) -> Self {
        Self { idref: idref.into() }
    }
}

/// `<spine>` 元素
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spine {
    /// 翻页方向（ltr、rtl、default），原样保留
    #[serde(rename = "@page-progression-direction", default, skip_serializing_if = "Option::is_none")]
    pub page_progression_direction: Option<String>,
    /// 脊柱项，顺序即阅读顺序
    #[serde(rename = "itemref", default, deserialize_with = "deserialize_one_or_many")]
    pub itemrefs: Vec<SpineItemRef>,
}

//! 核心元数据投影
//!
//! 单值字段只取文档顺序中的第一个值，其余值被忽略。

use crate::epub::opf::{DcElement, Metadata, Spine};
use crate::pm::model::PublicationManifest;

/// dcterms:modified对应的meta property
const MODIFIED_PROPERTY: &str = "dcterms:modified";

/// 取第一个元素的文本
fn first_text(values: &[DcElement]) -> Option<String> {
    values.first().and_then(|value| value.text.clone())
}

/// 复制标题、出版日期、修改日期和语言
pub(crate) fn project_core_metadata(metadata: &Metadata, output: &mut PublicationManifest) {
    output.name = first_text(&metadata.titles);
    output.date_published = first_text(&metadata.dates);
    output.date_modified = metadata
        .find_meta_by_property(MODIFIED_PROPERTY)
        .and_then(|meta| meta.text.clone());
    output.in_language = first_text(&metadata.languages);
}

/// 原样复制spine的page-progression-direction
pub(crate) fn extract_reading_progression(spine: &Spine, output: &mut PublicationManifest) {
    output.reading_progression = spine.page_progression_direction.clone();
}

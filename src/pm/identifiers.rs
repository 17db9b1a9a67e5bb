//! 标识符解析
//!
//! unique-identifier指向的dc:identifier成为`id`，其余标识符全部进入`url`。

use crate::epub::opf::Package;
use crate::pm::model::PublicationManifest;
use tracing::debug;

/// 解析出版物标识符
///
/// 没有unique-identifier属性时不做任何处理；没有匹配项时`id`保持为空，
/// 但其余标识符仍然进入`url`。
pub(crate) fn resolve_identifiers(package: &Package, output: &mut PublicationManifest) {
    let Some(unique_identifier) = package.unique_identifier.as_deref().filter(|uid| !uid.is_empty()) else {
        return;
    };

    let mut matched = false;
    let mut urls = Vec::new();
    for identifier in &package.metadata.identifiers {
        if identifier.id.as_deref() == Some(unique_identifier) {
            matched = true;
            output.id = identifier.text.clone();
        } else if let Some(text) = &identifier.text {
            urls.push(text.clone());
        }
    }

    if !matched {
        debug!(unique_identifier, "没有与unique-identifier匹配的dc:identifier");
    }
    if !urls.is_empty() {
        output.url = urls;
    }
}

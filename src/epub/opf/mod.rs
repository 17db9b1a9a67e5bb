//! OPF（Open Packaging Format）文件解析模块
//!
//! 此模块把EPUB中的OPF包文件解析为类型化记录：元数据、清单和脊柱。

mod manifest;
mod metadata;
mod parser;
mod spine;

// 重新导出公共类型
pub use manifest::{Manifest, ManifestItem};
pub use metadata::{DcElement, IdentifierEntry, MetaEntry, Metadata, PersonEntry};
pub use parser::{OpfDocument, Package};
pub use spine::{Spine, SpineItemRef};

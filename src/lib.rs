pub mod config;
pub mod epub;
pub mod normalize;
pub mod pm;

use std::fs;
use std::path::Path;

// === 核心API重新导出 ===

/// OPF到出版物清单的转换函数
pub use pm::convert;

/// 错误处理
pub use epub::{EpubError, Result};

/// 配置
pub use config::ConvertConfig;

// === 数据结构 ===

/// 输入：OPF包文档
pub use epub::{
    DcElement,
    IdentifierEntry,
    Manifest,
    ManifestItem,
    MetaEntry,
    Metadata,
    OpfDocument,
    Package,
    PersonEntry,
    Spine,
    SpineItemRef,
};

/// 输出：出版物清单
pub use pm::{LinkedResource, Person, PublicationManifest, ResourceEntry, RoleValue};

// === 底层组件（高级用法） ===

/// EPUB容器组件
pub use epub::{Container, Epub, RootFile};

/// 多重性归一化
pub use normalize::{OneOrMany, add_value, to_array};

// === 库信息 ===

/// 库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库的描述
pub const DESCRIPTION: &str = "将EPUB包文档转换为W3C出版物清单";

// === 便捷函数 ===

/// 按文件扩展名加载OPF包文档
///
/// * `.opf` / `.xml` - OPF的XML文本
/// * `.epub` - EPUB容器，通过`META-INF/container.xml`定位OPF
/// * `.json` - 已经转换为"属性对象"形式的包文档
///
/// # 参数
/// * `path` - 输入文件路径
///
/// # 返回值
/// * `Result<OpfDocument>` - 包文档；其他扩展名返回`UnsupportedFormat`
pub fn load_package<P: AsRef<Path>>(path: P) -> Result<OpfDocument> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("opf") | Some("xml") => {
            let content = fs::read_to_string(path)?;
            OpfDocument::parse_xml(&content).map_err(EpubError::into_package_error)
        }
        Some("epub") => Epub::from_path(path)?.package_document(),
        Some("json") => {
            let content = fs::read_to_string(path)?;
            OpfDocument::from_json(&content)
        }
        _ => Err(EpubError::UnsupportedFormat(path.display().to_string())),
    }
}

/// 加载文件并转换为出版物清单
///
/// # 示例
///
/// ```no_run
/// let manifest = epd2pm::convert_file("book.epub")?;
/// println!("{}", manifest.to_json_string(4)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<PublicationManifest> {
    let document = load_package(path)?;
    Ok(convert(&document))
}

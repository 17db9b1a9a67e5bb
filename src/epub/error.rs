use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EpubError>;

/// 读取EPUB/OPF输入时可能出现的错误类型
///
/// 转换核心本身不会产生错误，所有错误都来自输入加载阶段。
#[derive(Error, Debug)]
pub enum EpubError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("Zip文件错误: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML解析错误: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("JSON处理错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("无效的EPUB容器: {0}")]
    InvalidContainer(String),

    #[error("无效的包文档: {0}")]
    InvalidPackage(String),

    #[error("不支持的文件类型: {0}。支持的格式: .opf, .xml, .epub, .json")]
    UnsupportedFormat(String),

    #[error("配置文件错误: {0}")]
    ConfigError(String),
}

impl EpubError {
    /// 把OPF内容的XML解析错误归类为`InvalidPackage`，其他错误保持不变
    pub fn into_package_error(self) -> EpubError {
        match self {
            EpubError::XmlError(xml_err) => EpubError::InvalidPackage(format!("XML解析错误: {}", xml_err)),
            other => other,
        }
    }
}

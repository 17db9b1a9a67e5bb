//! 转换配置模块
//!
//! 提供命令行工具的配置管理功能，支持从YAML文件加载配置。

use crate::epub::error::{EpubError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "epd2pm.yaml";

/// 转换配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// 输出JSON的缩进空格数，0表示紧凑输出
    pub indent: usize,
    /// 是否把解析后的包文档输出到标准错误
    pub trace: bool,
    /// 日志过滤指令（tracing EnvFilter语法）
    pub log_level: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl ConvertConfig {
    /// 获取默认配置
    pub fn default_config() -> Self {
        Self {
            indent: 4,
            trace: false,
            log_level: "warn".to_string(),
        }
    }

    /// 从指定的YAML文件加载配置
    ///
    /// 文件中缺少的字段使用默认值
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use epd2pm::ConvertConfig;
    /// let config = ConvertConfig::from_file("epd2pm.yaml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| EpubError::ConfigError(format!("无法读取配置文件: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// 从YAML文本解析配置
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yml::from_str(content).map_err(|e| EpubError::ConfigError(format!("配置文件格式错误: {}", e)))
    }

    /// 把默认配置写入指定文件
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use epd2pm::ConvertConfig;
    /// ConvertConfig::generate_default_config("epd2pm.yaml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let yaml_content = serde_yml::to_string(&Self::default_config())
            .map_err(|e| EpubError::ConfigError(format!("序列化配置失败: {}", e)))?;

        let content_with_header = format!(
            "# epd2pm 配置文件\n# indent: 输出JSON的缩进空格数(0为紧凑输出)\n# trace: 是否输出解析后的包文档\n# log_level: 日志过滤指令\n\n{}",
            yaml_content
        );

        fs::write(path.as_ref(), content_with_header)
            .map_err(|e| EpubError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }

    /// 加载配置：给出路径时从文件读取，否则使用默认配置
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default_config()),
        }
    }
}

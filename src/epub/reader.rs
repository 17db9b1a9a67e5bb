use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::{debug, info, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::epub::container::Container;
use crate::epub::error::{EpubError, Result};
use crate::epub::opf::OpfDocument;

/// EPUB容器描述文件的位置
const CONTAINER_PATH: &str = "META-INF/container.xml";

/// EPUB文件期望的mimetype内容
const EPUB_MIMETYPE: &str = "application/epub+zip";

/// 表示一个EPUB文件
pub struct Epub<R: Read + Seek = File> {
    archive: ZipArchive<R>,
}

impl Epub<File> {
    /// 从文件路径创建Epub实例
    ///
    /// # 参数
    /// * `path` - epub文件的路径
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl Epub<Cursor<Vec<u8>>> {
    /// 从内存中的EPUB数据创建Epub实例
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> Epub<R> {
    /// 从任意可读可定位的数据源创建Epub实例
    ///
    /// mimetype不正确时只记录警告，不会失败
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;

        let mut epub = Epub { archive };
        epub.check_mimetype()?;

        Ok(epub)
    }

    /// 检查mimetype文件是否存在且内容为"application/epub+zip"
    fn check_mimetype(&mut self) -> Result<()> {
        match self.read_file("mimetype")? {
            Some(content) if content.trim() == EPUB_MIMETYPE => {
                debug!("mimetype校验通过");
            }
            Some(content) => {
                warn!(expected = EPUB_MIMETYPE, found = content.trim(), "EPUB的mimetype不正确");
            }
            None => {
                warn!("EPUB缺少mimetype文件");
            }
        }
        Ok(())
    }

    /// 读取指定文件的文本内容
    ///
    /// # 参数
    /// * `filename` - 压缩包内的文件路径
    ///
    /// # 返回值
    /// * `Result<Option<String>>` - 文件内容，文件不存在或为目录时返回None
    pub fn read_file(&mut self, filename: &str) -> Result<Option<String>> {
        match self.archive.by_name(filename) {
            Ok(mut file) => {
                if file.is_dir() {
                    return Ok(None);
                }
                let mut content = String::new();
                file.read_to_string(&mut content)?;
                Ok(Some(content))
            }
            Err(ZipError::FileNotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 解析container.xml文件
    pub fn parse_container(&mut self) -> Result<Container> {
        let container_content = self
            .read_file(CONTAINER_PATH)?
            .ok_or_else(|| EpubError::InvalidContainer(format!("缺少{}", CONTAINER_PATH)))?;
        Container::parse_xml(&container_content)
    }

    /// 获取主要的OPF文件路径
    pub fn get_opf_path(&mut self) -> Result<String> {
        let container = self.parse_container()?;

        container
            .get_opf_path()
            .ok_or_else(|| EpubError::InvalidContainer("container.xml中没有找到OPF文件路径".to_string()))
    }

    /// 读取并解析OPF包文档
    ///
    /// # 返回值
    /// * `Result<OpfDocument>` - 解析后的包文档；OPF文件缺失、无法读取或无法解析时返回`InvalidPackage`
    pub fn package_document(&mut self) -> Result<OpfDocument> {
        let opf_path = self.get_opf_path()?;
        info!(path = %opf_path, "读取OPF文件");

        let opf_content = match self.read_file(&opf_path) {
            Ok(Some(content)) => content,
            Ok(None) => {
                return Err(EpubError::InvalidPackage(format!("无法读取OPF文件: {}", opf_path)));
            }
            Err(e) => {
                return Err(EpubError::InvalidPackage(format!("无法读取OPF文件 {}: {}", opf_path, e)));
            }
        };

        OpfDocument::parse_xml(&opf_content).map_err(EpubError::into_package_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    const CONTAINER_XML: &str = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
    <rootfiles>
        <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
    </rootfiles>
</container>"#;

    const OPF_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package version="3.0" xmlns="http://www.idpf.org/2007/opf" unique-identifier="BookId">
    <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
        <dc:title>测试书籍</dc:title>
        <dc:creator>测试作者</dc:creator>
        <dc:language>zh-CN</dc:language>
        <dc:identifier id="BookId">978-1234567890</dc:identifier>
    </metadata>
    <manifest>
        <item id="chapter1" href="text/chapter1.xhtml" media-type="application/xhtml+xml"/>
        <item id="chapter2" href="text/chapter2.xhtml" media-type="application/xhtml+xml"/>
    </manifest>
    <spine>
        <itemref idref="chapter1"/>
        <itemref idref="chapter2"/>
    </spine>
</package>"#;

    /// 在内存中创建测试用EPUB，entries为(文件名, 内容)
    fn build_epub(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            zip.start_file(*name, FileOptions::<()>::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_package_document_from_epub() {
        let bytes = build_epub(&[
            ("mimetype", EPUB_MIMETYPE),
            (CONTAINER_PATH, CONTAINER_XML),
            ("OEBPS/content.opf", OPF_XML),
        ]);

        let mut epub = Epub::from_bytes(bytes).unwrap();
        assert_eq!(epub.get_opf_path().unwrap(), "OEBPS/content.opf");

        let doc = epub.package_document().unwrap();
        assert_eq!(doc.package.unique_identifier.as_deref(), Some("BookId"));
        assert_eq!(doc.package.metadata.titles[0].text_or_empty(), "测试书籍");
        assert_eq!(doc.package.manifest.items.len(), 2);
        assert_eq!(doc.package.spine.itemrefs.len(), 2);
    }

    #[test]
    fn test_invalid_mimetype_is_tolerated() {
        let bytes = build_epub(&[
            ("mimetype", "invalid/mimetype"),
            (CONTAINER_PATH, CONTAINER_XML),
            ("OEBPS/content.opf", OPF_XML),
        ]);

        let mut epub = Epub::from_bytes(bytes).unwrap();
        assert!(epub.package_document().is_ok());
    }

    #[test]
    fn test_missing_container() {
        let bytes = build_epub(&[("mimetype", EPUB_MIMETYPE), ("OEBPS/content.opf", OPF_XML)]);

        let mut epub = Epub::from_bytes(bytes).unwrap();
        let result = epub.package_document();
        assert!(matches!(result, Err(EpubError::InvalidContainer(_))));
    }

    #[test]
    fn test_missing_opf() {
        let bytes = build_epub(&[("mimetype", EPUB_MIMETYPE), (CONTAINER_PATH, CONTAINER_XML)]);

        let mut epub = Epub::from_bytes(bytes).unwrap();
        match epub.package_document() {
            Err(EpubError::InvalidPackage(message)) => assert!(message.contains("OEBPS/content.opf")),
            other => panic!("期望InvalidPackage错误, 实际: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_not_a_zip() {
        let result = Epub::from_bytes(b"definitely not a zip".to_vec());
        assert!(matches!(result, Err(EpubError::Zip(_))));
    }
}

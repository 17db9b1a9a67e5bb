//! 出版物清单（Publication Manifest）转换模块
//!
//! 把解析后的OPF包文档转换为W3C出版物清单。转换是纯函数：不做I/O，不返回错误，
//! 输入中缺失或无法匹配的部分只会让输出缺少对应字段。

mod identifiers;
mod metadata;
mod model;
mod reading_order;
mod roles;

pub use model::{LinkedResource, PM_CONTEXT, Person, PublicationManifest, ResourceEntry, RoleValue};
pub use reading_order::{create_resource, rel_for_properties};
pub use roles::{CONTRIBUTOR_ROLE, CREATOR_ROLE, RoleAssignment, Vocabulary};

use crate::epub::opf::OpfDocument;

/// 把OPF包文档转换为出版物清单
///
/// # 参数
/// * `document` - 解析后的OPF包文档
///
/// # 返回值
/// * `PublicationManifest` - 新建的出版物清单，每次调用互不影响
pub fn convert(document: &OpfDocument) -> PublicationManifest {
    let package = &document.package;
    let mut output = PublicationManifest::new();

    identifiers::resolve_identifiers(package, &mut output);
    metadata::project_core_metadata(&package.metadata, &mut output);
    metadata::extract_reading_progression(&package.spine, &mut output);
    roles::resolve_roles(&package.metadata, &mut output);
    reading_order::merge_reading_order(&package.manifest, &package.spine, &mut output);

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const FULL_OPF: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid">
    <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
        <dc:identifier id="uid">urn:uuid:A1B2C3</dc:identifier>
        <dc:identifier id="isbn">urn:isbn:9780000000001</dc:identifier>
        <dc:title>Le Petit Prince</dc:title>
        <dc:title>Subtitle</dc:title>
        <dc:date>1943-04-06</dc:date>
        <dc:language>fr</dc:language>
        <dc:creator id="saint-ex">Antoine de Saint-Exupéry</dc:creator>
        <meta refines="#saint-ex" property="role" scheme="marc:relators">aut</meta>
        <meta refines="#saint-ex" property="role" scheme="marc:relators">ill</meta>
        <meta refines="#saint-ex" property="file-as">Saint-Exupéry, Antoine de</meta>
        <dc:contributor id="trans">Katherine Woods</dc:contributor>
        <meta refines="#trans" property="role" scheme="marc:relators">trl</meta>
        <dc:contributor>Anonymous Helper</dc:contributor>
        <dc:contributor id="ghost">Nobody Refines Me</dc:contributor>
        <meta property="dcterms:modified">2023-01-01T12:00:00Z</meta>
    </metadata>
    <manifest>
        <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
        <item id="cover" href="images/cover.jpg" media-type="image/jpeg" properties="cover-image"/>
        <item id="c1" href="text/c1.xhtml" media-type="application/xhtml+xml"/>
        <item id="c2" href="text/c2.xhtml" media-type="application/xhtml+xml" properties="svg scripted"/>
        <item id="css" href="style.css" media-type="text/css"/>
    </manifest>
    <spine page-progression-direction="ltr">
        <itemref idref="cover"/>
        <itemref idref="c1"/>
        <itemref idref="missing"/>
        <itemref idref="c2"/>
    </spine>
</package>"##;

    #[test]
    fn test_full_conversion() {
        let document = OpfDocument::parse_xml(FULL_OPF).unwrap();
        let output = serde_json::to_value(convert(&document)).unwrap();

        assert_eq!(
            output,
            json!({
                "@context": ["https://schema.org", "https://www.w3.org/ns/pub-context"],
                "id": "urn:uuid:A1B2C3",
                "url": ["urn:isbn:9780000000001"],
                "name": "Le Petit Prince",
                "datePublished": "1943-04-06",
                "dateModified": "2023-01-01T12:00:00Z",
                "inLanguage": "fr",
                "readingProgression": "ltr",
                "author": {"type": "Person", "name": "Antoine de Saint-Exupéry"},
                "illustrator": {"type": "Person", "name": "Antoine de Saint-Exupéry"},
                "translator": {"type": "Person", "name": "Katherine Woods"},
                "contributor": {"type": "Person", "name": "Anonymous Helper"},
                "readingOrder": [
                    {"type": "LinkedResource", "url": "images/cover.jpg", "encodingFormat": "image/jpeg", "rel": "cover"},
                    "text/c1.xhtml",
                    {"type": "LinkedResource", "url": "text/c2.xhtml", "encodingFormat": "application/xhtml+xml"}
                ],
                "resources": [
                    {"type": "LinkedResource", "url": "nav.xhtml", "encodingFormat": "application/xhtml+xml", "rel": "content"},
                    {"type": "LinkedResource", "url": "style.css", "encodingFormat": "text/css"}
                ]
            })
        );
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let document = OpfDocument::parse_xml(FULL_OPF).unwrap();
        let first = convert(&document).to_json_string(4).unwrap();
        let second = convert(&document).to_json_string(4).unwrap();
        assert_eq!(first, second);

        let keys: Vec<String> = convert(&document).roles.keys().cloned().collect();
        assert_eq!(keys, vec!["author", "illustrator", "translator", "contributor"]);
    }

    #[test]
    fn test_minimal_document() {
        let document = OpfDocument::parse_xml(r#"<package><metadata/><manifest/><spine/></package>"#).unwrap();
        let output = serde_json::to_value(convert(&document)).unwrap();
        assert_eq!(
            output,
            json!({
                "@context": ["https://schema.org", "https://www.w3.org/ns/pub-context"],
                "readingOrder": []
            })
        );
    }

    #[test]
    fn test_json_input_with_single_values() {
        let json = r##"{
            "package": {
                "@unique-identifier": "id",
                "metadata": {
                    "dc:identifier": {"@id": "id", "#text": "urn:uuid:1"},
                    "dc:title": "One",
                    "dc:creator": "Solo Author"
                },
                "manifest": {"item": [
                    {"@id": "a", "@href": "a.xhtml", "@media-type": "application/xhtml+xml"},
                    {"@id": "img", "@href": "img.png", "@media-type": "image/png"}
                ]},
                "spine": {"itemref": {"@idref": "a"}}
            }
        }"##;
        let document = OpfDocument::from_json(json).unwrap();
        let output = convert(&document);

        assert_eq!(output.id.as_deref(), Some("urn:uuid:1"));
        assert!(output.url.is_empty());
        assert_eq!(output.name.as_deref(), Some("One"));
        assert_eq!(output.role(CREATOR_ROLE), Some(&RoleValue::One(Person::new("Solo Author"))));
        assert_eq!(output.reading_order, vec![ResourceEntry::Url("a.xhtml".to_string())]);
        assert_eq!(output.resources.len(), 1);
    }
}

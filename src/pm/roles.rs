//! 创建者/贡献者角色解析
//!
//! OPF中的`<meta refines="#id" property="role">`精化决定人员在出版物清单中的角色。
//! 支持两套词表：出版物清单默认的schema.org角色，以及与之有对应关系的MARC relator代码。
//! 找不到对应项时退回到基础角色`creator`或`contributor`。
//!
//! 带`@id`但没有任何角色精化的人员不会被分配角色，而没有`@id`的人员总是得到基础角色。

use crate::epub::opf::{MetaEntry, Metadata, PersonEntry};
use crate::normalize::{OneOrMany, add_value};
use crate::pm::model::{Person, PublicationManifest};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::debug;

/// dc:creator的基础角色
pub const CREATOR_ROLE: &str = "creator";

/// dc:contributor的基础角色
pub const CONTRIBUTOR_ROLE: &str = "contributor";

/// MARC relator词表的scheme名称
const MARC_RELATORS_SCHEME: &str = "marc:relators";

/// 出版物清单(schema.org)角色，恒等映射
static SCHEMA_ROLES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        "artist",
        "author",
        "colorist",
        "contributor",
        "creator",
        "editor",
        "illustrator",
        "inker",
        "letterer",
        "penciler",
        "publisher",
        "readBy",
        "translator",
    ]
    .into_iter()
    .map(|role| (role, role))
    .collect()
});

/// MARC relator代码到出版物清单角色的映射
static MARC_ROLES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("art", "artist"),
        ("aut", "author"),
        ("clr", "colorist"),
        ("ctb", "contributor"),
        ("cre", "creator"),
        ("edt", "editor"),
        ("ill", "illustrator"),
        ("ink", "inker"),
        ("ltr", "letterer"),
        ("pnc", "penciler"),
        ("pbl", "publisher"),
        ("spk", "readBy"),
        ("trl", "translator"),
    ])
});

/// 角色词表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    SchemaOrg,
    MarcRelators,
}

impl Vocabulary {
    /// 根据精化的scheme属性选择词表；只有`marc:relators`选择MARC，其余(包括缺失)都使用schema.org
    pub fn for_scheme(scheme: Option<&str>) -> Self {
        match scheme {
            Some(MARC_RELATORS_SCHEME) => Vocabulary::MarcRelators,
            _ => Vocabulary::SchemaOrg,
        }
    }

    /// 在词表中查找角色
    pub fn lookup(self, token: &str) -> Option<&'static str> {
        let table = match self {
            Vocabulary::SchemaOrg => &SCHEMA_ROLES,
            Vocabulary::MarcRelators => &MARC_ROLES,
        };
        table.get(token).copied()
    }
}

/// 角色 → 人员列表，保持角色首次出现的顺序；同一个人可以出现在多个角色下
pub type RoleAssignment<'a> = IndexMap<&'static str, Vec<&'a PersonEntry>>;

/// 把一类人员按角色精化分配到角色
fn collect_roles<'a>(
    persons: &'a [PersonEntry],
    base: &'static str,
    refinements: &[&MetaEntry],
    roles: &mut RoleAssignment<'a>,
) {
    for person in persons {
        let Some(id) = person.id.as_deref() else {
            add_value(roles, base, person);
            continue;
        };

        for refinement in refinements.iter().filter(|refinement| refinement.refines_id(id)) {
            let vocabulary = Vocabulary::for_scheme(refinement.scheme.as_deref());
            let role = match refinement.text.as_deref().and_then(|token| vocabulary.lookup(token)) {
                Some(role) => role,
                None => {
                    debug!(id, token = ?refinement.text, ?vocabulary, base, "未识别的角色代码，使用基础角色");
                    base
                }
            };
            add_value(roles, role, person);
        }
    }
}

/// 解析dc:creator和dc:contributor的角色并写入输出
pub(crate) fn resolve_roles(metadata: &Metadata, output: &mut PublicationManifest) {
    let refinements = metadata.role_refinements();
    let mut roles = RoleAssignment::new();

    collect_roles(&metadata.creators, CREATOR_ROLE, &refinements, &mut roles);
    collect_roles(&metadata.contributors, CONTRIBUTOR_ROLE, &refinements, &mut roles);

    for (role, persons) in roles {
        let persons = persons
            .into_iter()
            .map(|person| Person::new(person.text_or_empty()))
            .collect();
        output.roles.insert(role.to_string(), OneOrMany::collapse(persons));
    }
}

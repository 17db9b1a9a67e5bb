//! 多重性归一化模块
//!
//! XML转JSON时，重复出现的子元素会根据出现次数变成单个值或数组。
//! 此模块在文档适配边界上把这类字段统一成有序序列，内部逻辑只处理`Vec`。

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::hash::Hash;

/// 单个值或值序列
///
/// 反序列化时先尝试数组，再尝试单个值；序列化时`One`输出为裸值，`Many`输出为数组。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// 由序列构造：恰好一个元素时折叠为`One`，否则保持为`Many`
    pub fn collapse(mut items: Vec<T>) -> Self {
        if items.len() == 1 {
            if let Some(item) = items.pop() {
                return OneOrMany::One(item);
            }
        }
        OneOrMany::Many(items)
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// 保证结果总是有序序列
///
/// # 参数
/// * `value` - 缺失、单个值或已有序列
///
/// # 返回值
/// * `Vec<T>` - 空序列、单元素序列或原序列
pub fn to_array<T>(value: Option<OneOrMany<T>>) -> Vec<T> {
    value.map(Vec::from).unwrap_or_default()
}

/// serde辅助函数：把"一个或多个"字段反序列化为`Vec`
///
/// 配合`#[serde(default, deserialize_with = "...")]`使用，缺失字段和`null`都得到空序列。
pub fn deserialize_one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<OneOrMany<T>>::deserialize(deserializer).map(to_array)
}

/// 向映射中`key`对应的序列追加`value`，`key`首次出现时创建单元素序列
///
/// 映射保持键的首次插入顺序。
pub fn add_value<K, V>(map: &mut IndexMap<K, Vec<V>>, key: K, value: V)
where
    K: Hash + Eq,
{
    map.entry(key).or_default().push(value);
}

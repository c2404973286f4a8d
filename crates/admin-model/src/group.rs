//! Group representations

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A group within a realm. Groups nest through `sub_groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Unique group id
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Group name (unique among siblings)
    pub name: String,

    /// Slash separated path from the top level group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Custom attributes
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, Vec<String>>,

    /// Child groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_groups: Vec<Group>,
}

impl Group {
    /// Creates a group payload with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            path: None,
            attributes: HashMap::new(),
            sub_groups: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_groups() {
        let json = serde_json::json!({
            "id": "g-1",
            "name": "parent",
            "path": "/parent",
            "subGroups": [{ "id": "g-2", "name": "child", "path": "/parent/child" }]
        });

        let group: Group = serde_json::from_value(json).unwrap();
        assert_eq!(group.sub_groups.len(), 1);
        assert_eq!(group.sub_groups[0].path.as_deref(), Some("/parent/child"));
    }
}

// src/domain/folder.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl Folder {
    /// Folders without parent, or with an empty parent id, are roots.
    pub fn is_root(&self) -> bool {
        self.parent_id.as_deref().map_or(true, str::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, true)]
    #[case(Some(""), true)]
    #[case(Some("f1"), false)]
    fn test_is_root(#[case] parent: Option<&str>, #[case] expected: bool) {
        let folder = Folder {
            id: "f2".to_string(),
            name: "Child".to_string(),
            parent_id: parent.map(str::to_string),
        };

        assert_eq!(folder.is_root(), expected);
    }
}

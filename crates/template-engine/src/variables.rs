//! Variable option tree derived from template data

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::TemplateData;

/// One entry of the variable suggestion menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableOption {
    /// Fully qualified dotted path (`tenant.address.city`)
    pub id: String,
    /// Key at this level (`city`)
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VariableOption>,
}

impl VariableOption {
    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn group(
        id: impl Into<String>,
        label: impl Into<String>,
        children: Vec<VariableOption>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children,
        }
    }

    /// Whether selecting this option descends instead of inserting
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Build the menu tree: nested objects become groups, everything else a
    /// leaf. Options keep the key order of the data.
    pub fn tree_from_data(data: &TemplateData) -> Vec<VariableOption> {
        build_level(data, None)
    }

    /// Number of insertable paths below (and including) this option
    pub fn leaf_count(&self) -> usize {
        if self.has_children() {
            self.children.iter().map(VariableOption::leaf_count).sum()
        } else {
            1
        }
    }
}

fn build_level(map: &TemplateData, prefix: Option<&str>) -> Vec<VariableOption> {
    map.iter()
        .map(|(key, value)| {
            let id = match prefix {
                Some(parent) => format!("{parent}.{key}"),
                None => key.clone(),
            };
            match value {
                Value::Object(inner) => {
                    let children = build_level(inner, Some(&id));
                    VariableOption::group(id, key.clone(), children)
                }
                _ => VariableOption::leaf(id, key.clone()),
            }
        })
        .collect()
}

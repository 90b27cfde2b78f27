//! Template - Initial shape of the technical solution document
//!
//! The built-in template is a constant: section keys, titles and nesting with
//! every content field empty. A store is always instantiated from a template
//! and never writes back into it.
//!
//! Custom templates can be loaded from TOML or JSON files with the same node
//! shape:
//!
//! ```toml
//! [1_overview]
//! title = "1. Overview"
//!
//! [1_overview.subsections.1_1_background]
//! title = "1.1 Background"
//! ```

use std::path::Path;
use std::sync::LazyLock;

use super::error::TemplateError;
use super::path::SEPARATOR;
use super::section::{SectionNode, Sections};

/// The built-in technical solution template
pub static TECHNICAL_SOLUTION: LazyLock<Template> = LazyLock::new(Template::technical_solution);

/// A read-only document shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    sections: Sections,
}

impl Template {
    /// Wrap a mapping after checking its shape
    pub fn new(sections: Sections) -> Result<Self, TemplateError> {
        validate(&sections, "")?;
        Ok(Self { sections })
    }

    /// Top-level sections in declaration order
    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    /// Load a template file, picking the parser by extension
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let text = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match ext.as_str() {
            "toml" => Self::from_toml(&text),
            "json" => Self::from_json(&text),
            _ => Err(TemplateError::UnsupportedFormat(ext)),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, TemplateError> {
        let sections: Sections = toml::from_str(text)?;
        Self::new(sections)
    }

    pub fn from_json(text: &str) -> Result<Self, TemplateError> {
        let sections: Sections = serde_json::from_str(text)?;
        Self::new(sections)
    }

    fn technical_solution() -> Self {
        let sections: Sections = [
            (
                "1_overview",
                SectionNode::new("1. 概述").with_subsections([
                    ("1_1_demand_background", SectionNode::new("1.1 需求背景")),
                    (
                        "1_2_target",
                        SectionNode::new("1.2 目标").with_subsections([
                            ("1_2_1_business_target", SectionNode::new("1.2.1 需求业务目标")),
                            ("1_2_2_technical_target", SectionNode::new("1.2.2 技术目标")),
                        ]),
                    ),
                ]),
            ),
            (
                "2_demand_analysis",
                SectionNode::new("2. 需求分析").with_subsections([
                    ("2_1_demand_scope", SectionNode::new("2.1 需求范围")),
                    ("2_2_business_use_cases", SectionNode::new("2.2 业务用例")),
                    ("2_3_business_function_list", SectionNode::new("2.3 业务功能列表")),
                ]),
            ),
            (
                "3_system_analysis_design",
                SectionNode::new("3. 系统分析与设计").with_subsections([
                    ("3_1_system_dependency_analysis", SectionNode::new("3.1 系统依赖分析")),
                    ("3_2_critical_function_design", SectionNode::new("3.2 关键功能设计")),
                    (
                        "3_3_basic_component_config_change",
                        SectionNode::new("3.3 基础组件配置变更").with_subsections([
                            ("3_3_1_mq_change", SectionNode::new("3.3.1 MQ变更")),
                            ("3_3_2_database_change", SectionNode::new("3.3.2 数据库变更")),
                        ]),
                    ),
                    ("3_4_offline_data_impact_analysis", SectionNode::new("3.4 离线数据影响分析")),
                ]),
            ),
            (
                "5_technical_risk_analysis",
                SectionNode::new("5. 技术风险分析")
                    .with_subsections([("5_1_risk_description", SectionNode::new("5.1 风险说明"))]),
            ),
            ("6_appendix", SectionNode::new("6. 附录（其他文档）")),
        ]
        .into_iter()
        .map(|(key, node)| (key.to_string(), node))
        .collect();

        Self { sections }
    }
}

impl Default for Template {
    fn default() -> Self {
        TECHNICAL_SOLUTION.clone()
    }
}

/// Basic shape checks: non-empty mappings, usable keys, non-blank titles
fn validate(sections: &Sections, prefix: &str) -> Result<(), TemplateError> {
    if sections.is_empty() {
        return Err(TemplateError::Invalid {
            path: display_prefix(prefix),
            reason: "section mapping is empty".to_string(),
        });
    }

    for (key, node) in sections {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}{}{}", prefix, SEPARATOR, key)
        };

        if key.trim().is_empty() || key.contains(SEPARATOR) {
            return Err(TemplateError::Invalid {
                path,
                reason: format!("section key must be non-empty and must not contain '{}'", SEPARATOR),
            });
        }

        if node.title.trim().is_empty() {
            return Err(TemplateError::Invalid {
                path,
                reason: "title cannot be empty".to_string(),
            });
        }

        if let Some(children) = &node.subsections {
            validate(children, &format!("{}{}subsections", path, SEPARATOR))?;
        }
    }

    Ok(())
}

fn display_prefix(prefix: &str) -> String {
    if prefix.is_empty() {
        "<root>".to_string()
    } else {
        prefix.to_string()
    }
}

//! `techsol tree` command
//!
//! Shows the section keys of the template, so an agent author can see which
//! paths exist.
//!
//! # Usage
//! ```bash
//! techsol tree
//! techsol tree --template docs/rfc.toml
//! techsol tree --paths
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::config::Config;
use crate::core::path::DocPath;
use crate::core::section::{Sections, CONTENT, SUBSECTIONS};

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Template file (.toml or .json) instead of the built-in one
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Print writable content paths instead of a tree
    #[arg(long)]
    pub paths: bool,
}

pub fn run(args: TreeArgs, config: &Config) -> Result<()> {
    let template = config.template(args.template.as_deref())?;

    if args.paths {
        for path in content_paths(template.sections()) {
            println!("{}", path);
        }
        return Ok(());
    }

    println!("{}", "📂 document".bold());
    for line in tree_lines(template.sections(), "") {
        println!("{}", line);
    }

    Ok(())
}

/// `key/ title` lines with box-drawing branches
fn tree_lines(sections: &Sections, indent: &str) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, (key, node)) in sections.iter().enumerate() {
        let is_last = i == sections.len() - 1;
        let branch = if is_last { "└── " } else { "├── " };
        let suffix = if node.subsections.is_some() { "/" } else { "" };

        lines.push(format!(
            "{}{}{}{}  {}",
            indent,
            branch,
            key.cyan(),
            suffix,
            node.title.dimmed()
        ));

        if let Some(children) = &node.subsections {
            let child_indent = format!("{}{}", indent, if is_last { "    " } else { "│   " });
            lines.extend(tree_lines(children, &child_indent));
        }
    }

    lines
}

/// Every `….content` path in declaration order
pub fn content_paths(sections: &Sections) -> Vec<String> {
    fn walk(sections: &Sections, base: Option<&DocPath>, out: &mut Vec<String>) {
        for (key, node) in sections {
            let path = match base {
                Some(base) => base.child(key),
                None => DocPath::from_segments([key.as_str()]),
            };
            out.push(path.child(CONTENT).to_string());
            if let Some(children) = &node.subsections {
                walk(children, Some(&path.child(SUBSECTIONS)), out);
            }
        }
    }

    let mut out = Vec::new();
    walk(sections, None, &mut out);
    out
}

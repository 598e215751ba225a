use crate::app::scanner::literal_pattern;
use clap::ValueEnum;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

pub const DEFAULT_INDEX_FILE: &str = "index.js";

/// Which statement syntax the generated index uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// `import foo from './foo.js'` / `export { ... }`
    Import,
    /// `const foo = require('./foo.js')` / `module.exports = { ... }`
    Require,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LineEnding {
    #[default]
    #[serde(rename = "\n", alias = "lf")]
    Lf,
    #[serde(rename = "\r\n", alias = "crlf")]
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Quote {
    #[default]
    #[serde(rename = "'", alias = "single")]
    Single,
    #[serde(rename = "\"", alias = "double")]
    Double,
}

impl Quote {
    pub fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }
}

/// Process-wide settings, loaded once per run and passed by value.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GlobalSettings {
    pub eol: LineEnding,
    pub quotes: Quote,
    pub semicolon: bool,
    pub ignore: Vec<String>,
    pub open: bool,
    pub tab_length: usize,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            eol: LineEnding::Lf,
            quotes: Quote::Single,
            semicolon: true,
            ignore: vec![
                ".aigrc".to_string(),
                DEFAULT_INDEX_FILE.to_string(),
                "*.(md|lock|log|txt|html)".to_string(),
            ],
            open: true,
            tab_length: 2,
        }
    }
}

impl GlobalSettings {
    pub fn terminator(&self) -> &'static str {
        if self.semicolon {
            ";"
        } else {
            ""
        }
    }

    pub fn indent(&self) -> String {
        " ".repeat(self.tab_length)
    }
}

/// One layer of directory configuration, as written in `.aigrc`.
///
/// Every field is optional so layers can be stacked: a set field in a
/// higher layer replaces the lower one (arrays included).
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RcOverrides {
    pub index: Option<String>,
    pub ignore: Option<Vec<String>>,
    pub keep: Option<Vec<String>>,
    #[serde(rename = "default")]
    pub default_export: Option<bool>,
    #[serde(rename = "*")]
    pub namespace: Option<bool>,
    pub class: Option<bool>,
    pub recursive: Option<bool>,
    #[serde(rename = "subDir")]
    pub sub_dir: Option<bool>,
    pub inherit: Option<bool>,
}

impl RcOverrides {
    /// Stacks `top` over `self`.
    pub fn overlay(&self, top: &RcOverrides) -> RcOverrides {
        RcOverrides {
            index: top.index.clone().or_else(|| self.index.clone()),
            ignore: top.ignore.clone().or_else(|| self.ignore.clone()),
            keep: top.keep.clone().or_else(|| self.keep.clone()),
            default_export: top.default_export.or(self.default_export),
            namespace: top.namespace.or(self.namespace),
            class: top.class.or(self.class),
            recursive: top.recursive.or(self.recursive),
            sub_dir: top.sub_dir.or(self.sub_dir),
            inherit: top.inherit.or(self.inherit),
        }
    }
}

/// The effective configuration ("runcom") for one directory.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub index_file_name: String,
    /// Always ends with a pattern matching exactly `index_file_name`.
    pub ignore_patterns: Vec<String>,
    pub keep_names: HashSet<String>,
    pub use_default_export: bool,
    pub use_namespace_import: bool,
    pub force_class_naming: bool,
    pub recursive: bool,
    pub include_subdirectory_modules: bool,
    pub inherit_config_to_children: bool,
}

impl RunConfig {
    pub fn from_overrides(record: &RcOverrides) -> Self {
        let index_file_name = record
            .index
            .clone()
            .unwrap_or_else(|| DEFAULT_INDEX_FILE.to_string());

        let mut ignore_patterns = record.ignore.clone().unwrap_or_default();
        ignore_patterns.push(literal_pattern(&index_file_name));

        Self {
            index_file_name,
            ignore_patterns,
            keep_names: record.keep.iter().flatten().cloned().collect(),
            use_default_export: record.default_export.unwrap_or(false),
            use_namespace_import: record.namespace.unwrap_or(false),
            force_class_naming: record.class.unwrap_or(false),
            recursive: record.recursive.unwrap_or(true),
            include_subdirectory_modules: record.sub_dir.unwrap_or(false),
            inherit_config_to_children: record.inherit.unwrap_or(false),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::from_overrides(&RcOverrides::default())
    }
}

/// A file or subdirectory found directly inside the target directory.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    /// File name including extension.
    pub base: String,
    /// File name without its last extension.
    pub name: String,
    pub extension: Option<String>,
    pub is_dir: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleBinding {
    pub name: String,
    pub path: String,
}

/// Name to path table in first-insertion order.
///
/// Inserting an existing name replaces its path but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleTable {
    bindings: Vec<ModuleBinding>,
}

impl ModuleTable {
    pub fn insert(&mut self, name: String, path: String) {
        match self.bindings.iter_mut().find(|b| b.name == name) {
            Some(existing) => existing.path = path,
            None => self.bindings.push(ModuleBinding { name, path }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleBinding> {
        self.bindings.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.iter().map(|b| b.name.clone()).collect()
    }
}

/// The generated index for one directory plus those of the subdirectories
/// it descended into.
#[derive(Debug, Clone)]
pub struct GeneratedIndex {
    pub directory: PathBuf,
    pub target_file: PathBuf,
    pub modules: ModuleTable,
    /// Every exported identifier in emission order; may repeat a name.
    pub export_names: Vec<String>,
    pub content: String,
    pub children: Vec<GeneratedIndex>,
}

impl GeneratedIndex {
    /// This index and every descendant, children before parents.
    pub fn post_order(&self) -> Vec<&GeneratedIndex> {
        let mut out = Vec::new();
        for child in &self.children {
            out.extend(child.post_order());
        }
        out.push(self);
        out
    }
}

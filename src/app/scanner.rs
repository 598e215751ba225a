use crate::app::errors::GenerateError;
use crate::app::models::DirectoryEntry;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::Path;

/// Lists the direct children of `dir` in the order the filesystem returns
/// them. Nothing is filtered here; see [`IgnoreMatcher`].
pub fn list_entries(dir: &Path) -> Result<Vec<DirectoryEntry>, GenerateError> {
    let walker = WalkBuilder::new(dir)
        .max_depth(Some(1))
        .standard_filters(false)
        .build();

    let mut entries = Vec::new();
    for result in walker {
        let entry = result.map_err(|source| GenerateError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        if entry.depth() == 0 {
            continue;
        }

        let path = entry.path();
        let Some(base) = entry.file_name().to_str().map(str::to_string) else {
            log::warn!("Skipping {:?}: file name is not valid UTF-8", path);
            continue;
        };
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| base.clone());
        let extension = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned());

        entries.push(DirectoryEntry {
            path: path.to_path_buf(),
            base,
            name,
            extension,
            // Follows symlinks so linked directories are treated as directories.
            is_dir: path.is_dir(),
        });
    }

    Ok(entries)
}

/// Decides which entry names are skipped.
pub struct IgnoreMatcher {
    set: GlobSet,
}

impl IgnoreMatcher {
    pub fn new(patterns: &[String]) -> Result<Self, GenerateError> {
        Ok(Self {
            set: build_globset(patterns)?,
        })
    }

    /// Dotfiles are always skipped, whatever the patterns say.
    pub fn is_ignored(&self, base: &str) -> bool {
        base.starts_with('.') || self.set.is_match(base)
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, GenerateError> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(&translate_pattern(pat)).map_err(|source| {
            GenerateError::InvalidPattern {
                pattern: pat.clone(),
                source,
            }
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| GenerateError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Rewrites `(a|b)` and `@(a|b)` alternation groups into globset's `{a,b}`.
/// Bracket classes are copied through untouched.
pub fn translate_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut depth = 0usize;
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' => {
                out.push(c);
                copy_class(&mut chars, &mut out);
            }
            '@' if chars.peek() == Some(&'(') => {}
            '(' => {
                depth += 1;
                out.push('{');
            }
            ')' if depth > 0 => {
                depth -= 1;
                out.push('}');
            }
            '|' if depth > 0 => out.push(','),
            _ => out.push(c),
        }
    }

    out
}

// Copies a class body up to and including its closing `]`. A `]` right
// after the opening `[` (or `[!`, `[^`) is a member, not the end.
fn copy_class(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, out: &mut String) {
    if matches!(chars.peek(), Some('!' | '^')) {
        out.extend(chars.next());
    }
    if chars.peek() == Some(&']') {
        out.push(']');
        chars.next();
    }
    for c in chars.by_ref() {
        out.push(c);
        if c == ']' {
            return;
        }
    }
}

/// A pattern matching exactly `name`: every character with meaning to
/// [`translate_pattern`] or globset is wrapped in a one-member class.
pub fn literal_pattern(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '?' | '*' | '[' | ']' | '{' | '}' | '(' | ')' | '|' | '\\' => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    fn matcher(patterns: &[&str]) -> IgnoreMatcher {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        IgnoreMatcher::new(&patterns).unwrap()
    }

    #[test]
    fn test_translate_alternation() {
        assert_eq!(translate_pattern("*.(md|lock)"), "*.{md,lock}");
        assert_eq!(translate_pattern("*.@(md|txt)"), "*.{md,txt}");
        assert_eq!(translate_pattern("index.js"), "index.js");
        assert_eq!(translate_pattern("a|b"), "a|b");
    }

    #[test]
    fn test_translate_leaves_classes_alone() {
        assert_eq!(translate_pattern("[(]x"), "[(]x");
        assert_eq!(translate_pattern("[|)]*.(js|ts)"), "[|)]*.{js,ts}");
        assert_eq!(translate_pattern("[]|]a"), "[]|]a");
        assert_eq!(translate_pattern("[!(]b"), "[!(]b");
    }

    #[test]
    fn test_literal_pattern_matches_only_itself() {
        for name in ["[id].js", "index{.js", "a(1|2).js", "*.js", "plain.js"] {
            let m = matcher(&[literal_pattern(name).as_str()]);
            assert!(m.is_ignored(name), "{} should match itself", name);
        }
        let m = matcher(&[literal_pattern("[id].js").as_str()]);
        assert!(!m.is_ignored("i.js"));
        let m = matcher(&[literal_pattern("*.js").as_str()]);
        assert!(!m.is_ignored("foo.js"));
    }

    #[test]
    fn test_extension_alternation_matches() {
        let m = matcher(&["*.(md|lock|log|txt|html)"]);
        assert!(m.is_ignored("README.md"));
        assert!(m.is_ignored("yarn.lock"));
        assert!(m.is_ignored("page.html"));
        assert!(!m.is_ignored("foo.js"));
    }

    #[test]
    fn test_dotfiles_always_ignored() {
        let m = matcher(&[]);
        assert!(m.is_ignored(".hidden.js"));
        assert!(m.is_ignored(".aigrc"));
        assert!(!m.is_ignored("visible.js"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let result = IgnoreMatcher::new(&["*.{js".to_string()]);
        assert!(matches!(result, Err(GenerateError::InvalidPattern { .. })));
    }

    #[test]
    fn test_list_entries_is_shallow() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("foo.test.js"), "").unwrap();
        fs::write(temp.path().join(".hidden"), "").unwrap();
        fs::create_dir(temp.path().join("utils")).unwrap();
        fs::write(temp.path().join("utils").join("deep.js"), "").unwrap();

        let entries = list_entries(temp.path()).unwrap();
        let bases: HashSet<_> = entries.iter().map(|e| e.base.as_str()).collect();
        assert_eq!(bases, HashSet::from(["foo.test.js", ".hidden", "utils"]));

        let file = entries.iter().find(|e| e.base == "foo.test.js").unwrap();
        assert_eq!(file.name, "foo.test");
        assert_eq!(file.extension.as_deref(), Some("js"));
        assert!(!file.is_dir);

        let dir = entries.iter().find(|e| e.base == "utils").unwrap();
        assert!(dir.is_dir);
        assert_eq!(dir.extension, None);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_list_entries_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(OsStr::from_bytes(b"bad\xff.js")), "").unwrap();
        fs::write(temp.path().join("good.js"), "").unwrap();

        let entries = list_entries(temp.path()).unwrap();
        let bases: Vec<_> = entries.iter().map(|e| e.base.as_str()).collect();
        assert_eq!(bases, vec!["good.js"]);
    }

    #[test]
    fn test_list_entries_missing_directory() {
        let temp = TempDir::new().unwrap();
        let result = list_entries(&temp.path().join("missing"));
        assert!(matches!(result, Err(GenerateError::ReadDir { .. })));
    }
}

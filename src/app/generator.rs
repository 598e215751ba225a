use crate::app::config::{merge_patterns, resolve_runcom};
use crate::app::errors::GenerateError;
use crate::app::formatter::OutputGenerator;
use crate::app::models::{GeneratedIndex, GlobalSettings, Mode, ModuleTable, RcOverrides};
use crate::app::naming::module_identifier;
use crate::app::scanner::{list_entries, IgnoreMatcher};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Builds the index of `dir` and of every subdirectory it descends into.
///
/// Reads the filesystem but writes nothing; see
/// [`persist_tree`](crate::app::persist::persist_tree).
pub fn compute(
    mode: Mode,
    dir: &Path,
    settings: &GlobalSettings,
    invocation: &RcOverrides,
) -> Result<GeneratedIndex, GenerateError> {
    let mut generator = Generator {
        mode,
        settings,
        invocation,
        ancestors: HashSet::new(),
    };
    generator.visit(dir, invocation.clone())
}

struct Generator<'a> {
    mode: Mode,
    settings: &'a GlobalSettings,
    invocation: &'a RcOverrides,
    /// Canonical paths of the directories on the current recursion path.
    ancestors: HashSet<PathBuf>,
}

impl Generator<'_> {
    fn visit(&mut self, dir: &Path, base: RcOverrides) -> Result<GeneratedIndex, GenerateError> {
        let key = canonical(dir)?;
        self.ancestors.insert(key.clone());
        let result = self.generate_dir(dir, base);
        self.ancestors.remove(&key);
        result
    }

    fn generate_dir(
        &mut self,
        dir: &Path,
        base: RcOverrides,
    ) -> Result<GeneratedIndex, GenerateError> {
        let resolved = resolve_runcom(dir, &base)?;
        let runcom = &resolved.runcom;
        let matcher = IgnoreMatcher::new(&merge_patterns(
            &self.settings.ignore,
            &runcom.ignore_patterns,
        ))?;
        let formatter = OutputGenerator::new(self.mode, self.settings, runcom);

        let child_base = if runcom.inherit_config_to_children {
            resolved.record.clone()
        } else {
            self.invocation.clone()
        };
        let descend = runcom.recursive || runcom.include_subdirectory_modules;

        let mut modules = ModuleTable::default();
        let mut export_names = Vec::new();
        let mut statements = Vec::new();
        let mut children = Vec::new();

        for entry in list_entries(dir)? {
            if matcher.is_ignored(&entry.base) {
                log::debug!("Skipping {:?}", entry.path);
                continue;
            }

            if entry.is_dir && descend {
                if self.ancestors.contains(&canonical(&entry.path)?) {
                    log::warn!("Skipping {:?}: links back to a parent directory", entry.path);
                    continue;
                }

                let child = self.visit(&entry.path, child_base.clone())?;

                if runcom.include_subdirectory_modules && !child.modules.is_empty() {
                    let path = format!("./{}", entry.base);
                    let names = child.modules.names();
                    statements.push(formatter.aggregate_statement(&names, &path));
                    for name in names {
                        modules.insert(name.clone(), path.clone());
                        export_names.push(name);
                    }
                }

                children.push(child);
                continue;
            }

            let name = module_identifier(&entry, runcom);
            let path = format!("./{}", entry.base);
            statements.push(formatter.module_statement(&name, &path));
            modules.insert(name.clone(), path);
            export_names.push(name);
        }

        let content = formatter.render(statements, &export_names);

        Ok(GeneratedIndex {
            directory: dir.to_path_buf(),
            target_file: dir.join(&runcom.index_file_name),
            modules,
            export_names,
            content,
            children,
        })
    }
}

fn canonical(path: &Path) -> Result<PathBuf, GenerateError> {
    fs::canonicalize(path).map_err(|source| GenerateError::Stat {
        path: path.to_path_buf(),
        source,
    })
}

use crate::app::models::{GlobalSettings, Mode, RunConfig};

/// Renders the statements of one index file.
pub struct OutputGenerator<'a> {
    mode: Mode,
    settings: &'a GlobalSettings,
    runcom: &'a RunConfig,
}

impl<'a> OutputGenerator<'a> {
    pub fn new(mode: Mode, settings: &'a GlobalSettings, runcom: &'a RunConfig) -> Self {
        Self {
            mode,
            settings,
            runcom,
        }
    }

    fn quoted(&self, path: &str) -> String {
        let q = self.settings.quotes.as_char();
        format!("{}{}{}", q, path, q)
    }

    /// `import foo from './foo.js';` or `const foo = require('./foo.js');`
    pub fn module_statement(&self, name: &str, path: &str) -> String {
        let term = self.settings.terminator();
        match self.mode {
            Mode::Import => {
                let star = if self.runcom.use_namespace_import {
                    " * as"
                } else {
                    ""
                };
                format!("import{} {} from {}{}", star, name, self.quoted(path), term)
            }
            Mode::Require => {
                format!("const {} = require({}){}", name, self.quoted(path), term)
            }
        }
    }

    /// One statement pulling several names out of a subdirectory index.
    pub fn aggregate_statement(&self, names: &[String], path: &str) -> String {
        let term = self.settings.terminator();
        let list = names.join(", ");
        match self.mode {
            Mode::Import => format!("import {{ {} }} from {}{}", list, self.quoted(path), term),
            Mode::Require => format!("const {{ {} }} = require({}){}", list, self.quoted(path), term),
        }
    }

    /// The closing export statement, ending with a line terminator.
    pub fn export_statement(&self, names: &[String]) -> String {
        let eol = self.settings.eol.as_str();
        let indent = self.settings.indent();
        let head = match self.mode {
            Mode::Import if self.runcom.use_default_export => "export default ",
            Mode::Import => "export ",
            Mode::Require => "module.exports = ",
        };
        let body = names
            .iter()
            .map(|name| format!("{}{}", indent, name))
            .collect::<Vec<_>>()
            .join(&format!(",{}", eol));

        format!(
            "{}{{{}{}{}}}{}{}",
            head,
            eol,
            body,
            eol,
            self.settings.terminator(),
            eol
        )
    }

    pub fn render(&self, mut statements: Vec<String>, names: &[String]) -> String {
        statements.push(String::new());
        statements.push(self.export_statement(names));
        statements.join(self.settings.eol.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{LineEnding, Quote};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_import_statements() {
        let settings = GlobalSettings::default();
        let mut runcom = RunConfig::default();
        let gen = OutputGenerator::new(Mode::Import, &settings, &runcom);
        assert_eq!(
            gen.module_statement("foo", "./foo.js"),
            "import foo from './foo.js';"
        );

        runcom.use_namespace_import = true;
        let gen = OutputGenerator::new(Mode::Import, &settings, &runcom);
        assert_eq!(
            gen.module_statement("foo", "./foo.js"),
            "import * as foo from './foo.js';"
        );
    }

    #[test]
    fn test_require_statement_with_custom_quotes() {
        let settings = GlobalSettings {
            quotes: Quote::Double,
            semicolon: false,
            ..GlobalSettings::default()
        };
        let runcom = RunConfig::default();
        let gen = OutputGenerator::new(Mode::Require, &settings, &runcom);
        assert_eq!(
            gen.module_statement("Bar", "./Bar.js"),
            "const Bar = require(\"./Bar.js\")"
        );
    }

    #[test]
    fn test_aggregate_statements() {
        let settings = GlobalSettings::default();
        let runcom = RunConfig::default();
        let list = names(&["a", "b"]);
        let import = OutputGenerator::new(Mode::Import, &settings, &runcom);
        assert_eq!(
            import.aggregate_statement(&list, "./utils"),
            "import { a, b } from './utils';"
        );
        let require = OutputGenerator::new(Mode::Require, &settings, &runcom);
        assert_eq!(
            require.aggregate_statement(&list, "./utils"),
            "const { a, b } = require('./utils');"
        );
    }

    #[test]
    fn test_export_statements() {
        let settings = GlobalSettings::default();
        let mut runcom = RunConfig::default();
        let list = names(&["foo", "Bar"]);

        let gen = OutputGenerator::new(Mode::Import, &settings, &runcom);
        assert_eq!(gen.export_statement(&list), "export {\n  foo,\n  Bar\n};\n");

        runcom.use_default_export = true;
        let gen = OutputGenerator::new(Mode::Import, &settings, &runcom);
        assert_eq!(
            gen.export_statement(&list),
            "export default {\n  foo,\n  Bar\n};\n"
        );

        let gen = OutputGenerator::new(Mode::Require, &settings, &runcom);
        assert_eq!(
            gen.export_statement(&list),
            "module.exports = {\n  foo,\n  Bar\n};\n"
        );
    }

    #[test]
    fn test_render_uses_configured_eol_throughout() {
        let settings = GlobalSettings {
            eol: LineEnding::Crlf,
            ..GlobalSettings::default()
        };
        let runcom = RunConfig::default();
        let gen = OutputGenerator::new(Mode::Import, &settings, &runcom);
        let text = gen.render(
            vec!["import foo from './foo.js';".to_string()],
            &names(&["foo"]),
        );
        assert_eq!(
            text,
            "import foo from './foo.js';\r\n\r\nexport {\r\n  foo\r\n};\r\n"
        );
    }

    #[test]
    fn test_render_empty_directory() {
        let settings = GlobalSettings::default();
        let runcom = RunConfig::default();
        let gen = OutputGenerator::new(Mode::Import, &settings, &runcom);
        assert_eq!(gen.render(Vec::new(), &[]), "\nexport {\n\n};\n");
    }
}

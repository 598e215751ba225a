use crate::app::models::{LineEnding, Mode, Quote};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate an index.js that re-exports every module in a directory"
)]
pub struct Cli {
    /// Statement syntax of the generated index
    #[arg(value_enum)]
    pub mode: Mode,

    /// Target directory (a file selects its containing directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Settings file to use instead of ~/.config/auto_index_gen/settings.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Name of the generated file
    #[arg(long)]
    pub index: Option<String>,

    /// Additional patterns for names to skip (e.g., '*.test.js')
    #[arg(long, num_args = 1..)]
    pub ignore: Option<Vec<String>>,

    /// File names whose stem is used verbatim as the identifier
    #[arg(long, num_args = 1..)]
    pub keep: Option<Vec<String>>,

    /// Emit `export default { ... }`
    #[arg(long)]
    pub default: bool,

    /// Emit `import * as name from ...`
    #[arg(long)]
    pub namespace: bool,

    /// Use UpperCamelCase for every identifier
    #[arg(long)]
    pub class: bool,

    /// Do not descend into subdirectories
    #[arg(long)]
    pub no_recursive: bool,

    /// Re-export subdirectory modules from this index
    #[arg(long)]
    pub sub_dir: bool,

    /// Hand this configuration down to subdirectories
    #[arg(long)]
    pub inherit: bool,

    /// Line ending of the generated file
    #[arg(long, value_enum)]
    pub eol: Option<LineEnding>,

    /// Quote character around module paths
    #[arg(long, value_enum)]
    pub quotes: Option<Quote>,

    /// Omit statement-terminating semicolons
    #[arg(long)]
    pub no_semicolon: bool,

    /// Spaces used to indent exported names
    #[arg(long)]
    pub indent: Option<usize>,

    /// Do not print the generated index after writing it
    #[arg(long)]
    pub no_open: bool,

    /// Print every index that would be generated without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

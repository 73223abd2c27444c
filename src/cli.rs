use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strudel_ref::config::DOCS_DIR_ENV;

#[derive(Debug, Parser)]
#[command(name = "strudel-ref")]
#[command(about = "Compile Strudel reference sources into grep-friendly JSONL", version)]
pub struct Cli {
    /// Repository root holding `data/` and `snippets/`
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,
    /// Print reports as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile data/anti-patterns/*.yaml into data/anti-patterns.jsonl
    AntiPatterns(DirArgs),
    /// Compile data/idioms/*.strudel into data/idioms.jsonl
    Idioms(DirArgs),
    /// Index snippets/*.strudel and *.str into data/snippets.jsonl
    Snippets(DirArgs),
    /// Compile the function, sound and mini-notation catalogs
    Docs(DocsArgs),
    /// Rebuild data/functions-index.jsonl from data/functions.jsonl
    FunctionsIndex,
    /// Merge data/mini-notation-rewrites.json into data/mini-notation.jsonl
    MergeRewrites,
    /// Report which inputs and outputs exist
    Doctor(DocsArgs),
}

#[derive(Debug, Args)]
pub struct DirArgs {
    /// Source directory (defaults to the repository layout)
    #[arg(long)]
    pub src: Option<PathBuf>,
    /// Output directory (defaults to <root>/data)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DocsArgs {
    /// Documentation-extraction directory (defaults to <root>/../strudel-docs)
    #[arg(env = DOCS_DIR_ENV)]
    pub docs_dir: Option<PathBuf>,
}

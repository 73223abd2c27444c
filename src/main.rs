mod cli;

use clap::Parser;
use std::path::{Path, PathBuf};
use strudel_ref::compile::compile_dir;
use strudel_ref::config::{Layout, resolve_path};
use strudel_ref::docs::{
    DocsSource, FUNCTIONS_OUTPUT, NOTATION_OUTPUT, SOUNDS_OUTPUT, generate_docs,
};
use strudel_ref::doctor::run_doctor;
use strudel_ref::index::generate_index;
use strudel_ref::overlay::{NOTATION_REWRITES, merge_overlay};
use strudel_ref::source::SourceKind;
use strudel_ref::stats::{file_sizes, format_bytes};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();
    let layout = Layout::new(resolve_path(&cli.root));
    match cli.command {
        cli::Command::AntiPatterns(args) => {
            handle_dir(&layout, SourceKind::AntiPatterns, args, cli.json)
        }
        cli::Command::Idioms(args) => handle_dir(&layout, SourceKind::Idioms, args, cli.json),
        cli::Command::Snippets(args) => handle_dir(&layout, SourceKind::Snippets, args, cli.json),
        cli::Command::Docs(args) => handle_docs(&layout, args, cli.json),
        cli::Command::FunctionsIndex => handle_functions_index(&layout, cli.json),
        cli::Command::MergeRewrites => handle_merge(&layout, cli.json),
        cli::Command::Doctor(args) => handle_doctor(&layout, args, cli.json),
    }
}

fn docs_dir(layout: &Layout, args: &cli::DocsArgs) -> PathBuf {
    args.docs_dir
        .as_deref()
        .map(resolve_path)
        .unwrap_or_else(|| layout.default_docs_dir())
}

fn handle_dir(
    layout: &Layout,
    kind: SourceKind,
    args: cli::DirArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let src_dir = args
        .src
        .as_deref()
        .map(resolve_path)
        .unwrap_or_else(|| layout.source_dir(kind));
    let out_dir = args
        .out
        .as_deref()
        .map(resolve_path)
        .unwrap_or_else(|| layout.data_dir.clone());

    let report = compile_dir(kind, &src_dir, &out_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Source: {}/", src_dir.display());
    println!("Output: {}", out_dir.join(kind.output_file()).display());
    println!();

    match &report.output {
        Some(path) if report.written > 0 => {
            let sizes = file_sizes(&[path]);
            println!(
                "{}: {} {}, {} bytes",
                kind.output_file(),
                report.written,
                kind.label(),
                format_bytes(sizes.total)
            );
        }
        _ => println!("No {} generated.", kind.label()),
    }
    if !report.rejected.is_empty() {
        println!("{} file(s) skipped", report.rejected.len());
    }
    Ok(())
}

fn handle_docs(
    layout: &Layout,
    args: cli::DocsArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = DocsSource::new(docs_dir(layout, &args));
    let out_dir = &layout.data_dir;

    let report = generate_docs(&source, out_dir)?;

    let rewrites = layout.rewrites_path();
    let merge = if rewrites.is_file() {
        Some(merge_overlay(&layout.notation_path(), &rewrites, NOTATION_REWRITES)?)
    } else {
        None
    };

    let outputs: Vec<_> = [FUNCTIONS_OUTPUT, SOUNDS_OUTPUT, NOTATION_OUTPUT]
        .iter()
        .map(|name| out_dir.join(name))
        .collect();
    let sizes = file_sizes(&outputs);

    if json {
        let value = serde_json::json!({
            "docs": report,
            "rewrites": merge,
            "sizes": sizes,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Source: {}", source.root.display());
    println!("Output: {}", out_dir.display());
    println!();
    println!("{FUNCTIONS_OUTPUT}: {} functions", report.functions);
    println!("{SOUNDS_OUTPUT}:    {} lines", report.sound_lines);
    println!("{NOTATION_OUTPUT}: {} tokens", report.tokens);
    if let Some(merge) = merge {
        println!("Merged {} rewrite entries", merge.merged);
    }
    if report.skipped > 0 {
        println!("{} catalog entries skipped", report.skipped);
    }

    println!();
    for file in &sizes.files {
        println!("  {}: {} bytes", file_label(&file.path), format_bytes(file.bytes));
    }
    println!("  total: {} bytes", format_bytes(sizes.total));
    Ok(())
}

fn handle_functions_index(layout: &Layout, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let out_path = layout.functions_index_path();
    let report = generate_index(&layout.functions_path(), &out_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let size = file_sizes(&[&out_path]).total;
    println!("Source: {}", layout.functions_path().display());
    println!("Output: {}", out_path.display());
    println!();
    println!(
        "{}: {} categories, {} functions, {} bytes",
        file_label(&out_path),
        report.categories,
        report.functions,
        format_bytes(size)
    );
    Ok(())
}

fn handle_merge(layout: &Layout, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let target = layout.notation_path();
    let report = merge_overlay(&target, &layout.rewrites_path(), NOTATION_REWRITES)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.rewritten {
        println!(
            "Merged {} rewrite entries into {}",
            report.merged,
            target.display()
        );
    } else {
        println!("No rewrites found in overlay file");
    }
    Ok(())
}

fn handle_doctor(
    layout: &Layout,
    args: cli::DocsArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = run_doctor(layout, &docs_dir(layout, &args));

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("root: {}", report.root.display());
    for source in &report.sources {
        let state = if source.dir_exists { "ok" } else { "missing" };
        println!(
            "{}: {} ({}, {} files, output {})",
            source.kind.label(),
            source.dir.display(),
            state,
            source.files,
            if source.output_exists { "present" } else { "absent" }
        );
    }
    println!("docs: {}", report.docs_dir.display());
    for check in report.docs.iter().chain(report.outputs.iter()) {
        let state = if check.exists { "ok" } else { "missing" };
        println!("  {} {}", state, check.path.display());
    }
    if !report.docs_ok() {
        println!("docs catalogs incomplete; `docs` will fail");
    }
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

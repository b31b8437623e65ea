//! Command-line driver: reads a JSON syntax tree, rewrites it and writes it back.
//!
//! Usage: `syntax-rewriter [--config FILE] desugar-parameters <input.json> [-o out.json]`
//!        `syntax-rewriter stats <input.json>`

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use syntax_rewriter::config::{ParameterHoisting, RewriteOptions};
use syntax_rewriter::error::RewriteError;
use syntax_rewriter::ir::context::TransformationContext;
use syntax_rewriter::ir::node::Node;
use syntax_rewriter::ir::pipeline::{Pipeline, Transform};
use syntax_rewriter::ir::visitor::{visit_each_child, VisitResult};
use syntax_rewriter::ir::walker::count_kinds;
use syntax_rewriter::logging::init_logger;

#[derive(Parser, Debug)]
#[command(name = "syntax-rewriter")]
#[command(about = "Rewrite JSON-encoded syntax trees")]
struct Args {
    /// Rewrite options (JSON)
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Log level filter, overriding RUST_LOG
    #[arg(long = "log-level")]
    log_level: Option<String>,

    /// Disable ANSI colors on stderr
    #[arg(long = "no-color")]
    no_color: bool,

    /// Also append debug logs to this file
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Move parameter destructuring and default values into function bodies
    DesugarParameters {
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
    /// Print how many nodes of each kind the tree holds
    Stats { input: PathBuf },
}

fn read_tree(path: &Path) -> Result<Arc<Node>> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let tree: Node = serde_json::from_str(&text).with_context(|| format!("invalid syntax tree in {}", path.display()))?;
    Ok(Arc::new(tree))
}

fn desugar(node: &Arc<Node>, ctx: &mut TransformationContext) -> Result<VisitResult, RewriteError> {
    visit_each_child(node, &mut desugar, ctx).map(VisitResult::Node)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = init_logger(args.no_color, args.log_level.as_deref(), args.log_file.as_deref())
        .context("failed to initialize logging")?;

    let mut options = match &args.config {
        Some(path) => RewriteOptions::from_json_file(path)?,
        None => RewriteOptions::default(),
    };

    match args.command {
        Command::DesugarParameters { input, output } => {
            let tree = read_tree(&input)?;
            options.parameter_hoisting = ParameterHoisting::Always;
            let mut pipeline = Pipeline::new(options);
            pipeline.add_transform(Transform::rewrite("desugar-parameters", &[], desugar));
            let rewritten = pipeline.apply(&tree)?;
            if Arc::ptr_eq(&tree, &rewritten) {
                info!("Nothing to desugar in {}", input.display());
            }

            let json = serde_json::to_string_pretty(&*rewritten)?;
            match output {
                Some(path) => {
                    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
                    info!("Wrote {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Stats { input } => {
            let tree = read_tree(&input)?;
            let counts = count_kinds(&tree)?;
            let total: usize = counts.values().sum();
            for (kind, count) in &counts {
                println!("{:<32} {count}", kind.to_string());
            }
            println!("{:<32} {total}", "total");
        }
    }
    Ok(())
}

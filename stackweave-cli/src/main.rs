use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use stackweave::{LayoutEngine, LayoutOpts, LayoutTree, LeafSizing, Size};

#[derive(Parser, Debug)]
#[command(name = "stackweave", version)]
struct Cli {
    /// Log each layout phase to stderr.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a tree and print the geometry of every node as JSON.
    Layout(LayoutArgs),
    /// Check that a tree file is a well-formed hierarchy.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input tree JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Proposed root width.
    #[arg(long)]
    width: f64,

    /// Proposed root height.
    #[arg(long)]
    height: f64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Layout options JSON; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Clamp leaf content to the proposed size.
    #[arg(long, default_value_t = false)]
    clamp_leaves: bool,

    /// Size sibling subtrees in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input tree JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(serde::Serialize, Debug)]
struct NodeRecord {
    id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    leaf: bool,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn load_opts(path: Option<&Path>) -> anyhow::Result<LayoutOpts> {
    let Some(path) = path else {
        return Ok(LayoutOpts::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read layout options '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parse layout options '{}'", path.display()))
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let tree = LayoutTree::from_path(&args.in_path)?;

    let mut opts = load_opts(args.config.as_deref())?;
    if args.clamp_leaves {
        opts.leaf_sizing = LeafSizing::ClampToProposal;
    }
    if args.parallel {
        opts.parallel = true;
    }

    let engine = LayoutEngine::with_opts(opts);
    let geometry = engine.layout(&tree, Size::new(args.width, args.height))?;

    let mut records = Vec::with_capacity(geometry.len());
    for id in tree.walk()? {
        let node = tree.node(id)?;
        let g = geometry
            .get(id)
            .with_context(|| format!("layout produced no geometry for node {id}"))?;
        records.push(NodeRecord {
            id: id.0,
            name: node.name.clone(),
            leaf: node.is_leaf(),
            x: g.position.x,
            y: g.position.y,
            width: g.size.width,
            height: g.size.height,
        });
    }

    let json = serde_json::to_string_pretty(&records).context("serialize geometry")?;
    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json)
                .with_context(|| format!("write geometry '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write geometry to stdout")?;
        }
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let tree = LayoutTree::from_path(&args.in_path)?;
    let nodes = tree.walk()?;
    eprintln!("{}: ok ({} nodes)", args.in_path.display(), nodes.len());
    Ok(())
}

// algotrace: instrumented algorithm traces with a terminal replay viewer

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use algotrace::algorithms::graph::{Graph, NodeId, Weight};
use algotrace::algorithms::{GraphAlgorithm, SortAlgorithm};
use algotrace::config::Settings;
use algotrace::engine::{DpTracer, GraphTracer, SortTracer, TreeTracer};
use algotrace::snapshot::Trace;
use algotrace::ui::App;
use algotrace::wire;

#[derive(Parser, Debug)]
#[command(
    name = "algotrace",
    about = "Step-by-step traces of classic algorithms",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// How to present the finished trace
    #[arg(long, value_enum, default_value_t = OutputOpt::Tui, global = true)]
    output: OutputOpt,

    /// Also write the full trace as JSON to this file
    #[arg(long, global = true)]
    export: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Dynamic programming: Fibonacci, 0-1 Knapsack, LCS
    Dp {
        #[arg(value_enum)]
        algorithm: DpOpt,

        /// Fibonacci index (0..=92)
        #[arg(long, default_value_t = 10, allow_hyphen_values = true)]
        n: i64,

        /// Knapsack capacity
        #[arg(long, default_value_t = 50, allow_hyphen_values = true)]
        capacity: i64,

        /// Knapsack item values, comma separated (default from settings)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        values: Option<Vec<i64>>,

        /// Knapsack item weights, comma separated (default from settings)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        weights: Option<Vec<i64>>,

        /// First LCS string (default from settings)
        #[arg(long)]
        first: Option<String>,

        /// Second LCS string (default from settings)
        #[arg(long)]
        second: Option<String>,
    },

    /// Graph traversal on the demo graph or a custom one
    Graph {
        #[arg(value_enum)]
        algorithm: GraphOpt,

        /// Start node
        #[arg(long, default_value_t = 0)]
        start: NodeId,

        /// Build a custom graph with this many nodes instead of the demo graph
        #[arg(long)]
        nodes: Option<usize>,

        /// Custom edge as SOURCE:TARGET[:WEIGHT] (weight defaults to 1)
        #[arg(long = "edge", value_parser = parse_edge, requires = "nodes")]
        edges: Vec<EdgeArg>,
    },

    /// Sorting with quicksort, mergesort or heapsort
    Sort {
        #[arg(value_enum)]
        algorithm: SortOpt,

        /// Random array size (default from settings)
        #[arg(long)]
        size: Option<usize>,

        /// Random seed (default from settings, else OS entropy)
        #[arg(long)]
        seed: Option<u64>,

        /// Sort these values instead of a random array
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, conflicts_with_all = ["size", "seed"])]
        values: Option<Vec<i64>>,
    },

    /// Binary search tree insert or search
    Tree {
        #[arg(value_enum)]
        operation: TreeOpt,

        #[arg(allow_hyphen_values = true)]
        value: i64,

        /// Values inserted (untraced) before the operation
        #[arg(long, value_delimiter = ',', default_value = "50,25,75,15", allow_hyphen_values = true)]
        preload: Vec<i64>,

        /// Start from an empty tree
        #[arg(long, conflicts_with = "preload")]
        empty: bool,
    },

    /// Replay a trace previously written with --export or --output json
    Replay { file: PathBuf },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum OutputOpt {
    /// Interactive replay viewer
    Tui,
    /// One block per step on stdout
    Text,
    /// Full trace JSON on stdout
    Json,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum DpOpt {
    Fibonacci,
    Knapsack,
    Lcs,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum GraphOpt {
    Dfs,
    Bfs,
    Dijkstra,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum SortOpt {
    Quick,
    Merge,
    Heap,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum TreeOpt {
    Insert,
    Search,
}

#[derive(Clone, Debug)]
struct EdgeArg {
    source: NodeId,
    target: NodeId,
    weight: Weight,
}

fn parse_edge(text: &str) -> Result<EdgeArg, String> {
    let parts: Vec<&str> = text.split(':').collect();
    let number = |s: &str| s.trim().parse::<i64>().map_err(|e| format!("{s:?}: {e}"));
    let node = |s: &str| s.trim().parse::<NodeId>().map_err(|e| format!("{s:?}: {e}"));
    match *parts.as_slice() {
        [s, t] => Ok(EdgeArg { source: node(s)?, target: node(t)?, weight: 1 }),
        [s, t, w] => Ok(EdgeArg { source: node(s)?, target: node(t)?, weight: number(w)? }),
        _ => Err(format!("expected SOURCE:TARGET[:WEIGHT], got {text:?}")),
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let (trace, title) = build_trace(cli.cmd, &settings)?;
    eprintln!("Trace recorded: {} steps.", trace.step_count());

    if let Some(path) = &cli.export {
        wire::write_trace(path, &trace)
            .with_context(|| format!("exporting trace to {}", path.display()))?;
        eprintln!("Trace exported to {}", path.display());
    }

    match cli.output {
        OutputOpt::Tui => run_tui(trace, title, &settings),
        OutputOpt::Text => print_text(&trace),
        OutputOpt::Json => {
            let json = wire::encode_trace(&trace)?;
            writeln!(io::stdout(), "{json}")?;
            Ok(())
        }
    }
}

/// Initialize tracing with an env-driven filter (default WARN) on stderr
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Run the requested algorithm. Returns the trace and a title for the viewer.
fn build_trace(cmd: Cmd, settings: &Settings) -> Result<(Trace, String)> {
    let result = match cmd {
        Cmd::Dp {
            algorithm,
            n,
            capacity,
            values,
            weights,
            first,
            second,
        } => {
            let tracer = DpTracer::new(settings.dp.clone());
            match algorithm {
                DpOpt::Fibonacci => (tracer.fibonacci(n), format!("Fibonacci({n})")),
                DpOpt::Knapsack => {
                    let values = values.unwrap_or_else(|| settings.dp.knapsack_values.clone());
                    let weights = weights.unwrap_or_else(|| settings.dp.knapsack_weights.clone());
                    (
                        tracer.knapsack(&values, &weights, capacity),
                        format!("0-1 Knapsack (capacity {capacity})"),
                    )
                }
                DpOpt::Lcs => {
                    let first = first.unwrap_or_else(|| settings.dp.lcs_first.clone());
                    let second = second.unwrap_or_else(|| settings.dp.lcs_second.clone());
                    let title = format!("LCS of {first:?} and {second:?}");
                    (tracer.lcs(&first, &second), title)
                }
            }
        }

        Cmd::Graph {
            algorithm,
            start,
            nodes,
            edges,
        } => {
            let mut tracer = match nodes {
                Some(count) => {
                    let mut tracer = GraphTracer::with_graph(Graph::new());
                    for _ in 0..count {
                        tracer.add_node();
                    }
                    for edge in &edges {
                        if !tracer.add_edge(edge.source, edge.target, edge.weight) {
                            bail!(
                                "edge {}:{} names a node outside 0..{}",
                                edge.source,
                                edge.target,
                                count
                            );
                        }
                    }
                    tracer
                }
                None => GraphTracer::with_graph(Graph::demo()),
            };
            let (algorithm, name) = match algorithm {
                GraphOpt::Dfs => (GraphAlgorithm::Dfs, "DFS"),
                GraphOpt::Bfs => (GraphAlgorithm::Bfs, "BFS"),
                GraphOpt::Dijkstra => (GraphAlgorithm::Dijkstra, "Dijkstra"),
            };
            (tracer.traverse(algorithm, start), format!("{name} from node {start}"))
        }

        Cmd::Sort {
            algorithm,
            size,
            seed,
            values,
        } => {
            let tracer = SortTracer::new(settings.sort.clone());
            let algorithm = match algorithm {
                SortOpt::Quick => SortAlgorithm::QuickSort,
                SortOpt::Merge => SortAlgorithm::MergeSort,
                SortOpt::Heap => SortAlgorithm::HeapSort,
            };
            let values = match values {
                Some(values) => values,
                None => {
                    let size = size.map_or(-1, |s| s as i64);
                    tracer.generate(size, seed).context("generating random array")?
                }
            };
            (tracer.sort(algorithm, values), algorithm.label().to_string())
        }

        Cmd::Tree {
            operation,
            value,
            preload,
            empty,
        } => {
            let mut tracer = TreeTracer::new();
            if !empty {
                tracer.preload(&preload);
            }
            match operation {
                TreeOpt::Insert => (tracer.insert(value), format!("BST insert {value}")),
                TreeOpt::Search => (tracer.search(value), format!("BST search {value}")),
            }
        }

        Cmd::Replay { file } => {
            let trace = wire::read_trace(&file)
                .with_context(|| format!("reading trace from {}", file.display()))?;
            (trace, format!("Replay of {}", file.display()))
        }
    };
    Ok(result)
}

fn print_text(trace: &Trace) -> Result<()> {
    let mut out = io::stdout().lock();
    if trace.is_empty() {
        writeln!(out, "(no steps)")?;
        return Ok(());
    }

    for snapshot in trace {
        writeln!(out, "[{}/{}]", snapshot.step, snapshot.total_steps)?;
        for line in snapshot.message.lines() {
            writeln!(out, "  {line}")?;
        }
        let active: Vec<String> = snapshot
            .highlighted()
            .map(|e| format!("#{}={}", e.id(), e.display_value()))
            .collect();
        if !active.is_empty() {
            writeln!(out, "  active: {}", active.join(", "))?;
        }
    }
    Ok(())
}

fn run_tui(trace: Trace, title: String, settings: &Settings) -> Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(trace, title, &settings.replay);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("replay viewer failed")
}

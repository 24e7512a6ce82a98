use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::config::resolve::load_config;
use crate::config::{OrgchartConfig, OutputFormat};
use crate::core::{ConsoleSink, Diagnostic, DiagnosticSink, Employee, Hierarchy};
use crate::error::{OrgchartError, Result};
use crate::graph::builder::HierarchyBuilder;
use crate::graph::viz;
use crate::util::output;

#[derive(Parser, Debug)]
#[command(name = "orgchart")]
#[command(about = "Organisation hierarchy and salary budget tool", long_about = None)]
pub struct Cli {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(short, long)]
    pub quiet: bool,
    #[arg(long)]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Budget(BudgetArgs),
    Show(ShowArgs),
    Walk(WalkArgs),
    Check(CheckArgs),
    Reports(ReportsArgs),
    Chain(ChainArgs),
}

#[derive(Args, Debug)]
pub struct BudgetArgs {
    /// Input file, or `-` for stdin
    pub input: PathBuf,
    pub manager: String,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    pub input: PathBuf,
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Args, Debug)]
pub struct WalkArgs {
    pub input: PathBuf,
    #[arg(long)]
    pub from: Option<String>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    pub input: PathBuf,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ReportsArgs {
    pub input: PathBuf,
    pub id: String,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ChainArgs {
    pub input: PathBuf,
    pub id: String,
    #[arg(long)]
    pub json: bool,
}

pub fn run() {
    let cli = Cli::parse();
    if cli.no_color {
        output::disable_colors();
    }
    if let Err(err) = dispatch(cli) {
        output::error(&err.to_string());
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let cwd = env::current_dir()?;
    let config = load_config(&cwd, cli.config)?;
    let mut sink = ConsoleSink::new(cli.quiet);

    match cli.command {
        Commands::Budget(args) => handle_budget(args, &config, &mut sink),
        Commands::Show(args) => handle_show(args, &config, &mut sink),
        Commands::Walk(args) => handle_walk(args, &config, &mut sink),
        Commands::Check(args) => handle_check(args, &config, cli.quiet),
        Commands::Reports(args) => handle_reports(args, &config, &mut sink),
        Commands::Chain(args) => handle_chain(args, &config, &mut sink),
    }
}

fn handle_budget(
    args: BudgetArgs,
    config: &OrgchartConfig,
    sink: &mut ConsoleSink,
) -> Result<()> {
    let hierarchy = load_hierarchy(&args.input, config, sink)?;
    let budget = hierarchy.salary_budget(&args.manager, sink);

    if args.json {
        print_json(&BudgetJson {
            manager: &args.manager,
            budget,
        })
    } else {
        println!("{budget}");
        Ok(())
    }
}

fn handle_show(
    args: ShowArgs,
    config: &OrgchartConfig,
    sink: &mut ConsoleSink,
) -> Result<()> {
    let hierarchy = load_hierarchy(&args.input, config, sink)?;
    let graph = hierarchy.graph();

    match args.format.unwrap_or(config.output.format) {
        OutputFormat::Readable => print!("{}", graph.to_readable()),
        OutputFormat::Tree => {
            let roots: Vec<Employee> = hierarchy.top_level().into_iter().cloned().collect();
            print!("{}", viz::render_tree(graph, &roots));
        }
        OutputFormat::Dot => print!("{}", viz::render_dot(graph, "orgchart")),
        OutputFormat::Json => {
            return print_json(&GraphJson {
                nodes: hierarchy.employees().collect(),
                edges: graph
                    .edges()
                    .map(|edge| {
                        let (from, to) = edge.into_parts();
                        GraphEdge {
                            from: from.id(),
                            to: to.id(),
                        }
                    })
                    .collect(),
            });
        }
    }
    Ok(())
}

fn handle_walk(
    args: WalkArgs,
    config: &OrgchartConfig,
    sink: &mut ConsoleSink,
) -> Result<()> {
    let hierarchy = load_hierarchy(&args.input, config, sink)?;
    let order = hierarchy.walk(args.from.as_deref())?;
    print_ids(&order, args.json)
}

fn handle_check(args: CheckArgs, config: &OrgchartConfig, quiet: bool) -> Result<()> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let hierarchy = load_hierarchy(&args.input, config, &mut diagnostics)?;
    let summary = CheckJson {
        employees: hierarchy.len(),
        reporting_lines: hierarchy.graph().edges_count(),
        root: hierarchy.root().map(Employee::id),
        diagnostics: &diagnostics,
    };

    if args.json {
        print_json(&summary)?;
    } else {
        if !quiet {
            for diagnostic in &diagnostics {
                output::warn(&diagnostic.to_string());
            }
            if diagnostics.is_empty() {
                output::info("no rejected records");
            }
        }
        println!("employees: {}", summary.employees);
        println!("reporting lines: {}", summary.reporting_lines);
        println!("root: {}", summary.root.unwrap_or("-"));
        println!("rejected: {}", diagnostics.len());
    }

    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(OrgchartError::Rejected(diagnostics.len()))
    }
}

fn handle_reports(
    args: ReportsArgs,
    config: &OrgchartConfig,
    sink: &mut ConsoleSink,
) -> Result<()> {
    let hierarchy = load_hierarchy(&args.input, config, sink)?;
    let reports = hierarchy.reports_of(&args.id)?;
    print_employees(&reports, args.json)
}

fn handle_chain(
    args: ChainArgs,
    config: &OrgchartConfig,
    sink: &mut ConsoleSink,
) -> Result<()> {
    let hierarchy = load_hierarchy(&args.input, config, sink)?;
    let chain = hierarchy.chain_of_command(&args.id)?;
    print_ids(&chain, args.json)
}

fn load_hierarchy(
    input: &Path,
    config: &OrgchartConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<Hierarchy> {
    let options = config.input.record_options()?;
    let contents = read_input(input)?;
    Ok(HierarchyBuilder::new(options).build(contents.lines(), sink))
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .context("failed to read records from stdin")?;
        return Ok(contents);
    }
    let contents = fs::read_to_string(input)
        .with_context(|| format!("failed to read records from {}", input.display()))?;
    Ok(contents)
}

fn print_ids(employees: &[&Employee], json: bool) -> Result<()> {
    if json {
        let ids: Vec<&str> = employees.iter().map(|e| e.id()).collect();
        return print_json(&ids);
    }
    for employee in employees {
        println!("{}", employee.id());
    }
    Ok(())
}

fn print_employees(employees: &[&Employee], json: bool) -> Result<()> {
    if json {
        return print_json(&employees);
    }
    for employee in employees {
        println!("{}\t{}", employee.id(), employee.salary());
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value)
            .map_err(|err| OrgchartError::Other(anyhow::Error::new(err)))?
    );
    Ok(())
}

#[derive(Serialize)]
struct BudgetJson<'a> {
    manager: &'a str,
    budget: u64,
}

#[derive(Serialize)]
struct GraphJson<'a> {
    nodes: Vec<&'a Employee>,
    edges: Vec<GraphEdge<'a>>,
}

#[derive(Serialize)]
struct GraphEdge<'a> {
    from: &'a str,
    to: &'a str,
}

#[derive(Serialize)]
struct CheckJson<'a> {
    employees: usize,
    reporting_lines: usize,
    root: Option<&'a str>,
    diagnostics: &'a [Diagnostic],
}

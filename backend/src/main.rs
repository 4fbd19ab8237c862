//! Menucheck CLI - Analyze POS catalog CSV exports
//!
//! ```bash
//! menucheck menus catalog.csv                       # List root menus
//! menucheck names catalog.csv --menu Lunch          # Validate item names
//! menucheck combos catalog.csv --hide-empty         # Summarize combos
//! menucheck combos catalog.csv --show-empty         # Keep empty combos
//! menucheck check-name "Fish & Chips"               # Validate one name
//! menucheck serve                                   # Start HTTP server
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use menucheck::api::logs::LOG_BROADCASTER;
use menucheck::{
    analyze_file, export_csv, parse_csv_file_auto, root_menus, validate_name, validity_text,
    AnalysisReport, AnalyzeOptions, Config, MenuFilter, Mode, OutputRows, ALL_MENUS,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "menucheck")]
#[command(about = "Analyze POS catalog CSV exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Aligned text columns
    Table,
    /// Quoted CSV, as exported by the API
    Csv,
    /// JSON report
    Json,
}

#[derive(clap::Args)]
struct QueryArgs {
    /// Input CSV file
    input: PathBuf,

    /// Root menu to filter on
    #[arg(short, long, default_value = ALL_MENUS)]
    menu: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail if a required column is missing
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the root menus found in a CSV file
    Menus {
        /// Input CSV file
        input: PathBuf,
    },

    /// List item names with their validity
    Names {
        #[command(flatten)]
        query: QueryArgs,

        /// Only show names that break a rule
        #[arg(long)]
        invalid_only: bool,
    },

    /// Summarize combo contents
    Combos {
        #[command(flatten)]
        query: QueryArgs,

        /// Hide combos with no items or sub-items
        #[arg(long)]
        hide_empty: bool,

        /// Keep empty combos even if MENUCHECK_HIDE_EMPTY_COMBOS is set
        #[arg(long, conflicts_with = "hide_empty")]
        show_empty: bool,
    },

    /// Validate a single item name
    CheckName {
        /// Name to check, as-is
        name: String,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on (default: MENUCHECK_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    let config = Config::load();
    LOG_BROADCASTER.set_echo(!config.quiet);

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Menus { input } => cmd_menus(&input),

        Commands::Names { query, invalid_only } => {
            cmd_query(query, Mode::NameListing { invalid_only })
        }

        Commands::Combos {
            query,
            hide_empty,
            show_empty,
        } => {
            let explicit = match (hide_empty, show_empty) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            cmd_query(
                query,
                Mode::ComboSummary {
                    suppress_empty: config.suppress_empty_combos(explicit),
                },
            )
        }

        Commands::CheckName { name } => cmd_check_name(&name),

        Commands::Serve { port } => cmd_serve(config, port).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_menus(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let result = parse_csv_file_auto(input)?;
    let menus = root_menus(&result.table);

    if menus.is_empty() {
        eprintln!("📋 No menus found (is there a Menu/Screen column?)");
    }
    for menu in menus {
        println!("{}", menu);
    }
    Ok(())
}

fn cmd_query(args: QueryArgs, mode: Mode) -> Result<(), Box<dyn std::error::Error>> {
    let options = AnalyzeOptions {
        menu: MenuFilter::from(args.menu.as_str()),
        mode,
        strict_columns: args.strict,
    };

    let report = analyze_file(&args.input, &options)?;
    let content = match args.format {
        Format::Table => format_table(&report.output),
        Format::Csv => export_csv(&report.output)?,
        Format::Json => serde_json::to_string_pretty(&report)?,
    };
    write_output(&content, args.output.as_deref())?;

    summarize(&report);
    Ok(())
}

fn cmd_check_name(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let violations = validate_name(name);
    println!("{}", validity_text(&violations));

    if !violations.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

async fn cmd_serve(config: Config, port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config {
        port: port.unwrap_or(config.port),
        ..config
    };
    menucheck::server::start_server(config).await?;
    Ok(())
}

fn summarize(report: &AnalysisReport) {
    if !report.missing_columns.is_empty() {
        eprintln!("⚠️  Missing columns: {}", report.missing_columns.join(", "));
    }
    if report.output.is_empty() {
        eprintln!("📋 No rows to show.");
    }
}

/// Plain aligned columns for terminal output.
fn format_table(rows: &OutputRows) -> String {
    let headers = rows.headers();
    let records = rows.records();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for record in &records {
        for (width, field) in widths.iter_mut().zip(record) {
            *width = (*width).max(field.chars().count());
        }
    }

    let line = |fields: Vec<&str>| -> String {
        fields
            .iter()
            .zip(&widths)
            .map(|(field, width)| format!("{:<width$}", field, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.to_vec())];
    out.extend(
        records
            .iter()
            .map(|record| line(record.iter().map(String::as_str).collect())),
    );
    out.join("\n")
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

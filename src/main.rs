use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use eveboard::analysis::{bar_chart, pie_chart, Summary};
use eveboard::config::{DashboardConfig, LogFormat};
use eveboard::table::{Column, Direction, DisplayRow, RecordFilter, SortState, TableView};

#[derive(Parser)]
#[command(
    name = "eveboard",
    about = "Dashboard over static IDS alert fixtures",
    version,
    long_about = None
)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Alert data file; overrides the configured path
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print alert counts by signature and the severity distribution
    Summary {
        /// JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },

    /// Print the alert details table
    Table {
        /// Keep rows whose source IP contains this text
        #[arg(long)]
        src_ip: Option<String>,

        /// Keep rows whose destination IP contains this text
        #[arg(long)]
        dest_ip: Option<String>,

        /// Keep rows with exactly this severity
        #[arg(long, allow_hyphen_values = true)]
        severity: Option<i64>,

        /// Keep rows whose protocol contains this text
        #[arg(long)]
        protocol: Option<String>,

        /// Keep rows whose category contains this text
        #[arg(long)]
        category: Option<String>,

        /// Column to sort by (e.g. timestamp, src_ip, port, severity)
        #[arg(long)]
        sort: Option<Column>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Print at most this many rows
        #[arg(long)]
        limit: Option<usize>,

        /// JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },

    /// Serve the dashboard page and JSON API
    Serve {
        /// Bind address
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let bootstrap_format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    let mut config = eveboard::telemetry::bootstrap(bootstrap_format, || {
        DashboardConfig::resolve(cli.config.as_deref())
    })?;
    if cli.log_json {
        config.logging.format = LogFormat::Json;
    }
    if let Some(path) = cli.data {
        config.data.path = path;
    }
    eveboard::telemetry::init(&config.logging);
    tracing::debug!(?config, "configuration resolved");

    let alerts = eveboard::dataset::load_alerts(&config.data.path)
        .with_context(|| format!("could not load alerts from {}", config.data.path.display()))?;

    match cli.command {
        Commands::Summary { json } => {
            let summary = Summary::from_records(alerts.records());
            if json {
                let output = json!({
                    "summary": summary,
                    "charts": {
                        "signatures": bar_chart(&summary.signatures),
                        "severity": pie_chart(&summary.severities),
                    }
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", eveboard::render::render_summary(&summary));
            }
        }
        Commands::Table {
            src_ip,
            dest_ip,
            severity,
            protocol,
            category,
            sort,
            desc,
            limit,
            json,
        } => {
            let mut filter = RecordFilter::new();
            filter.set(Column::SrcIp, src_ip.as_deref())?;
            filter.set(Column::DestIp, dest_ip.as_deref())?;
            filter.set(Column::Protocol, protocol.as_deref())?;
            filter.set(Column::Category, category.as_deref())?;
            filter.set_severity(severity);

            let sort = match sort {
                Some(column) => {
                    let direction = if desc { Direction::Desc } else { Direction::Asc };
                    SortState::by(column, direction)
                }
                None => config.table.default_sort(),
            };
            let view = TableView::new(filter, sort);
            tracing::info!(?view, "rendering alert table");

            let records = view.select(alerts.records());
            let shown = limit.or(config.table.limit).unwrap_or(records.len());
            if json {
                let output: Vec<_> = records.iter().take(shown).collect();
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                let rows: Vec<DisplayRow> = records
                    .iter()
                    .map(|r| DisplayRow::from_record(r))
                    .collect();
                let shown = shown.min(rows.len());
                print!(
                    "{}",
                    eveboard::render::render_table(&view.headers(), &rows[..shown])
                );
                if shown < rows.len() {
                    println!("showing {} of {} matching rows", shown, rows.len());
                }
            }
        }
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or(config.server.bind);
            tracing::info!(%bind, records = alerts.len(), "starting eveboard dashboard");
            eveboard::serve(&bind, alerts, config.table.default_sort()).await?;
        }
    }

    Ok(())
}

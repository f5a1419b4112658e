use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, Attribute, Cell, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use hcview::api::{self, ApiClient};
use hcview::config::{self, Config};
use hcview::error::InventoryError;
use hcview::models::{column_index, ClusterAttributes, InventorySnapshot, TableRow, CLUSTER_COLUMNS, VM_COLUMNS};
use hcview::services::{
    aggregate_virdomains, expand_rows, flatten_registration, sort_rows, totals_row, write_workbook,
};

#[derive(Parser)]
#[command(
    name = "hcview",
    author,
    version,
    about = "HyperCore inventory viewer",
    long_about = r#"hcview — view and export cluster and virtual machine inventory from a
HyperCore cluster.

Connection settings come from the environment (HYPERCORE_HOST,
HYPERCORE_USERNAME, HYPERCORE_PASSWORD), optionally loaded from a .env
file. Create a read-only user on the cluster for this tool.

Examples:
  1) Show the flattened cluster attributes:
      hcview cluster
  2) Show the VM table sorted by memory, largest first:
      hcview vms --sort-by "Memory (GiB)" --desc
  3) Export both views to a spreadsheet:
      hcview export --output inventory.xlsx
"#,
    after_help = "Use `hcview <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Path to a .env file with connection settings
    #[arg(long, global = true)]
    env_file: Option<String>,
    /// Cluster node IP or hostname (overrides HYPERCORE_HOST)
    #[arg(long, global = true)]
    host: Option<String>,
    /// API username (overrides HYPERCORE_USERNAME)
    #[arg(long, global = true)]
    username: Option<String>,
    /// API password (overrides HYPERCORE_PASSWORD)
    #[arg(long, global = true)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the flattened cluster attribute table
    #[command(about = "Show cluster attributes", long_about = "Fetch the cluster registration records and print the flattened Tag/Value attribute table. On a malformed attribute tree the attributes collected so far are still printed before the error.")]
    Cluster,
    /// Show the virtual machine table with a totals row
    #[command(about = "Show the VM inventory table", long_about = "Fetch the VM inventory, aggregate records by VM name, and print one row per block device with a totals row last. Devices of type NVRAM, IDE_CDROM and VTPM are hidden.")]
    Vms {
        /// Column header to sort by (case-insensitive), e.g. "vCPUs"
        #[arg(long)]
        sort_by: Option<String>,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },
    /// Fetch both views and write them to a two-sheet spreadsheet
    #[command(about = "Export inventory to a spreadsheet", long_about = "Fetch the VM inventory and the cluster attributes, then write an .xlsx workbook with a \"Cluster\" sheet and a \"Virtual Machines\" sheet. Fails if either fetch returns no data.")]
    Export {
        /// Output file path (defaults to a timestamped .xlsx in the current directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Validate connection settings and probe the cluster API
    #[command(about = "Validate configuration and ensure API connectivity.", long_about = "Check that credentials are configured, then attempt to fetch the registration resource from the cluster.")]
    CheckConfig,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    config::load_env_file(cli.env_file.as_deref());
    let mut cfg = config::from_env();
    if let Some(host) = &cli.host {
        cfg.host = config::sanitize_host(host);
    }
    if let Some(username) = &cli.username {
        cfg.username = username.clone();
    }
    if let Some(password) = &cli.password {
        cfg.password = password.clone();
    }

    let outcome = match &cli.command {
        Commands::Cluster => run_cluster(&cfg).await,
        Commands::Vms { sort_by, desc } => run_vms(&cfg, sort_by.as_deref(), *desc).await,
        Commands::Export { output } => run_export(&cfg, output.clone()).await,
        Commands::CheckConfig => run_check_config(&cfg).await,
    };

    if let Err(e) = outcome {
        eprintln!("{}", yansi::Paint::new(format!("Error: {}", e)).red());
        process::exit(1);
    }
}

async fn run_cluster(cfg: &Config) -> Result<(), InventoryError> {
    let client = ApiClient::new(cfg)?;
    let records = api::load_registration(&client).await?;
    let (attributes, failure) = flatten_registration(&records);

    print_cluster_table(&attributes);
    println!(
        "{}",
        yansi::Paint::new(format!("{} attributes", attributes.len())).dim()
    );

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

async fn run_vms(cfg: &Config, sort_by: Option<&str>, desc: bool) -> Result<(), InventoryError> {
    let client = ApiClient::new(cfg)?;
    let records = api::load_virdomains(&client).await?;
    let vms = aggregate_virdomains(records);

    let mut rows = expand_rows(&vms);
    rows.push(totals_row(&vms));

    if let Some(header) = sort_by {
        let Some(column) = column_index(header) else {
            eprintln!(
                "{} '{}'. Valid columns: {}",
                yansi::Paint::new("Unknown column").red(),
                header,
                VM_COLUMNS.join(", ")
            );
            process::exit(2);
        };
        sort_rows(&mut rows, column, desc);
    }

    print_vm_table(&rows);
    println!(
        "{}",
        yansi::Paint::new(format!("{} VMs, {} rows", vms.len(), rows.len().saturating_sub(1))).dim()
    );
    Ok(())
}

async fn run_export(cfg: &Config, output: Option<PathBuf>) -> Result<(), InventoryError> {
    let client = ApiClient::new(cfg)?;

    let records = api::load_virdomains(&client).await?;
    let vms = aggregate_virdomains(records);

    let registration = api::load_registration(&client).await?;
    let (cluster, failure) = flatten_registration(&registration);
    if let Some(e) = failure {
        if cluster.is_empty() {
            return Err(e);
        }
        eprintln!(
            "{}",
            yansi::Paint::new(format!(
                "Warning: {} (exporting the attributes collected so far)",
                e
            ))
            .yellow()
        );
    }

    let snapshot = InventorySnapshot { vms, cluster };
    let path = output.unwrap_or_else(default_export_path);
    write_workbook(&snapshot, &path)?;

    println!(
        "{} {}",
        yansi::Paint::new("Successfully exported to").green(),
        yansi::Paint::new(path.display().to_string()).cyan()
    );
    Ok(())
}

async fn run_check_config(cfg: &Config) -> Result<(), InventoryError> {
    cfg.validate()?;
    let client = ApiClient::new(cfg)?;
    let records = api::load_registration(&client).await?;
    println!(
        "{}",
        yansi::Paint::new(format!(
            "Configuration looks valid ({} registration records)",
            records.len()
        ))
        .green()
    );
    Ok(())
}

fn default_export_path() -> PathBuf {
    PathBuf::from(format!(
        "hypercore-inventory-{}.xlsx",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ))
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn print_cluster_table(attributes: &ClusterAttributes) {
    let mut table = new_table();
    table.set_header(CLUSTER_COLUMNS.to_vec());
    for (tag, value) in attributes {
        table.add_row(vec![tag.as_str(), value.as_str()]);
    }
    println!("\n{table}\n");
}

fn print_vm_table(rows: &[TableRow]) {
    let mut table = new_table();
    table.set_header(VM_COLUMNS.to_vec());
    for row in rows {
        let cells = row.cells();
        if row.is_total() {
            table.add_row(
                cells
                    .iter()
                    .map(|c| Cell::new(c).add_attribute(Attribute::Bold))
                    .collect::<Vec<_>>(),
            );
        } else {
            table.add_row(cells.to_vec());
        }
    }
    println!("\n{table}\n");
}

mod config;
mod labels_cmd;
mod purchased_cmd;
mod services_cmd;
mod stores_cmd;
#[cfg(test)]
mod test_util;
mod tui;

use std::io;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use ditto_core::labels::default_labels;
use ditto_core::stores::{DeliveryStatus, load_catalog};
use ditto_core::{AddOn, Plan, ScreenVariant};

use config::DittoConfig;
use labels_cmd::LabelOps;

#[derive(Parser)]
#[command(name = "ditto", about = "Release services and store status for Ditto plans")]
struct Cli {
    /// Subscription plan (overrides DITTO_PLAN env var and config file)
    #[arg(long, global = true)]
    plan: Option<Plan>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a ditto config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Show the services screen and cart
    Services {
        /// Comma-separated add-ons to select (e.g. charts-uk,pre-release).
        /// Services the plan includes or hides are rejected.
        #[arg(long, value_delimiter = ',')]
        select: Vec<AddOn>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show only the cart for a selection
    Cart {
        /// Comma-separated add-ons to select. Services the plan includes or
        /// hides are rejected.
        #[arg(long, value_delimiter = ',')]
        select: Vec<AddOn>,
        #[arg(long)]
        json: bool,
    },
    /// Show the distribution options for the plan
    Features {
        #[arg(long)]
        json: bool,
    },
    /// Show store delivery status
    Stores {
        /// Only list stores with this status (sent or rejected)
        #[arg(long)]
        status: Option<DeliveryStatus>,
        #[arg(long)]
        json: bool,
    },
    /// Render the services route for a screen variant (a plan or `purchased`)
    Screen {
        variant: ScreenVariant,
        #[arg(long)]
        json: bool,
    },
    /// Show the services view after purchase
    Purchased {
        #[arg(long)]
        json: bool,
    },
    /// Add, upgrade or select Beatport labels for this session
    Labels {
        /// Add a new Beatport label (repeatable)
        #[arg(long)]
        add: Vec<String>,
        /// Mark an existing label as set up on Beatport (repeatable)
        #[arg(long)]
        upgrade: Vec<String>,
        /// Make a label the active one
        #[arg(long)]
        select: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Launch interactive TUI dashboard
    Dashboard,
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

/// Execute the `ditto init` command: write config file.
fn cmd_init(plan: Option<Plan>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let plan = plan.unwrap_or(Plan::Starter);
    let cfg = config::ConfigFile {
        dashboard: config::DashboardSection {
            plan: plan.to_string(),
        },
        labels: default_labels(),
    };
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  dashboard.plan = {plan}");
    println!("  labels = {}", cfg.labels.len());
    Ok(())
}

fn init_logging(dashboard: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    // The dashboard owns the terminal; log lines would corrupt the screen.
    if dashboard {
        builder.with_writer(io::sink).init();
    } else {
        builder.with_writer(io::stderr).init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(matches!(cli.command, Commands::Dashboard));

    match cli.command {
        Commands::Init { force } => {
            cmd_init(cli.plan, force)?;
        }
        Commands::Services { select, json } => {
            let resolved = DittoConfig::resolve(cli.plan)?;
            let state = services_cmd::build_state(resolved.plan, resolved.labels, &select)?;
            services_cmd::run_services(&state, json)?;
        }
        Commands::Cart { select, json } => {
            let resolved = DittoConfig::resolve(cli.plan)?;
            let state = services_cmd::build_state(resolved.plan, resolved.labels, &select)?;
            services_cmd::run_cart(&state, json)?;
        }
        Commands::Features { json } => {
            let resolved = DittoConfig::resolve(cli.plan)?;
            stores_cmd::run_features(resolved.plan, json)?;
        }
        Commands::Stores { status, json } => {
            let resolved = DittoConfig::resolve(cli.plan)?;
            let catalog = load_catalog();
            stores_cmd::run_stores(&catalog, resolved.plan, status, json)?;
        }
        Commands::Screen { variant, json } => match variant.plan() {
            Some(plan) => {
                let resolved = DittoConfig::resolve(Some(plan))?;
                let state = services_cmd::build_state(plan, resolved.labels, &[])?;
                services_cmd::run_services(&state, json)?;
            }
            None => purchased_cmd::run_purchased(json)?,
        },
        Commands::Purchased { json } => {
            purchased_cmd::run_purchased(json)?;
        }
        Commands::Labels {
            add,
            upgrade,
            select,
            json,
        } => {
            let resolved = DittoConfig::resolve(cli.plan)?;
            let ops = LabelOps {
                add,
                upgrade,
                select,
            };
            labels_cmd::run_labels(resolved.labels, &ops, json)?;
        }
        Commands::Dashboard => {
            let resolved = DittoConfig::resolve(cli.plan)?;
            tui::run_dashboard(resolved.plan, resolved.labels)
                .context("dashboard exited with an error")?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "ditto", &mut io::stdout());
        }
    }

    Ok(())
}

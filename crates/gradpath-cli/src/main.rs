mod config;
mod plan_cmd;
mod serve_cmd;
mod tree_cmd;

#[cfg(test)]
mod test_util;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use gradpath_catalog::Catalog;
use gradpath_core::{JsonFileSource, PlanController};

use config::GradpathConfig;

#[derive(Parser)]
#[command(name = "gradpath", about = "Course prerequisite planner")]
struct Cli {
    /// Catalog directory (overrides GRADPATH_CATALOG_DIR env var)
    #[arg(long, global = true)]
    catalog_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a gradpath config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Lay out a plan by semester
    Plan {
        /// Target course ids; prerequisites are added automatically
        courses: Vec<String>,
        /// Read the plan from a plan.toml file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Mark a course as completed (repeatable)
        #[arg(long)]
        completed: Vec<String>,
        /// Credits required to graduate
        #[arg(long)]
        min_credits: Option<u32>,
        /// Print the layout as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every course a course transitively requires
    Closure {
        /// Course id
        course: String,
    },
    /// Expand and print a course's requirement tree
    Tree {
        /// Course id
        course: String,
        /// List every OR-free way to satisfy the tree
        #[arg(long)]
        split: bool,
        /// Annotate courses with tree-scoped semesters
        #[arg(long)]
        semesters: bool,
        /// Maximum number of alternatives to list
        #[arg(long, default_value_t = tree_cmd::DEFAULT_MAX_SPLITS)]
        max_splits: usize,
    },
    /// List catalog courses
    Courses {
        /// Case-insensitive filter on id or name (at least two characters)
        search: Option<String>,
    },
    /// Start the planning HTTP API
    Serve {
        /// Address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

/// Execute the `gradpath init` command: write the config file.
fn cmd_init(catalog_dir: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let dir = catalog_dir.unwrap_or_else(|| PathBuf::from(gradpath_catalog::CatalogConfig::DEFAULT_DIR));
    let cfg = config::ConfigFile {
        catalog: config::CatalogSection { dir: dir.clone() },
        layout: Default::default(),
    };
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  catalog.dir = {}", dir.display());
    if !dir.join(gradpath_catalog::CatalogConfig::COURSES_FILE).exists() {
        println!();
        println!(
            "Note: {} has no {} yet.",
            dir.display(),
            gradpath_catalog::CatalogConfig::COURSES_FILE
        );
    }

    Ok(())
}

fn load_catalog(resolved: &GradpathConfig) -> anyhow::Result<Catalog> {
    Catalog::load(&resolved.catalog).with_context(|| {
        format!(
            "failed to load catalog from {}",
            resolved.catalog.dir().display()
        )
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            cmd_init(cli.catalog_dir, force)?;
        }
        Commands::Plan {
            courses,
            file,
            completed,
            min_credits,
            json,
        } => {
            let resolved = GradpathConfig::resolve(cli.catalog_dir.as_deref());
            let catalog = load_catalog(&resolved)?;
            let args = plan_cmd::PlanArgs {
                courses,
                file,
                completed,
                min_credits,
                json,
            };
            plan_cmd::run_plan(&catalog, &args)?;
        }
        Commands::Closure { course } => {
            let resolved = GradpathConfig::resolve(cli.catalog_dir.as_deref());
            let catalog = load_catalog(&resolved)?;
            plan_cmd::run_closure(&catalog, &course)?;
        }
        Commands::Tree {
            course,
            split,
            semesters,
            max_splits,
        } => {
            let resolved = GradpathConfig::resolve(cli.catalog_dir.as_deref());
            let source = JsonFileSource::new(resolved.catalog.trees_path());
            let args = tree_cmd::TreeArgs {
                course,
                split,
                semesters,
                max_splits,
            };
            tree_cmd::run_tree(&source, &args).await?;
        }
        Commands::Courses { search } => {
            let resolved = GradpathConfig::resolve(cli.catalog_dir.as_deref());
            let catalog = load_catalog(&resolved)?;
            plan_cmd::run_courses(Arc::new(catalog), search.as_deref()).await?;
        }
        Commands::Serve { bind, port } => {
            let resolved = GradpathConfig::resolve(cli.catalog_dir.as_deref());
            let catalog = load_catalog(&resolved)?;
            let state = serve_cmd::AppState {
                controller: Arc::new(PlanController::new(Arc::new(catalog))),
                grid: resolved.grid,
            };
            serve_cmd::run_serve(state, &bind, port).await?;
        }
    }

    Ok(())
}

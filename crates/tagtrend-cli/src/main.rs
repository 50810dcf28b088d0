mod flow;
mod store;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::flow::WeeklyFlow;
use crate::store::TableStore;

#[derive(Debug, Parser)]
#[command(name = "tagtrend")]
#[command(about = "Weekly trending-tag aggregation pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Filter a raw bronze table into the silver layer
    Refine {
        /// Bronze table as JSON (`columns` + `rows`)
        #[arg(long)]
        input: PathBuf,
    },
    /// Aggregate the latest silver batch into the weekly trend tables
    Trends,
    /// Rebuild the tag × period training matrix
    Matrix,
    /// Rebuild the top-tag evolution report over recent weeks
    Evolution,
    /// Copy the newest prediction over the last one
    Promote,
    /// Score the last prediction against the latest weekly trends
    Evaluate,
    /// Run every step for one new bronze batch
    Weekly {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the canonical form of a comma-space separated tag list
    Dedupe { tags: String },
}

fn main() -> anyhow::Result<()> {
    let config = tagtrend_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let trends_config = tagtrend_core::load_trends_config(&config.config_path)?;
    let engine = tagtrend_engine::TrendEngine::new(trends_config)?;
    tracing::debug!(env = %config.env, data_dir = %config.data_dir.display(), "configuration loaded");

    let flow = |engine| WeeklyFlow::new(engine, TableStore::new(&config.data_dir));
    match cli.command {
        Commands::Dedupe { tags } => {
            let raw: Vec<&str> = tagtrend_engine::split_tags(&tags).collect();
            for tag in engine.dedupe(&raw) {
                println!("{tag}");
            }
        }
        Commands::Refine { input } => {
            flow(engine).refine(&input)?;
        }
        Commands::Trends => {
            flow(engine).trends()?;
        }
        Commands::Matrix => flow(engine).matrix()?,
        Commands::Evolution => flow(engine).evolution()?,
        Commands::Promote => flow(engine).promote()?,
        Commands::Evaluate => {
            if let Some(evaluation) = flow(engine).evaluate()? {
                println!("{}\t{:.4}", evaluation.period, evaluation.score);
            }
        }
        Commands::Weekly { input } => flow(engine).weekly(&input)?,
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;

//! Claimflow CLI - Main entry point

use claimflow_cli::{commands, AppContext};
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "claimflow")]
#[command(about = "Claimflow - Expense claim workflow and decision engine", long_about = None)]
struct Cli {
    /// SQLite database path
    #[arg(long, default_value = "./data/claims.db")]
    db: PathBuf,

    /// JSON config file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a claim and print its receipt
    #[command(group(ArgGroup::new("input").required(true).args(["json", "owner"])))]
    Submit {
        /// Raw JSON object with the claim fields
        #[arg(long, conflicts_with_all = ["amount", "category", "description", "receipt"])]
        json: Option<String>,
        /// Claimant ID
        #[arg(long, requires_all = ["amount", "category", "description"])]
        owner: Option<String>,
        /// Amount (decimal number)
        #[arg(long)]
        amount: Option<String>,
        /// Expense category
        #[arg(long)]
        category: Option<String>,
        /// What the expense was for
        #[arg(long)]
        description: Option<String>,
        /// A receipt is attached
        #[arg(long)]
        receipt: bool,
    },

    /// Show a stored claim
    Get {
        /// Claim ID (EXP-...)
        id: String,
    },

    /// List a claimant's claims, newest first
    List {
        /// Claimant ID
        owner: String,
        /// Cursor from the previous page
        #[arg(long)]
        cursor: Option<String>,
    },

    /// Approve or reject a claim that needs review
    #[command(group(ArgGroup::new("verdict").required(true).args(["approve", "reject"])))]
    Review {
        /// Claim ID
        id: String,
        #[arg(long)]
        approve: bool,
        #[arg(long)]
        reject: bool,
        /// Why (at least 10 characters)
        #[arg(long)]
        reason: String,
        /// Reviewer name
        #[arg(long)]
        reviewer: Option<String>,
    },

    /// Delete a stored claim
    Delete {
        /// Claim ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(&cli.db, cli.config.as_deref()).await?;

    let output = match cli.command {
        Commands::Submit {
            json: Some(payload),
            ..
        } => commands::submit_json(&ctx, &payload).await?,

        Commands::Submit {
            owner,
            amount,
            category,
            description,
            receipt,
            ..
        } => {
            let args = commands::ClaimArgs {
                owner: owner.unwrap_or_default(),
                amount: amount.unwrap_or_default(),
                category: category.unwrap_or_default(),
                description: description.unwrap_or_default(),
                receipt,
            };
            commands::submit(&ctx, args).await?
        }

        Commands::Get { id } => commands::get(&ctx, &id).await?,

        Commands::List { owner, cursor } => {
            commands::list(&ctx, &owner, cursor.as_deref()).await?
        }

        Commands::Review {
            id,
            approve,
            reject: _,
            reason,
            reviewer,
        } => commands::review(&ctx, &id, approve, reason, reviewer).await?,

        Commands::Delete { id } => commands::delete(&ctx, &id).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

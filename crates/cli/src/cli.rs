//! Command-line arguments.
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "leftover.toml";

/// Root CLI entrypoint. Without a subcommand, starts the interactive session.
#[derive(Parser, Debug)]
#[command(
    name = "leftover",
    version,
    about = "Find recipes for the ingredients you have left over",
    after_help = "Examples:\n  leftover search egg, rice --healthy\n  leftover recipe 1\n  leftover feedback 1 --helpful --query \"egg, rice\"\n  leftover top\n  leftover"
)]
pub struct RootArgs {
    /// Config file (defaults to $LEFTOVER_CONFIG, then leftover.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    Search(SearchArgs),
    Recipe(RecipeArgs),
    Feedback(FeedbackArgs),
    Top,
    Interactive,
}

#[derive(Parser, Debug, PartialEq)]
#[command(about = "Search recipes by ingredients")]
pub struct SearchArgs {
    /// Ingredients, e.g. "chicken, rice, egg"
    #[arg(required = true, num_args = 1.., value_name = "TEXT")]
    pub text: Vec<String>,

    /// Only show healthy recipes
    #[arg(long)]
    pub healthy: bool,
}

impl SearchArgs {
    pub fn query_text(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Parser, Debug, PartialEq)]
#[command(about = "Show one recipe")]
pub struct RecipeArgs {
    pub id: String,

    /// Search text the recipe was found with
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub query: String,
}

#[derive(Parser, Debug, PartialEq)]
#[command(about = "Rate a recipe recommendation")]
#[command(group(ArgGroup::new("vote").required(true).args(["helpful", "not_helpful"])))]
pub struct FeedbackArgs {
    pub id: String,

    #[arg(long)]
    pub helpful: bool,

    #[arg(long)]
    pub not_helpful: bool,

    /// Search text the recipe was found with
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub query: String,
}

impl FeedbackArgs {
    /// Whether the vote is "helpful".
    pub fn is_helpful(&self) -> bool {
        self.helpful && !self.not_helpful
    }
}

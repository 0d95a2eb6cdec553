// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recommender")]
#[command(about = "Recipe recommendations from free-text descriptions", long_about = None)]
pub struct Cli {
    /// Recipe dataset (.csv or .json)
    #[arg(long, global = true, env = "DATASET_PATH")]
    pub dataset: Option<PathBuf>,

    /// Number of recipes sampled from the dataset (0 = all)
    #[arg(long, global = true, env = "SAMPLE_SIZE")]
    pub sample_size: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the recommendation server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Recommend recipes for a description
    Recommend {
        /// What you want to cook
        query: String,

        /// Number of recommendations
        #[arg(short = 'n', long)]
        top_n: Option<usize>,
    },

    /// Show the details of a recipe
    Show {
        /// Recipe name
        name: String,
    },

    /// Interactive recommendation session
    Interactive,

    /// List the category table in matching order
    Categories,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recommend() {
        let cli = Cli::try_parse_from([
            "recommender",
            "--dataset",
            "recipes.csv",
            "recommend",
            "spicy noodles",
            "-n",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.dataset, Some(PathBuf::from("recipes.csv")));
        match cli.command {
            Commands::Recommend { query, top_n } => {
                assert_eq!(query, "spicy noodles");
                assert_eq!(top_n, Some(3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::try_parse_from(["recommender", "show", "lentil soup", "--sample-size", "0"])
            .unwrap();

        assert_eq!(cli.sample_size, Some(0));
        assert!(matches!(cli.command, Commands::Show { name } if name == "lentil soup"));
    }
}

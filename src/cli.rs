use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "growwise", version, about = "Smart crop advisory TUI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Training CSV (overrides dataset.path)
    #[arg(short, long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive setup; writes config.yaml
    Init,
    /// Validate config, load the dataset and train the model
    Check,
    /// Recommend a crop without starting the TUI
    Recommend {
        /// Temperature in °C
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,
        /// Relative humidity in %
        #[arg(long)]
        humidity: f64,
        /// Soil pH
        #[arg(long)]
        ph: f64,
        /// Rainfall in mm
        #[arg(long)]
        rainfall: f64,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Ask the farming chatbot a question
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_runs_tui() {
        let cli = Cli::try_parse_from(["growwise"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn parses_recommend() {
        let cli = Cli::try_parse_from([
            "growwise",
            "recommend",
            "--temperature",
            "25",
            "--humidity",
            "80",
            "--ph",
            "6.5",
            "--rainfall",
            "200",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Recommend {
                temperature,
                ph,
                json,
                ..
            }) => {
                assert_eq!(temperature, 25.0);
                assert_eq!(ph, 6.5);
                assert!(json);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn ask_joins_words() {
        let cli = Cli::try_parse_from(["growwise", "-vv", "ask", "is", "it", "useful"]).unwrap();
        assert_eq!(cli.log_filter(), "trace");
        match cli.command {
            Some(Commands::Ask { text }) => assert_eq!(text.join(" "), "is it useful"),
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn global_dataset_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["growwise", "check", "--dataset", "x.csv"]).unwrap();
        assert_eq!(cli.dataset, Some(PathBuf::from("x.csv")));
    }
}

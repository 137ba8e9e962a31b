// Wed Jan 15 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reflect-sdk-generator")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Orders, lays out and names reflected types for SDK emission", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the generation plan for a scanner snapshot.
    Plan(PlanArgs),
    /// Run every stage without writing a plan.
    Check(CheckArgs),
    /// Write the default configuration to a file.
    InitConfig(InitConfigArgs),
}

#[derive(Parser, Debug)]
pub struct PlanArgs {
    #[arg(short, long)]
    pub input: PathBuf,

    #[arg(short, long, default_value = "plan.json")]
    pub output: PathBuf,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub compact: bool,

    #[arg(long)]
    pub no_summary: bool,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[arg(short, long)]
    pub input: PathBuf,

    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InitConfigArgs {
    #[arg(short, long, default_value = "generator.json")]
    pub output: PathBuf,

    #[arg(long)]
    pub force: bool,
}

impl PlanArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.input.exists() {
            return Err(format!("Input file does not exist: {:?}", self.input));
        }
        if self.input == self.output {
            return Err("Output would overwrite the input snapshot".to_string());
        }
        if let Some(config) = &self.config {
            if !config.exists() {
                return Err(format!("Config file does not exist: {:?}", config));
            }
        }
        Ok(())
    }
}

impl CheckArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.input.exists() {
            return Err(format!("Input file does not exist: {:?}", self.input));
        }
        if let Some(config) = &self.config {
            if !config.exists() {
                return Err(format!("Config file does not exist: {:?}", config));
            }
        }
        Ok(())
    }
}

impl InitConfigArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.output.exists() && !self.force {
            return Err(format!("{:?} already exists, pass --force to overwrite", self.output));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_command() {
        let args = Args::try_parse_from([
            "reflect-sdk-generator",
            "plan",
            "--input",
            "dump.json",
            "--compact",
            "-l",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.log_level, "debug");
        match args.command {
            Command::Plan(plan) => {
                assert_eq!(plan.input, PathBuf::from("dump.json"));
                assert_eq!(plan.output, PathBuf::from("plan.json"));
                assert!(plan.compact);
                assert!(plan.config.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_missing_input_fails_validation() {
        let args = CheckArgs {
            input: PathBuf::from("/nonexistent/snapshot.json"),
            config: None,
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_init_config_subcommand_name() {
        let args = Args::try_parse_from(["reflect-sdk-generator", "init-config", "--force"]).unwrap();
        assert!(matches!(args.command, Command::InitConfig(InitConfigArgs { force: true, .. })));
    }
}

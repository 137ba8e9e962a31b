// Wed Jan 15 2026 - Alex

use super::args::{Args, CheckArgs, Command, InitConfigArgs, PlanArgs};
use crate::config::Config;
use crate::input::ScanSnapshot;
use crate::output::{PlanSummary, PlanWriter};
use crate::scheduler::{GenerationPlan, Scheduler};
use anyhow::Context;
use colored::Colorize;
use std::path::Path;
use std::time::Instant;

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        if args.no_color {
            colored::control::set_override(false);
        }

        self.setup_logging(&args)?;

        match args.command {
            Command::Plan(plan_args) => self.handle_plan(plan_args),
            Command::Check(check_args) => self.handle_check(check_args),
            Command::InitConfig(init_args) => self.handle_init_config(init_args),
        }
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        };

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .try_init()
            .context("logger already initialized")?;

        Ok(())
    }

    fn handle_plan(&self, args: PlanArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let config = load_config(args.config.as_deref())?;
        let plan = build_plan(&args.input, &config)?;

        PlanWriter::new()
            .with_pretty_print(!args.compact)
            .write_to_file(&plan, &args.output)
            .with_context(|| format!("writing {}", args.output.display()))?;

        if !args.no_summary {
            println!();
            println!("{}", PlanSummary::from_plan(&plan));
            println!();
        }
        println!("{} Plan written to {}", "[+]".green(), args.output.display());
        Ok(())
    }

    fn handle_check(&self, args: CheckArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let config = load_config(args.config.as_deref())?;
        let plan = build_plan(&args.input, &config)?;
        let summary = PlanSummary::from_plan(&plan);

        println!(
            "{} {} types in {} packages are consistent",
            "[+]".green(),
            summary.type_count(),
            summary.packages
        );
        if summary.broken_cycles > 0 {
            println!(
                "{} {} pointer cycles need forward declarations",
                "[*]".blue(),
                summary.broken_cycles
            );
        }
        Ok(())
    }

    fn handle_init_config(&self, args: InitConfigArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        Config::default()
            .save(&args.output)
            .with_context(|| format!("writing {}", args.output.display()))?;
        println!("{} Default configuration written to {}", "[+]".green(), args.output.display());
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            println!("{} Loading config: {}", "[*]".blue(), path.display());
            Config::from_file(path).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

fn build_plan(input: &Path, config: &Config) -> anyhow::Result<GenerationPlan> {
    let start = Instant::now();
    println!("{} Loading snapshot: {}", "[*]".blue(), input.display());

    let snapshot = ScanSnapshot::from_file(input).with_context(|| format!("reading {}", input.display()))?;
    let mut set = snapshot.into_node_set()?;
    println!(
        "{} Loaded {} nodes in {} packages",
        "[+]".green(),
        set.node_count(),
        set.packages().len()
    );

    let plan = match Scheduler::new(config).schedule(&mut set) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("{} {}", "[!]".red(), e);
            return Err(e.into());
        }
    };

    println!(
        "{} Planned {} types in {:.2?}",
        "[+]".green(),
        plan.types.len(),
        start.elapsed()
    );
    Ok(plan)
}

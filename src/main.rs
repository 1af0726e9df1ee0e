use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use log::info;

use pl::interpreter::{Environment, interpret};
use pl::pipeline;
use pl::samples::{self, SAMPLES, Sample};
use pl::types::{TypeEnvironment, type_check};

#[derive(Parser)]
#[command(name = "pl", about = "Type check and evaluate bundled example programs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the bundled programs
    List,
    /// Print a program and its type
    Show { sample: String },
    /// Type check a program and run it through both interpreters
    Run {
        sample: String,
        /// Skip type checking and run only the untyped interpreter
        #[arg(long)]
        untyped_only: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::List => {
            let width = SAMPLES.iter().map(|sample| sample.name.len()).max().unwrap_or(0);
            let listing = SAMPLES
                .iter()
                .map(|sample| format!("{:width$}  {}", sample.name, sample.description))
                .join("\n");
            println!("{}", listing);
        }
        Command::Show { sample } => {
            let program = find_sample(&sample)?.program();
            println!("{}", program);
            let ty = type_check(&program, &TypeEnvironment::empty())
                .map_err(|err| anyhow!("checking {}: {}", sample, err))?;
            println!(": {}", ty);
        }
        Command::Run {
            sample,
            untyped_only,
        } => {
            let program = find_sample(&sample)?.program();
            info!("running {}", sample);
            if untyped_only {
                // Runtime values hold `Rc`s, so errors are rendered rather than wrapped
                let value = interpret(&program, &Environment::empty())
                    .map_err(|err| anyhow!("evaluating {}: {}", sample, err))?;
                println!("{}", value);
            } else {
                let outcome = pipeline::run(&program)
                    .map_err(|err| anyhow!("running {}: {}", sample, err))?;
                println!("{} : {}", outcome.typed_value, outcome.ty);
            }
        }
    }

    Ok(())
}

fn find_sample(name: &str) -> anyhow::Result<&'static Sample> {
    match samples::find(name) {
        Some(sample) => Ok(sample),
        None => bail!(
            "unknown sample {}; expected one of: {}",
            name,
            SAMPLES.iter().map(|sample| sample.name).join(", ")
        ),
    }
}

/*!
This crate is the embeddable command-line surface for training. Record
types are application code, so the application owns the binary: it builds a
[`Registry`] of its predictable types, chooses the model [`Paths`], and
hands both to [`main`] (or [`run`], to keep control of the process).

```no_run
use augur_core::{Paths, Registry};

fn registry() -> Registry {
	// register the application's record types here
	Registry::new()
}

fn main() -> ! {
	augur_cli::main(&registry(), &Paths::default())
}
```
*/

use anyhow::Result;
use augur_core::{Paths, Progress, Registry, TrainPhase};
use clap::Parser;
use colored::Colorize;

#[derive(Parser, Debug)]
#[command(name = "augur", about = "Train attribute-value prediction models.")]
pub enum Options {
	/// Train a model for every predictable attribute of a record type.
	#[command(name = "train")]
	Train(TrainOptions),
}

#[derive(clap::Args, Debug)]
pub struct TrainOptions {
	/// The registered name of the record type to train.
	pub record_type: String,
}

/// Parse the process arguments, run, and exit: code 0 on success, code 1
/// with an error line on stderr otherwise.
pub fn main(registry: &Registry, paths: &Paths) -> ! {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.try_init();
	let options = Options::parse();
	match run(registry, paths, options) {
		Ok(()) => std::process::exit(0),
		Err(error) => {
			eprintln!("{}: {}", "error".red().bold(), error);
			std::process::exit(1);
		}
	}
}

pub fn run(registry: &Registry, paths: &Paths, options: Options) -> Result<()> {
	match options {
		Options::Train(options) => cli_train(registry, paths, &options),
	}
}

fn cli_train(registry: &Registry, paths: &Paths, options: &TrainOptions) -> Result<()> {
	let record_type = registry.get(&options.record_type)?;
	augur_core::train(record_type, paths, &mut report_progress)?;
	eprintln!("all training completed.");
	Ok(())
}

fn report_progress(progress: Progress) {
	let attribute = progress.attribute.green();
	match progress.phase {
		TrainPhase::Starting {
			record_count,
			source_count,
		} => eprintln!(
			"training model for {} attribute from {} other attribute(s), on {} records...",
			attribute, source_count, record_count,
		),
		TrainPhase::Loading(_) => {}
		TrainPhase::TrainingOnline(_) => {
			eprintln!("starting online training for {}.", attribute)
		}
		TrainPhase::TrainingBatch => {
			eprintln!("starting full dataset training for {}.", attribute)
		}
		TrainPhase::Saving => eprintln!("saving model for {}.", attribute),
		TrainPhase::Complete => eprintln!("training completed for {}.", attribute),
	}
}

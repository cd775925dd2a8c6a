mod cli;
mod json;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, RunArgs};
use gotql::{colorize::Colorize, OperationKind, UreqTransport};
use json::load_query;

fn main() {
	if let Err(err) = run() {
		eprintln!("{}", format!("{:#}", err).error());
		std::process::exit(1);
	}
}

fn run() -> Result<()> {
	let cli = Cli::parse();

	if cli.debug {
		gotql::set_debug(cli.debug);
	}

	match cli.command {
		Command::Parse(args) => {
			let query = load_query(&args.file)?;
			println!("{}", gotql::parse(&query, args.kind)?);
		}
		Command::Query(args) => execute(&args, OperationKind::Query)?,
		Command::Mutation(args) => execute(&args, OperationKind::Mutation)?,
	}

	Ok(())
}

fn execute(args: &RunArgs, kind: OperationKind) -> Result<()> {
	let query = load_query(&args.file)?;

	let response = gotql::run(
		&args.endpoint,
		&query,
		kind,
		&UreqTransport::default(),
		Some(&args.options()),
	)?;

	println!("{}", serde_json::to_string_pretty(&response)?);

	Ok(())
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gotql::{OperationKind, Options};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Command,

	/// Use debug output
	#[arg(long, global = true)]
	pub debug: bool,
}

#[derive(Subcommand)]
pub enum Command {
	/// Print the GraphQL text of a query description
	Parse(ParseArgs),

	/// Run a query description as a query
	Query(RunArgs),

	/// Run a query description as a mutation
	Mutation(RunArgs),
}

#[derive(Args, Debug)]
pub struct ParseArgs {
	/// JSON file holding the query description
	pub file: PathBuf,

	/// Operation type, `query` or `mutation`
	#[arg(long, default_value = "query")]
	pub kind: OperationKind,
}

#[derive(Args, Debug)]
pub struct RunArgs {
	/// GraphQL endpoint, `https://` is assumed when no scheme is given
	pub endpoint: String,

	/// JSON file holding the query description
	pub file: PathBuf,

	/// Extra request header as NAME:VALUE, may be repeated
	#[arg(short = 'H', long = "header", value_parser = parse_header)]
	pub headers: Vec<(String, String)>,

	/// Status code to report when the response carries GraphQL errors
	#[arg(long)]
	pub error_status_code: Option<u16>,
}

impl RunArgs {
	pub fn options(&self) -> Options {
		let options = self
			.headers
			.iter()
			.fold(Options::new(), |options, (name, value)| {
				options.header(name, value)
			});

		match self.error_status_code {
			Some(code) => options.error_status_code(code),
			None => options,
		}
	}
}

fn parse_header(s: &str) -> Result<(String, String), String> {
	let Some((name, value)) = s.split_once(':') else {
		return Err(format!("`{}` is not a NAME:VALUE header", s));
	};

	if name.trim().is_empty() {
		return Err(format!("`{}` has no header name", s));
	}

	Ok((name.trim().to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
	use clap::{CommandFactory, Parser};
	use gotql::OperationKind;
	use similar_asserts::assert_eq;

	use super::{parse_header, Cli, Command};

	#[test]
	fn verify_cli() {
		Cli::command().debug_assert();
	}

	#[test]
	fn test_parse_header() {
		assert_eq!(
			parse_header("Authorization: bearer token"),
			Ok(("Authorization".to_string(), "bearer token".to_string()))
		);
		assert!(parse_header("no-colon").is_err());
		assert!(parse_header(": value").is_err());
	}

	#[test]
	fn test_parse_kind() {
		let cli = Cli::try_parse_from(["gotql", "parse", "q.json", "--kind", "mutation"])
			.unwrap();

		let Command::Parse(args) = cli.command else {
			panic!("expected the parse command");
		};
		assert_eq!(args.kind, OperationKind::Mutation);

		assert!(
			Cli::try_parse_from(["gotql", "parse", "q.json", "--kind", "subscription"])
				.is_err()
		);
	}

	#[test]
	fn test_run_args_options() {
		let cli = Cli::try_parse_from([
			"gotql",
			"query",
			"example.com/graphql",
			"q.json",
			"-H",
			"Test-Header: t",
			"--error-status-code",
			"418",
			"--debug",
		])
		.unwrap();

		assert!(cli.debug);

		let Command::Query(args) = cli.command else {
			panic!("expected the query command");
		};
		let options = args.options();

		assert_eq!(options.headers.get("Test-Header").map(String::as_str), Some("t"));
		assert_eq!(options.error_status_code, Some(418));
	}
}

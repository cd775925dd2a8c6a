//! Build GraphQL requests from JSON-like query descriptions and run them.
//!
//! ```
//! use gotql::{parse, Operation, OperationKind, QueryType};
//!
//! let query = QueryType::new(Operation::new("TestOp").field("field1").field("field2"));
//!
//! assert_eq!(
//!     parse(&query, OperationKind::Query).unwrap(),
//!     "query { TestOp { field1 field2 } }"
//! );
//! ```

pub mod colorize;
pub mod debug;
pub mod error;
pub mod helpers;
pub mod parser;
pub mod query_type;
pub mod runner;
mod utils;

pub use debug::set_debug;
pub use error::{Error, HelperError, ParseError, RunnerError};
pub use helpers::{fragment, literal};
pub use parser::parse;
pub use query_type::{
	ArgValue, FieldSpec, Operation, OperationKind, QueryType, SubSelection,
	Variable,
};
pub use runner::{
	run, Options, Payload, Response, Transport, TransportResponse,
	UreqTransport,
};

/// Runs `query` as a GraphQL query through the default transport.
pub fn query(
	endpoint: &str,
	query: &QueryType,
	options: Option<&Options>,
) -> Result<Response, Error> {
	debug!("starting a new query");

	run(
		endpoint,
		query,
		OperationKind::Query,
		&UreqTransport::default(),
		options,
	)
}

/// Runs `query` as a GraphQL mutation through the default transport.
pub fn mutation(
	endpoint: &str,
	query: &QueryType,
	options: Option<&Options>,
) -> Result<Response, Error> {
	debug!("starting a new mutation");

	run(
		endpoint,
		query,
		OperationKind::Mutation,
		&UreqTransport::default(),
		options,
	)
}

use thiserror::Error;

/// Everything the public API can fail with.
#[derive(Error, Debug)]
pub enum Error {
	#[error("Parse error: {0}")]
	Parse(#[from] ParseError),
	#[error("Runner error: Error when executing query: {0}")]
	Runner(#[from] RunnerError),
}

/// Validation failures raised while turning a query description into text.
#[derive(Error, Debug)]
pub enum ParseError {
	#[error("a query must have at least one operation")]
	MissingOperation,
	#[error("type must be either \"query\" or \"mutation\"")]
	InvalidOperationKind,
	#[error("name is required for graphQL operation")]
	MissingOperationName,
	#[error("field list is required for operation \"{0}\"")]
	MissingFieldList(String),
	#[error(
		"Variable \"{0}\" is defined on operation but it has neither a type or a value"
	)]
	UndeclaredVariable(String),
	#[error("Failed to parse operation \"{name}\" => {source}")]
	Operation {
		name: String,
		source: Box<ParseError>,
	},
}

#[derive(Error, Debug)]
pub enum RunnerError {
	#[error("could not encode the request payload: {0}")]
	Payload(#[source] serde_json::Error),
	#[error("request to `{url}` failed: {source}")]
	Request {
		url: String,
		source: Box<dyn std::error::Error + Send + Sync>,
	},
	#[error("`{url}` responded with status {status} {status_text}")]
	Status {
		url: String,
		status: u16,
		status_text: String,
	},
	#[error("could not read the response from `{url}`: {source}")]
	Read {
		url: String,
		source: std::io::Error,
	},
	#[error("response from `{url}` is not valid JSON: {source}")]
	Json {
		url: String,
		source: serde_json::Error,
	},
	#[error("response from `{url}` is not a JSON object")]
	NotAnObject { url: String },
}

#[derive(Error, Debug, PartialEq)]
pub enum HelperError {
	#[error("literalValue cannot be null or empty")]
	EmptyLiteral,
	#[error("Fragment name cannot be empty")]
	EmptyFragment,
}

#[cfg(test)]
mod tests {
	use similar_asserts::assert_eq;

	use super::{Error, ParseError, RunnerError};

	#[test]
	fn test_parse_error_chain() {
		let err = Error::from(ParseError::Operation {
			name: "TestOp".to_string(),
			source: Box::new(ParseError::UndeclaredVariable("name".to_string())),
		});

		assert_eq!(
			err.to_string(),
			"Parse error: Failed to parse operation \"TestOp\" => Variable \"name\" is defined on operation but it has neither a type or a value"
		);
	}

	#[test]
	fn test_runner_error_prefix() {
		let err = Error::from(RunnerError::NotAnObject {
			url: "https://example.com".to_string(),
		});

		assert_eq!(
			err.to_string(),
			"Runner error: Error when executing query: response from `https://example.com` is not a JSON object"
		);
	}
}

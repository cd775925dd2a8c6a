use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use ureq::Agent;

use crate::{
	debug,
	error::{Error, RunnerError},
	parser::parse,
	query_type::{OperationKind, QueryType},
	utils::{global_agent, SELF_VERSION},
};

pub const DEFAULT_ERROR_STATUS_CODE: u16 = 500;

const POWERED_BY: &str = "GotQL - The server-side GraphQL query engine";
const GRAPHQL_ERROR_MESSAGE: &str = "GraphQL Error";

/// Per-request settings. Passed explicitly to every call that needs them.
#[derive(Debug, Clone, Default)]
pub struct Options {
	/// Merged over the default headers, winning on a name collision.
	pub headers: IndexMap<String, String>,
	/// Status reported when the response body carries `errors`.
	pub error_status_code: Option<u16>,
}

impl Options {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn header(mut self, name: &str, value: &str) -> Self {
		self.headers.insert(name.to_string(), value.to_string());
		self
	}

	pub fn error_status_code(mut self, code: u16) -> Self {
		self.error_status_code = Some(code);
		self
	}
}

/// The JSON body posted to the endpoint.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Payload<'a> {
	pub query: String,
	pub operation_name: Option<&'a str>,
	pub variables: Option<IndexMap<&'a str, &'a Value>>,
}

impl<'a> Payload<'a> {
	fn new(query: &'a QueryType, parsed: String) -> Self {
		// a variable without a value has nothing to send
		let variables = query.variables.as_ref().map(|variables| {
			variables
				.iter()
				.filter_map(|(name, variable)| {
					variable.value.as_ref().map(|value| (name.as_str(), value))
				})
				.collect()
		});

		Self {
			query: parsed,
			operation_name: query.operation_name(),
			variables,
		}
	}
}

/// What a transport hands back for a 2xx answer.
#[derive(Debug, Clone)]
pub struct TransportResponse {
	/// The URL the request finally reached.
	pub url: String,
	pub status: u16,
	pub status_text: String,
	pub body: String,
}

/// Sends one request. Retries, timeouts and proxies are the
/// implementation's business.
pub trait Transport {
	fn post(
		&self,
		url: &str,
		headers: &IndexMap<String, String>,
		payload: &Payload<'_>,
	) -> Result<TransportResponse, RunnerError>;
}

pub struct UreqTransport {
	agent: Agent,
}

impl UreqTransport {
	pub fn new(agent: Agent) -> Self {
		Self { agent }
	}
}

impl Default for UreqTransport {
	fn default() -> Self {
		Self::new(global_agent().clone())
	}
}

impl Transport for UreqTransport {
	fn post(
		&self,
		url: &str,
		headers: &IndexMap<String, String>,
		payload: &Payload<'_>,
	) -> Result<TransportResponse, RunnerError> {
		let body = serde_json::to_vec(payload).map_err(RunnerError::Payload)?;

		let mut request = self.agent.post(url);
		for (name, value) in headers {
			request = request.set(name, value);
		}

		let response = match request
			.set("Content-Type", "application/json")
			.send_bytes(&body)
		{
			Ok(response) => response,
			Err(ureq::Error::Status(status, response)) => {
				return Err(RunnerError::Status {
					url: response.get_url().to_string(),
					status,
					status_text: response.status_text().to_string(),
				});
			}
			Err(err) => {
				return Err(RunnerError::Request {
					url: url.to_string(),
					source: err.to_string().into(),
				});
			}
		};

		let url = response.get_url().to_string();
		let status = response.status();
		let status_text = response.status_text().to_string();
		let body = response.into_string().map_err(|source| RunnerError::Read {
			url: url.clone(),
			source,
		})?;

		Ok(TransportResponse {
			url,
			status,
			status_text,
			body,
		})
	}
}

/// The response body's own keys plus where it came from and how it went.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Response {
	#[serde(flatten)]
	pub body: Map<String, Value>,
	pub endpoint: String,
	#[serde(rename = "statusCode")]
	pub status_code: u16,
	pub message: String,
}

impl Response {
	pub fn data(&self) -> Option<&Value> {
		self.body.get("data")
	}

	pub fn errors(&self) -> Option<&Value> {
		self.body.get("errors").filter(|errors| !errors.is_null())
	}
}

/// Prefixes `https://` unless the endpoint already names a scheme or is a
/// relative path.
pub fn prepend_https(endpoint: &str) -> String {
	let endpoint = endpoint.trim();

	if let Some(rest) = endpoint.strip_prefix("//") {
		return format!("https://{}", rest);
	}

	if endpoint.starts_with('/') || endpoint.starts_with('.') {
		return endpoint.to_string();
	}

	let has_scheme = endpoint.split_once(':').is_some_and(|(scheme, _)| {
		!scheme.is_empty()
			&& scheme != "localhost"
			&& scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
	});

	if has_scheme {
		endpoint.to_string()
	} else {
		format!("https://{}", endpoint)
	}
}

fn build_headers(
	headers: Option<&IndexMap<String, String>>,
) -> IndexMap<String, String> {
	let mut merged = IndexMap::from([
		("X-Powered-By".to_string(), POWERED_BY.to_string()),
		("User-Agent".to_string(), format!("GotQL {}", SELF_VERSION)),
		("Accept-Encoding".to_string(), "gzip, deflate".to_string()),
		("Response-Type".to_string(), "application/json".to_string()),
	]);

	if let Some(headers) = headers {
		for (name, value) in headers {
			merged.retain(|key, _| !key.eq_ignore_ascii_case(name));
			merged.insert(name.clone(), value.clone());
		}
	}

	debug!("mounted headers: {:?}", merged);

	merged
}

fn handle_response(
	response: TransportResponse,
	options: Option<&Options>,
) -> Result<Response, RunnerError> {
	let TransportResponse {
		url,
		status,
		status_text,
		body,
	} = response;

	let body: Value =
		serde_json::from_str(&body).map_err(|source| RunnerError::Json {
			url: url.clone(),
			source,
		})?;

	let Value::Object(body) = body else {
		return Err(RunnerError::NotAnObject { url });
	};

	let has_errors = body.get("errors").is_some_and(|errors| !errors.is_null());

	let (status_code, message) = if has_errors {
		debug!("error on query: {:?}", body.get("errors"));

		(
			options
				.and_then(|options| options.error_status_code)
				.unwrap_or(DEFAULT_ERROR_STATUS_CODE),
			GRAPHQL_ERROR_MESSAGE.to_string(),
		)
	} else {
		(status, status_text)
	};

	let body = body
		.into_iter()
		.filter(|(key, _)| !matches!(key.as_str(), "endpoint" | "statusCode" | "message"))
		.collect();

	Ok(Response {
		body,
		endpoint: url,
		status_code,
		message,
	})
}

/// Serializes `query`, posts it through `transport` and normalizes the
/// answer.
pub fn run<T>(
	endpoint: &str,
	query: &QueryType,
	kind: OperationKind,
	transport: &T,
	options: Option<&Options>,
) -> Result<Response, Error>
where
	T: Transport + ?Sized,
{
	debug!("invoking runner with query type {}", kind);

	let parsed = parse(query, kind)?;
	let headers = build_headers(options.map(|options| &options.headers));
	let payload = Payload::new(query, parsed);
	let url = prepend_https(endpoint);

	debug!("sending request to {}", url);

	let response = transport.post(&url, &headers, &payload).map_err(|err| {
		debug!("error on runner: {}", err);
		err
	})?;

	debug!("response: {} {}", response.status, response.body);

	Ok(handle_response(response, options)?)
}

use indexmap::IndexMap;

use crate::{
	debug,
	error::{Error, ParseError},
	query_type::{
		ArgValue, FieldSpec, Operation, OperationKind, QueryType, Variable,
	},
};

type Variables = IndexMap<String, Variable>;
type Args = IndexMap<String, ArgValue>;

/// Turns a query description into GraphQL text.
///
/// Either the whole document is produced or the first validation failure is
/// returned, chained with the operation it happened in.
pub fn parse(query: &QueryType, kind: OperationKind) -> Result<String, Error> {
	let parsed = parse_query(query, kind)?;

	debug!("parsed query: {}", parsed);

	Ok(parsed)
}

fn parse_query(
	query: &QueryType,
	kind: OperationKind,
) -> Result<String, ParseError> {
	let Some(ref operation) = query.operation else {
		return Err(ParseError::MissingOperation);
	};

	let query_name = match query.operation_name() {
		Some(name) => format!("{} ", name),
		None => String::new(),
	};
	let variables = query.variables.as_ref();

	Ok(format!(
		"{} {}{}{{ {} }}",
		kind,
		query_name,
		parse_query_variables(variables),
		parse_operation(operation, variables, kind)?
	)
	.trim()
	.to_string())
}

fn parse_query_variables(variables: Option<&Variables>) -> String {
	match variables {
		Some(variables) if !variables.is_empty() => {
			let declarations = variables
				.iter()
				.map(|(name, variable)| {
					format!(
						"${}: {}",
						name,
						variable.kind.as_deref().unwrap_or_default()
					)
				})
				.collect::<Vec<String>>()
				.join(", ");

			format!("({}) ", declarations)
		}
		_ => String::new(),
	}
}

fn parse_operation(
	operation: &Operation,
	variables: Option<&Variables>,
	kind: OperationKind,
) -> Result<String, ParseError> {
	let name = operation
		.name
		.as_deref()
		.filter(|name| !name.is_empty())
		.ok_or(ParseError::MissingOperationName)?;

	let fields = operation.fields.as_deref().unwrap_or_default();

	// mutations may return nothing worth selecting
	if fields.is_empty() && kind != OperationKind::Mutation {
		return Err(ParseError::MissingFieldList(name.to_string()));
	}

	render_operation(name, operation, fields, variables).map_err(|source| {
		ParseError::Operation {
			name: name.to_string(),
			source: Box::new(source),
		}
	})
}

fn render_operation(
	name: &str,
	operation: &Operation,
	fields: &[FieldSpec],
	variables: Option<&Variables>,
) -> Result<String, ParseError> {
	let head = format!(
		"{}{}{}",
		alias_prefix(operation.alias.as_deref()),
		name,
		parse_args(operation.args.as_ref(), variables)?
	);

	if fields.is_empty() {
		return Ok(head);
	}

	Ok(format!("{} {{ {} }}", head, parse_fields(fields, variables)?.trim()))
}

fn alias_prefix(alias: Option<&str>) -> String {
	match alias {
		Some(alias) if !alias.is_empty() => format!("{}: ", alias),
		_ => String::new(),
	}
}

fn parse_fields(
	fields: &[FieldSpec],
	variables: Option<&Variables>,
) -> Result<String, ParseError> {
	let mut parsed = String::new();

	for field in fields {
		match field {
			FieldSpec::Name(name) => {
				parsed.push_str(name);
				parsed.push(' ');
			}
			FieldSpec::Nested(selections) => {
				for (name, selection) in selections {
					let nested = parse_fields(
						selection.fields.as_deref().unwrap_or_default(),
						variables,
					)?;

					parsed.push_str(&format!(
						"{}{}{} {{ {}}} ",
						alias_prefix(selection.alias.as_deref()),
						name,
						parse_args(selection.args.as_ref(), variables)?,
						nested
					));
				}
			}
		}
	}

	Ok(parsed)
}

/// An absent or empty argument map renders as nothing, never as `()`.
fn parse_args(
	args: Option<&Args>,
	variables: Option<&Variables>,
) -> Result<String, ParseError> {
	match args {
		Some(args) if !args.is_empty() => {
			let args = args
				.iter()
				.map(|(name, value)| {
					Ok(format!("{}: {}", name, parse_arg_value(value, variables)?))
				})
				.collect::<Result<Vec<String>, ParseError>>()?;

			Ok(format!("({})", args.join(", ")))
		}
		_ => Ok(String::new()),
	}
}

fn parse_arg_value(
	value: &ArgValue,
	variables: Option<&Variables>,
) -> Result<String, ParseError> {
	match value {
		ArgValue::Null => Ok("null".to_string()),
		ArgValue::List(items) => {
			let items = items
				.iter()
				.map(|item| parse_list_item(item, variables))
				.collect::<Result<Vec<String>, ParseError>>()?;

			Ok(format!("[{}]", items.join(",")))
		}
		ArgValue::Object(entries) => parse_object(entries, variables),
		ArgValue::Bool(b) => Ok(b.to_string()),
		ArgValue::Variable(name) => {
			check_variable(name, variables)?;

			Ok(format!("${}", name))
		}
		ArgValue::Literal { value, escape } => Ok(if *escape {
			quote(value)
		} else {
			value.clone()
		}),
		ArgValue::String(s) => Ok(quote(s)),
		ArgValue::Number(n) => Ok(quote(&n.to_string())),
	}
}

// inside a list strings are always quoted and numbers pass through as-is
fn parse_list_item(
	item: &ArgValue,
	variables: Option<&Variables>,
) -> Result<String, ParseError> {
	match item {
		ArgValue::Object(entries) => parse_object(entries, variables),
		ArgValue::String(s) => Ok(quote(s)),
		ArgValue::Variable(name) => Ok(quote(&format!("${}", name))),
		ArgValue::Number(n) => Ok(n.to_string()),
		other => parse_arg_value(other, variables),
	}
}

fn parse_object(
	entries: &Args,
	variables: Option<&Variables>,
) -> Result<String, ParseError> {
	if entries.is_empty() {
		return Ok("{}".to_string());
	}

	let entries = entries
		.iter()
		.map(|(key, value)| {
			Ok(format!("{}: {}", key, parse_arg_value(value, variables)?))
		})
		.collect::<Result<Vec<String>, ParseError>>()?;

	Ok(format!("{{ {} }}", entries.join(", ")))
}

fn check_variable(
	name: &str,
	variables: Option<&Variables>,
) -> Result<(), ParseError> {
	let declared = variables
		.and_then(|variables| variables.get(name))
		.is_some_and(Variable::is_declared);

	if !declared {
		return Err(ParseError::UndeclaredVariable(name.to_string()));
	}

	Ok(())
}

fn quote(value: &str) -> String {
	let mut quoted = String::with_capacity(value.len() + 2);

	quoted.push('"');
	for c in value.chars() {
		match c {
			'"' => quoted.push_str("\\\""),
			'\\' => quoted.push_str("\\\\"),
			'\n' => quoted.push_str("\\n"),
			'\r' => quoted.push_str("\\r"),
			'\t' => quoted.push_str("\\t"),
			c => quoted.push(c),
		}
	}
	quoted.push('"');

	quoted
}

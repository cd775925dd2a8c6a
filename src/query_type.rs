use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

use crate::error::ParseError;

/// A JSON-like description of a single GraphQL operation.
///
/// `operation` is optional only so that a decoded description lacking it can
/// be reported instead of rejected by serde.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct QueryType {
	pub name: Option<String>,
	pub operation: Option<Operation>,
	pub variables: Option<IndexMap<String, Variable>>,
}

impl QueryType {
	pub fn new(operation: Operation) -> Self {
		Self {
			name: None,
			operation: Some(operation),
			variables: None,
		}
	}

	pub fn named(mut self, name: &str) -> Self {
		self.name = Some(name.to_string());
		self
	}

	pub fn variable<V>(mut self, name: &str, kind: &str, value: V) -> Self
	where
		V: Into<Value>,
	{
		self.variables
			.get_or_insert_with(IndexMap::new)
			.insert(name.to_string(), Variable::new(kind, value));
		self
	}

	/// The operation name sent alongside the query text, if any.
	pub fn operation_name(&self) -> Option<&str> {
		self.name.as_deref().filter(|name| !name.is_empty())
	}
}

/// An operation-level variable. The value travels in the request payload,
/// never in the query text.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Variable {
	#[serde(rename = "type")]
	pub kind: Option<String>,
	#[serde(default, deserialize_with = "defined")]
	pub value: Option<Value>,
}

// `null` is a value the caller chose, only a missing key is undefined
fn defined<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
	D: Deserializer<'de>,
{
	Value::deserialize(deserializer).map(Some)
}

impl Variable {
	pub fn new<V>(kind: &str, value: V) -> Self
	where
		V: Into<Value>,
	{
		Self {
			kind: Some(kind.to_string()),
			value: Some(value.into()),
		}
	}

	pub(crate) fn is_declared(&self) -> bool {
		self.kind.as_deref().is_some_and(|kind| !kind.is_empty())
			&& self.value.is_some()
	}
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Operation {
	pub name: Option<String>,
	pub alias: Option<String>,
	pub args: Option<IndexMap<String, ArgValue>>,
	pub fields: Option<Vec<FieldSpec>>,
}

impl Operation {
	pub fn new(name: &str) -> Self {
		Self {
			name: Some(name.to_string()),
			..Self::default()
		}
	}

	pub fn alias(mut self, alias: &str) -> Self {
		self.alias = Some(alias.to_string());
		self
	}

	pub fn arg<V>(mut self, name: &str, value: V) -> Self
	where
		V: Into<ArgValue>,
	{
		self.args
			.get_or_insert_with(IndexMap::new)
			.insert(name.to_string(), value.into());
		self
	}

	pub fn field<F>(mut self, field: F) -> Self
	where
		F: Into<FieldSpec>,
	{
		self.fields.get_or_insert_with(Vec::new).push(field.into());
		self
	}
}

/// One entry of a field selection: either a bare field name or a record of
/// sub-selections keyed by field name.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FieldSpec {
	Name(String),
	Nested(IndexMap<String, SubSelection>),
}

impl FieldSpec {
	pub fn nested(name: &str, selection: SubSelection) -> Self {
		Self::Nested(IndexMap::from([(name.to_string(), selection)]))
	}
}

impl From<&str> for FieldSpec {
	fn from(value: &str) -> Self {
		Self::Name(value.to_string())
	}
}

impl From<String> for FieldSpec {
	fn from(value: String) -> Self {
		Self::Name(value)
	}
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SubSelection {
	pub alias: Option<String>,
	pub args: Option<IndexMap<String, ArgValue>>,
	pub fields: Option<Vec<FieldSpec>>,
}

impl SubSelection {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn alias(mut self, alias: &str) -> Self {
		self.alias = Some(alias.to_string());
		self
	}

	pub fn arg<V>(mut self, name: &str, value: V) -> Self
	where
		V: Into<ArgValue>,
	{
		self.args
			.get_or_insert_with(IndexMap::new)
			.insert(name.to_string(), value.into());
		self
	}

	pub fn field<F>(mut self, field: F) -> Self
	where
		F: Into<FieldSpec>,
	{
		self.fields.get_or_insert_with(Vec::new).push(field.into());
		self
	}
}

/// An argument value. Variants are listed in the order a JSON value is
/// classified, which is also the order the parser checks them.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
	Null,
	List(Vec<ArgValue>),
	Object(IndexMap<String, ArgValue>),
	Bool(bool),
	/// A `$name` reference, stored without the `$`.
	Variable(String),
	/// Emitted verbatim when `escape` is false, quoted otherwise.
	Literal {
		value: String,
		escape: bool,
	},
	String(String),
	Number(Number),
}

fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

fn literal_text(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

impl From<Value> for ArgValue {
	fn from(value: Value) -> Self {
		match value {
			Value::Null => Self::Null,
			Value::Array(items) => {
				Self::List(items.into_iter().map(Self::from).collect())
			}
			Value::Object(map) => {
				let literal =
					map.get("value").filter(|v| is_truthy(v)).map(literal_text);

				match literal {
					Some(value) => Self::Literal {
						value,
						escape: map.get("escape").is_some_and(is_truthy),
					},
					None => Self::Object(
						map.into_iter().map(|(k, v)| (k, Self::from(v))).collect(),
					),
				}
			}
			Value::Bool(b) => Self::Bool(b),
			Value::String(s) => s.into(),
			Value::Number(n) => Self::Number(n),
		}
	}
}

impl<'de> Deserialize<'de> for ArgValue {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Value::deserialize(deserializer).map(Self::from)
	}
}

impl From<String> for ArgValue {
	fn from(value: String) -> Self {
		match value.strip_prefix('$') {
			Some(name) => Self::Variable(name.to_string()),
			None => Self::String(value),
		}
	}
}

impl From<&str> for ArgValue {
	fn from(value: &str) -> Self {
		value.to_string().into()
	}
}

impl From<bool> for ArgValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for ArgValue {
	fn from(value: i64) -> Self {
		Self::Number(value.into())
	}
}

impl From<f64> for ArgValue {
	fn from(value: f64) -> Self {
		Number::from_f64(value).map_or(Self::Null, Self::Number)
	}
}

impl<T> From<Vec<T>> for ArgValue
where
	T: Into<ArgValue>,
{
	fn from(value: Vec<T>) -> Self {
		Self::List(value.into_iter().map(Into::into).collect())
	}
}

impl<K, V> FromIterator<(K, V)> for ArgValue
where
	K: Into<String>,
	V: Into<ArgValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self::Object(
			iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
	Query,
	Mutation,
}

impl OperationKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Query => "query",
			Self::Mutation => "mutation",
		}
	}
}

impl fmt::Display for OperationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for OperationKind {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"query" => Ok(Self::Query),
			"mutation" => Ok(Self::Mutation),
			_ => Err(ParseError::InvalidOperationKind),
		}
	}
}

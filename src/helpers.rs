use crate::{
	error::HelperError,
	query_type::{ArgValue, FieldSpec},
};

/// An argument emitted verbatim, e.g. an enum constant.
///
/// `literal("IMAGE")` renders as `IMAGE` rather than `"IMAGE"`.
pub fn literal(value: &str) -> Result<ArgValue, HelperError> {
	if value.is_empty() {
		return Err(HelperError::EmptyLiteral);
	}

	Ok(ArgValue::Literal {
		value: value.to_string(),
		escape: false,
	})
}

/// A fragment spread, usable anywhere a field name is.
pub fn fragment(name: &str) -> Result<FieldSpec, HelperError> {
	if name.is_empty() {
		return Err(HelperError::EmptyFragment);
	}

	Ok(FieldSpec::Name(format!("...{}", name)))
}

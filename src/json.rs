use std::path::Path;

use anyhow::{Context, Result};
use fs_err as fs;

use gotql::QueryType;

/// Reads a query description written as JSON.
pub fn load_query(file_path: &Path) -> Result<QueryType> {
	let content = fs::read_to_string(file_path)?;

	serde_json::from_str(&content).with_context(|| {
		format!("`{}` is not a valid query description", file_path.display())
	})
}

#[cfg(test)]
mod tests {
	use std::fs;

	use anyhow::Result;
	use similar_asserts::assert_eq;
	use tempfile::tempdir;

	use super::load_query;
	use gotql::{Operation, QueryType};

	#[test]
	fn test_load_query() -> Result<()> {
		let dir = tempdir()?;
		let file_path = dir.path().join("query.json");
		fs::write(
			&file_path,
			r#"{ "name": "Users", "operation": { "name": "users", "fields": ["id"] } }"#,
		)?;

		let query = load_query(&file_path)?;

		assert_eq!(
			query,
			QueryType::new(Operation::new("users").field("id")).named("Users")
		);

		Ok(())
	}

	#[test]
	fn test_load_query_invalid_json() -> Result<()> {
		let dir = tempdir()?;
		let file_path = dir.path().join("query.json");
		fs::write(&file_path, "{ not json")?;

		let err = load_query(&file_path).unwrap_err();

		assert!(err.to_string().ends_with("is not a valid query description"));

		Ok(())
	}

	#[test]
	fn test_load_query_missing_file() {
		let dir = tempdir().unwrap();

		assert!(load_query(&dir.path().join("missing.json")).is_err());
	}
}

//! Schema document loading.

use std::{fs, path::Path};

use anyhow::{Context, anyhow, bail};
use serde_json::Value;

/// Read a schema document from a `.json` or `.toml` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unsupported
/// extension or does not parse.
pub fn load_document(path: impl AsRef<Path>) -> anyhow::Result<Value> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema {}", path.display()))?;
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    parse_document(&content, ext).with_context(|| format!("Invalid schema {}", path.display()))
}

/// Parse schema content in the format named by `ext`.
pub fn parse_document(content: &str, ext: &str) -> anyhow::Result<Value> {
    let value = match ext {
        "json" => serde_json::from_str(content)?,
        "toml" | "tml" => {
            let v: toml::Value = toml::from_str(content)?;
            serde_json::to_value(v)?
        }
        _ => {
            bail!("Unsupported schema file extension: {ext:?}");
        }
    };
    Ok(value)
}

/// Select the fragment at a JSON pointer. An empty pointer selects the document.
pub fn select<'a>(document: &'a Value, pointer: &str) -> anyhow::Result<&'a Value> {
    document
        .pointer(pointer)
        .ok_or_else(|| anyhow!("No schema node at pointer {pointer:?}"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_toml_document() {
        let doc = parse_document(
            "id = \"user\"\n[properties.name]\nexample = \"Ada\"\n",
            "toml",
        )
        .unwrap();
        assert_eq!(
            doc,
            json!({"id": "user", "properties": {"name": {"example": "Ada"}}})
        );
    }

    #[test]
    fn test_unsupported_document_extension() {
        assert!(parse_document("{}", "yml").is_err());
    }

    #[test]
    fn test_select_pointer() {
        let doc = json!({"definitions": {"user": {"example": 1}}});
        assert_eq!(select(&doc, "").unwrap(), &doc);
        assert_eq!(
            select(&doc, "/definitions/user").unwrap(),
            &json!({"example": 1})
        );
        assert!(select(&doc, "/definitions/missing").is_err());
    }

    #[test]
    fn test_load_json_document() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"properties": {{"a": {{"default": true}}}}}}"#).unwrap();
        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc, json!({"properties": {"a": {"default": true}}}));
    }
}

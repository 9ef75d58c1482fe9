use anyhow::Context;
use serde_json::{json, Value};
use std::io::Read;
use std::path::Path;

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(data)), Some(response)) = (data, response.as_object_mut()) {
                response.extend(data);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: []
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Read object text from a file, or from stdin when no file is given
pub fn read_object_text(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read object text from stdin")?;
            Ok(text)
        }
    }
}

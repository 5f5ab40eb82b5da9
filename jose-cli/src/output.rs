use serde::Serialize;
use serde_json::{json, Value};

/// Output format for CLI responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(format!("Unknown format: {}. Use 'json' or 'text'", s)),
        }
    }
}

/// Renders a successful result
pub fn render_success<T: Serialize>(format: OutputFormat, data: &T) -> String {
    let data = serde_json::to_value(data).unwrap_or(Value::Null);
    match format {
        OutputFormat::Json => pretty(&json!({ "status": "success", "data": data })),
        OutputFormat::Text => {
            let mut lines = Vec::new();
            text_lines(&data, 0, &mut lines);
            lines.join("\n")
        }
    }
}

/// Renders an error message
pub fn render_error(format: OutputFormat, error: &str) -> String {
    match format {
        OutputFormat::Json => pretty(&json!({ "status": "error", "error": error })),
        OutputFormat::Text => format!("Error: {}", error),
    }
}

/// Prints a successful result to stdout
pub fn print_success<T: Serialize>(format: OutputFormat, data: &T) {
    println!("{}", render_success(format, data));
}

/// Prints an error to stderr
pub fn print_error(format: OutputFormat, error: &str) {
    eprintln!("{}", render_error(format, error));
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        format!(
            "{{\"status\":\"error\",\"error\":\"Serialization failed: {}\"}}",
            e
        )
    })
}

fn text_lines(value: &Value, indent: usize, lines: &mut Vec<String>) {
    let pad = " ".repeat(indent);
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                if val.is_object() || val.is_array() {
                    lines.push(format!("{}{}:", pad, key));
                    text_lines(val, indent + 2, lines);
                } else {
                    lines.push(format!("{}{}: {}", pad, key, scalar(val)));
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if item.is_object() || item.is_array() {
                    lines.push(format!("{}-", pad));
                    text_lines(item, indent + 2, lines);
                } else {
                    lines.push(format!("{}- {}", pad, scalar(item)));
                }
            }
        }
        _ => lines.push(format!("{}{}", pad, scalar(value))),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_json_envelope() {
        let rendered = render_success(OutputFormat::Json, &json!({"valid": true}));
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["valid"], true);
    }

    #[test]
    fn test_text_rendering() {
        let rendered = render_success(
            OutputFormat::Text,
            &json!({"alg": "ES256", "names": ["a", "b"], "header": {"p2c": 4096}}),
        );
        assert_eq!(
            rendered,
            "alg: ES256\nnames:\n  - a\n  - b\nheader:\n  p2c: 4096"
        );
    }

    #[test]
    fn test_error_rendering() {
        assert_eq!(render_error(OutputFormat::Text, "boom"), "Error: boom");
        let value: Value =
            serde_json::from_str(&render_error(OutputFormat::Json, "boom")).unwrap();
        assert_eq!(value["error"], "boom");
    }
}

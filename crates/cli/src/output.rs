//! CLI output formatting module

use crate::config::OutputFormat;
use docsearch_core::{Result, SearchResult};
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};

/// Longest source value shown in the pretty hit listing
const MAX_PRETTY_VALUE_LEN: usize = 120;

/// Output formatter for CLI results
pub struct OutputFormatter {
    format: OutputFormat,
    use_colors: bool,
    writer: Box<dyn Write + Send>,
}

impl OutputFormatter {
    /// Create a formatter writing to stdout
    pub fn with_format(format: OutputFormat, use_colors: bool) -> Self {
        Self::with_writer(format, use_colors, io::stdout())
    }

    /// Create a formatter with custom writer
    pub fn with_writer<W: Write + Send + 'static>(
        format: OutputFormat,
        use_colors: bool,
        writer: W,
    ) -> Self {
        Self {
            format,
            use_colors,
            writer: Box::new(writer),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format and output a serializable value
    pub fn output<T: Serialize>(&mut self, value: &T) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.output_json(value),
            OutputFormat::Yaml => self.output_yaml(value),
            OutputFormat::Pretty => self.output_pretty(value),
            OutputFormat::Compact => self.output_compact(value),
        }
    }

    /// Output search results, with a hit listing in pretty mode
    pub fn output_results(&mut self, results: &[SearchResult]) -> Result<()> {
        if self.format != OutputFormat::Pretty {
            return match results {
                [single] => self.output(single),
                _ => self.output(&results),
            };
        }

        for (position, result) in results.iter().enumerate() {
            if results.len() > 1 {
                writeln!(self.writer, "# batch item {}", position + 1)?;
            }
            self.write_result(result)?;
        }
        Ok(())
    }

    fn output_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn output_yaml<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let yaml = serde_yaml::to_string(value)?;
        writeln!(self.writer, "{}", yaml)?;
        Ok(())
    }

    fn output_pretty<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json_value = serde_json::to_value(value)?;
        self.format_json_pretty(&json_value, 0)
    }

    fn output_compact<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn write_result(&mut self, result: &SearchResult) -> Result<()> {
        if result.is_error() {
            let message = format!("search failed: {}", result.error_message);
            return self.error(&message);
        }

        let index = result.index_name.as_deref().unwrap_or("-");
        writeln!(
            self.writer,
            "{} {} hits in {}ms (page {}, size {})",
            self.colorize_key(index),
            result.total,
            result.took,
            result.page,
            result.size
        )?;

        for (position, source) in result.results.iter().enumerate() {
            let id = source.get("_id").and_then(Value::as_str).unwrap_or("-");
            let score = source
                .get("_score")
                .and_then(Value::as_f64)
                .map(|s| format!("{:.3}", s))
                .unwrap_or_else(|| "-".to_string());
            writeln!(self.writer, "  [{}] {} (score {})", position + 1, id, score)?;

            for (key, value) in source.iter().filter(|(key, _)| !key.starts_with('_')) {
                let shown = truncate(&self.value_to_string(value), MAX_PRETTY_VALUE_LEN);
                writeln!(self.writer, "      {}: {}", self.colorize_key(key), shown)?;
            }

            if let Some(fragments) = result.highlights.get(position) {
                for (field, snippets) in fragments {
                    writeln!(
                        self.writer,
                        "      {} {}",
                        self.colorize_key(&format!("~{}:", field)),
                        snippets.join(" ... ")
                    )?;
                }
            }
        }
        Ok(())
    }

    /// Format JSON value in a pretty, human-readable way
    fn format_json_pretty(&mut self, value: &Value, indent: usize) -> Result<()> {
        let indent_str = "  ".repeat(indent);

        match value {
            Value::Object(map) => {
                for (key, val) in map {
                    match val {
                        Value::Object(_) | Value::Array(_) => {
                            writeln!(self.writer, "{}{}:", indent_str, self.colorize_key(key))?;
                            self.format_json_pretty(val, indent + 1)?;
                        }
                        _ => {
                            writeln!(
                                self.writer,
                                "{}{}: {}",
                                indent_str,
                                self.colorize_key(key),
                                self.format_value(val)
                            )?;
                        }
                    }
                }
            }
            Value::Array(arr) => {
                for (i, item) in arr.iter().enumerate() {
                    writeln!(self.writer, "{}[{}]:", indent_str, i)?;
                    self.format_json_pretty(item, indent + 1)?;
                }
            }
            _ => {
                writeln!(self.writer, "{}{}", indent_str, self.format_value(value))?;
            }
        }
        Ok(())
    }

    fn value_to_string(&self, value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Format a single value with appropriate styling
    fn format_value(&self, value: &Value) -> String {
        let (text, color) = match value {
            Value::String(s) => (format!("\"{}\"", s), "32"),
            Value::Number(n) => (n.to_string(), "36"),
            Value::Bool(b) => (b.to_string(), "35"),
            Value::Null => ("null".to_string(), "90"),
            Value::Array(arr) => (format!("[{} items]", arr.len()), "0"),
            Value::Object(obj) => (format!("{{{}}} keys", obj.len()), "0"),
        };

        if self.use_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text
        }
    }

    fn colorize_key(&self, key: &str) -> String {
        if self.use_colors {
            format!("\x1b[34m{}\x1b[0m", key)
        } else {
            key.to_string()
        }
    }

    /// Output a simple message
    pub fn message(&mut self, msg: &str) -> Result<()> {
        writeln!(self.writer, "{}", msg)?;
        Ok(())
    }

    /// Output a success message
    pub fn success(&mut self, msg: &str) -> Result<()> {
        if self.use_colors {
            writeln!(self.writer, "\x1b[32m✓\x1b[0m {}", msg)?;
        } else {
            writeln!(self.writer, "✓ {}", msg)?;
        }
        Ok(())
    }

    /// Output an error message
    pub fn error(&mut self, msg: &str) -> Result<()> {
        if self.use_colors {
            writeln!(self.writer, "\x1b[31m✗\x1b[0m {}", msg)?;
        } else {
            writeln!(self.writer, "✗ {}", msg)?;
        }
        Ok(())
    }

    /// Output a warning message
    pub fn warning(&mut self, msg: &str) -> Result<()> {
        if self.use_colors {
            writeln!(self.writer, "\x1b[33m⚠\x1b[0m {}", msg)?;
        } else {
            writeln!(self.writer, "⚠ {}", msg)?;
        }
        Ok(())
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

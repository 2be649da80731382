use anyhow::{anyhow, Result};
use serde::Serialize;
use std::io::{self, Write};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Jsonl,
    Text,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "text" => Ok(OutputFormat::Text),
            _ => Err(anyhow!("unknown format: {s} (use json, jsonl, or text)")),
        }
    }
}

pub fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let data = serde_json::to_string_pretty(value)?;
    println!("{data}");
    Ok(())
}

/// One event per line on stdout; used for both progress and final results in
/// jsonl mode so agent consumers can stream-parse.
pub fn write_jsonl<T: Serialize>(kind: &str, data: &T) -> Result<()> {
    let event = serde_json::json!({ "type": kind, "data": data });
    let mut stdout = io::stdout().lock();
    let line = serde_json::to_string(&event)?;
    stdout.write_all(line.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_formats() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("JSONL".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}

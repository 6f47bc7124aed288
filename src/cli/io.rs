//! JSON I/O handling for CLI
//!
//! - Input: one JSON document, or one JSON document per line
//! - Output: one JSON object per line
//! - UTF-8 only

use std::io::{BufRead, Read, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read a single JSON document from `input`
pub fn read_request<R: Read>(mut input: R) -> CliResult<Value> {
    let mut content = String::new();
    input.read_to_string(&mut content)?;

    if content.trim().is_empty() {
        return Err(CliError::invalid_input("Empty input"));
    }

    let value: Value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Read newline-delimited JSON documents from `input`. Blank lines are
/// skipped.
pub fn read_requests<R: BufRead>(input: R) -> impl Iterator<Item = CliResult<Value>> {
    input.lines().filter_map(|line| match line {
        Err(e) => Some(Err(CliError::from(e))),
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => Some(serde_json::from_str(&line).map_err(CliError::from)),
    })
}

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Write an error response
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_request_multiline() {
        let value = read_request("{\n  \"a\": 1\n}\n".as_bytes()).unwrap();
        assert_eq!(value, json!({ "a": 1 }));
    }

    #[test]
    fn test_read_request_empty() {
        let err = read_request("  \n".as_bytes()).unwrap_err();
        assert_eq!(err.code(), "FORM_CLI_INVALID_INPUT");
    }

    #[test]
    fn test_read_requests_skips_blank_lines() {
        let input = "{\"type\":\"advance\"}\n\n{\"type\":\"submit\"}\n";
        let values: Vec<Value> = read_requests(input.as_bytes())
            .collect::<CliResult<_>>()
            .unwrap();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_write_response_and_error() {
        let mut out = Vec::new();
        write_response(&mut out, json!({ "ok": true })).unwrap();
        write_error(&mut out, "FORM_X", "boom").unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines[0], json!({ "status": "ok", "data": { "ok": true } }));
        assert_eq!(
            lines[1],
            json!({ "status": "error", "code": "FORM_X", "message": "boom" })
        );
    }
}

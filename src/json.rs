//! JSON parsing with error context for upstream API responses.

use anyhow::Result;

/// Parse `body` as `T`, reporting the serde path, position and a short excerpt on failure.
pub fn parse_json_with_context<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    let jd = &mut serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(jd).map_err(|err| {
        let inner = err.inner();
        let (line, column) = (inner.line(), inner.column());
        let path = err.path().to_string();

        let msg = inner.to_string();
        let loc = format!(" at line {line} column {column}");
        let msg = msg.strip_suffix(&loc).unwrap_or(&msg);

        let mut out = String::new();
        if !path.is_empty() && path != "." {
            out.push_str(&format!("at path '{path}': "));
        }
        out.push_str(&format!("{msg} (line {line} col {column})"));
        if let Some(excerpt) = excerpt(body, line, column) {
            out.push_str(&format!(" near `{excerpt}`"));
        }
        anyhow::anyhow!(out)
    })
}

/// Up to 20 characters of the offending line, centered on the error column.
fn excerpt(body: &str, line: usize, column: usize) -> Option<String> {
    let target = body.lines().nth(line.saturating_sub(1))?;
    if target.is_empty() {
        return None;
    }
    let chars: Vec<char> = target.chars().collect();
    let idx = column.saturating_sub(1).min(chars.len());
    let start = idx.saturating_sub(10);
    let end = (idx + 10).min(chars.len());
    Some(chars[start..end].iter().collect())
}

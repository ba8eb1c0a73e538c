//! Text armor: a PEM-style block that carries binary data through email,
//! config files and copy-paste.
//!
//! ```text
//! -----BEGIN LICENSE KEY-----
//! id: lic-2024-0001
//!
//! eJzLSM3JyVcozy/KSQEAGgQEXQ==
//! -----END LICENSE KEY-----
//! ```
//!
//! Headers are `key: value` lines, written in key order and followed by a
//! blank line. A value is everything after the single space that follows
//! the colon, so values with leading or trailing whitespace survive. The
//! body is standard padded base64 in 64-column lines.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{LicenseError, Result};

/// Block label for license tokens.
pub const LICENSE_LABEL: &str = "LICENSE KEY";

/// Header carrying the token identifier in cleartext.
pub const HEADER_ID: &str = "id";

const LINE_WIDTH: usize = 64;
const BEGIN_PREFIX: &str = "-----BEGIN ";
const END_PREFIX: &str = "-----END ";
const DASHES: &str = "-----";

/// A parsed armored block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmoredBlock {
    pub label: String,
    pub headers: BTreeMap<String, String>,
    pub payload: Vec<u8>,
}

impl ArmoredBlock {
    /// A block with no headers.
    pub fn new(label: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            label: label.into(),
            headers: BTreeMap::new(),
            payload: payload.into(),
        }
    }

    /// Add or replace a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Look up a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// Render this block as text.
    pub fn to_text(&self) -> Result<String> {
        wrap(&self.label, &self.headers, &self.payload)
    }
}

/// Render `payload` as an armored block.
///
/// Fails with [`LicenseError::MalformedContainer`] if the label or a header
/// could not be read back: line breaks anywhere, dashes or an empty label,
/// an empty header key, or `:` in a header key.
pub fn wrap(label: &str, headers: &BTreeMap<String, String>, payload: &[u8]) -> Result<String> {
    check_label(label)?;
    for (key, value) in headers {
        check_header(key, value)?;
    }

    let body = STANDARD.encode(payload);
    let mut out = String::with_capacity(body.len() + body.len() / LINE_WIDTH + 64);

    out.push_str(BEGIN_PREFIX);
    out.push_str(label);
    out.push_str(DASHES);
    out.push('\n');

    if !headers.is_empty() {
        for (key, value) in headers {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out.push('\n');
    }

    // Base64 output is ASCII, so splitting on byte boundaries is safe.
    for line in body.as_bytes().chunks(LINE_WIDTH) {
        out.extend(line.iter().map(|&b| char::from(b)));
        out.push('\n');
    }

    out.push_str(END_PREFIX);
    out.push_str(label);
    out.push_str(DASHES);
    out.push('\n');

    Ok(out)
}

/// Parse the first armored block in `text`.
///
/// Text before the BEGIN line and after the END line is ignored, as are
/// CRLF line endings and whitespace around the marker and body lines.
/// The block's label must equal `expected_label`.
pub fn unwrap(text: &str, expected_label: &str) -> Result<ArmoredBlock> {
    let mut lines = text.lines();

    let label = lines
        .by_ref()
        .find_map(begin_label)
        .ok_or_else(|| malformed("no BEGIN line found"))?;

    if label != expected_label {
        return Err(malformed(format!(
            "unexpected block label {label:?}, expected {expected_label:?}"
        )));
    }

    let mut headers = BTreeMap::new();
    let mut body = String::new();
    let mut in_headers = true;
    let mut terminated = false;

    for line in lines {
        if let Some(rest) = line.trim().strip_prefix(END_PREFIX) {
            let end_label = rest
                .strip_suffix(DASHES)
                .ok_or_else(|| malformed("bad END line"))?;
            if end_label != label {
                return Err(malformed(format!(
                    "END label {end_label:?} does not match BEGIN label {label:?}"
                )));
            }
            terminated = true;
            break;
        }

        if in_headers {
            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim();
                if key.is_empty() {
                    return Err(malformed("header line with empty key"));
                }
                let value = value.strip_prefix(' ').unwrap_or(value);
                headers.insert(key.to_string(), value.to_string());
                continue;
            }
            in_headers = false;
        }

        let line = line.trim();
        if line.contains(':') {
            return Err(malformed("header line inside body"));
        }
        body.push_str(line);
    }

    if !terminated {
        return Err(malformed("missing END line"));
    }

    let payload = STANDARD
        .decode(body.as_bytes())
        .map_err(|e| malformed(format!("invalid base64 body: {e}")))?;

    Ok(ArmoredBlock {
        label: label.to_string(),
        headers,
        payload,
    })
}

fn begin_label(line: &str) -> Option<&str> {
    line.trim()
        .strip_prefix(BEGIN_PREFIX)?
        .strip_suffix(DASHES)
}

fn check_label(label: &str) -> Result<()> {
    if label.is_empty() || label.contains(['\r', '\n']) || label.contains(DASHES) {
        return Err(malformed(format!("invalid block label {label:?}")));
    }
    Ok(())
}

fn check_header(key: &str, value: &str) -> Result<()> {
    if key.trim().is_empty() || key.contains([':', '\r', '\n']) {
        return Err(malformed(format!("invalid header key {key:?}")));
    }
    if value.contains(['\r', '\n']) {
        return Err(malformed(format!("invalid value for header {key:?}")));
    }
    Ok(())
}

fn malformed(message: impl Into<String>) -> LicenseError {
    LicenseError::MalformedContainer(message.into())
}

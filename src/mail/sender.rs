// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sender-identity extraction
//!
//! Finds the declared sender address in the header of a secure-mail document.
//! Not a MIME parser: it only splits header from body,
//! unfolds header lines and reads the `From` field.

use std::sync::OnceLock;

use regex::Regex;

use super::error::SenderError;

const EMAIL_PATTERN: &str = r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

/// Pulls the sender address out of a document header
pub trait SenderExtractor: Send + Sync {
    fn extract_sender(&self, document: &str) -> Result<String, SenderError>;
}

/// `From`-header based extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderSenderExtractor;

impl SenderExtractor for HeaderSenderExtractor {
    fn extract_sender(&self, document: &str) -> Result<String, SenderError> {
        let header = header_lines(document)?;
        let from = header
            .iter()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.trim().eq_ignore_ascii_case("from").then_some(value)
            })
            .ok_or(SenderError::MissingFrom)?;

        parse_address(from)
    }
}

/// Header lines up to the first empty line, with folded lines joined
fn header_lines(document: &str) -> Result<Vec<String>, SenderError> {
    let mut lines: Vec<String> = Vec::new();
    for line in document.trim().lines() {
        if line.is_empty() {
            break;
        }
        match lines.last_mut() {
            Some(last) if line.starts_with([' ', '\t']) => {
                last.push(' ');
                last.push_str(line.trim_start());
            }
            _ => lines.push(line.to_string()),
        }
    }

    if lines.is_empty() {
        return Err(SenderError::MissingHeader);
    }
    Ok(lines)
}

/// First `<`/`>`-delimited token of `value` that is a valid address
fn parse_address(value: &str) -> Result<String, SenderError> {
    let value = value.split(';').next().unwrap_or_default().trim();
    value
        .split(['<', '>'])
        .map(str::trim)
        .find(|token| email_regex().is_some_and(|re| re.is_match(token)))
        .map(str::to_string)
        .ok_or_else(|| SenderError::InvalidAddress(value.to_string()))
}

//! Leading `---` metadata block of a daily file.

use super::ParseError;
use crate::model::document::MetadataLine;
use chrono::NaiveDate;

pub(crate) const FENCE: &str = "---";
pub(crate) const DOCUMENT_TYPE: &str = "daily";
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decoded front matter plus the index of the first body line.
#[derive(Debug)]
pub(crate) struct FrontMatter {
    pub date: NaiveDate,
    pub metadata: Vec<MetadataLine>,
    pub body_start: usize,
}

/// Reads the metadata block at the top of `lines`.
///
/// Leading blank lines are tolerated. `type`, when present, must be `daily`.
/// Comments, indented continuation lines and lines without a `key:` prefix
/// are kept verbatim as raw metadata.
pub(crate) fn read_front_matter(lines: &[&str]) -> Result<FrontMatter, ParseError> {
    let open = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .ok_or_else(|| malformed(1, "file is empty"))?;
    if lines[open].trim_end() != FENCE {
        return Err(malformed(open + 1, "expected opening `---`"));
    }

    let mut date: Option<NaiveDate> = None;
    let mut metadata = Vec::new();

    for (index, raw) in lines.iter().enumerate().skip(open + 1) {
        let line_no = index + 1;
        let line = raw.trim();
        if line == FENCE {
            let date = date.ok_or_else(|| malformed(line_no, "missing required field `date`"))?;
            return Ok(FrontMatter {
                date,
                metadata,
                body_start: index + 1,
            });
        }
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = top_level_field(raw) else {
            metadata.push(MetadataLine::Raw(raw.trim_end().to_string()));
            continue;
        };

        match key {
            "type" => {
                let kind = unquote(value);
                if kind != DOCUMENT_TYPE {
                    return Err(malformed(
                        line_no,
                        format!("unsupported document type `{kind}`"),
                    ));
                }
            }
            "date" => {
                if date.is_some() {
                    return Err(malformed(line_no, "duplicate field `date`"));
                }
                let parsed = NaiveDate::parse_from_str(unquote(value), DATE_FORMAT)
                    .map_err(|err| malformed(line_no, format!("invalid date `{value}`: {err}")))?;
                date = Some(parsed);
            }
            _ => metadata.push(MetadataLine::Field {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    Err(malformed(lines.len(), "missing closing `---`"))
}

/// Splits an unindented, non-comment `key: value` line.
fn top_level_field(raw: &str) -> Option<(&str, &str)> {
    if raw.starts_with(char::is_whitespace) || raw.starts_with('#') {
        return None;
    }
    let (key, value) = raw.split_once(':')?;
    let key = key.trim();
    (!key.is_empty()).then(|| (key, value.trim()))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn malformed(line: usize, reason: impl Into<String>) -> ParseError {
    ParseError::MalformedFrontMatter {
        line,
        reason: reason.into(),
    }
}

use thiserror::Error;

use crate::core::TagAssignment;
use crate::stemming::Stemmer;

/// Field separator of the tagging log: a quote, a semicolon and a quote.
pub const FIELD_DELIMITER: &str = "\";\"";

/// user, resource, timestamp and tags are mandatory
pub const MIN_FIELDS: usize = 4;

/// A line with too few fields. The line is skipped, never fatal.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Malformed record: {fields} fields, expected at least 4")]
pub struct MalformedRecord {
    pub fields: usize,
}

/// A non-empty, non-numeric timestamp. The event is not committed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid timestamp: {0}")]
pub struct InvalidTimestamp(pub String);

/// Outcome of reading the optional rating column.
#[derive(Debug, Clone, PartialEq)]
pub enum RatingField {
    Absent,
    Valid(f64),
    Unparsable(String),
}

/// One line of the log, split and normalized but not yet interned.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFields {
    pub user: String,
    pub resource: String,
    pub timestamp: String,
    /// Lower-cased (and stemmed, if configured), empty tokens removed
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub rating: RatingField,
}

impl ParsedFields {
    pub fn rating(&self) -> Option<f64> {
        match self.rating {
            RatingField::Valid(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_assignment(self) -> TagAssignment {
        let rating = self.rating();
        TagAssignment {
            user: self.user,
            resource: self.resource,
            timestamp: self.timestamp,
            rating,
            tags: self.tags,
            categories: self.categories,
        }
    }
}

/// Parse one line of the tagging log:
/// `"user";"resource";"timestamp";"tag,tag";"category,category";"rating"`
///
/// The last two columns are optional. Trailing empty columns are ignored
/// before the field count is checked.
pub fn parse_line(raw: &str, stemmer: Option<&dyn Stemmer>) -> Result<ParsedFields, MalformedRecord> {
    let mut parts: Vec<&str> = raw.split(FIELD_DELIMITER).collect();
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }

    if parts.len() < MIN_FIELDS {
        return Err(MalformedRecord { fields: parts.len() });
    }

    let tags = split_list(strip_quotes(parts[3]))
        .map(|tag| {
            let lower = tag.to_lowercase();
            match stemmer {
                Some(stemmer) => stemmer.stem(&lower),
                None => lower,
            }
        })
        .collect();

    let categories = parts
        .get(4)
        .map(|field| split_list(strip_quotes(field)).map(str::to_lowercase).collect())
        .unwrap_or_default();

    let rating = parts.get(5).map_or(RatingField::Absent, |field| parse_rating(strip_quotes(field)));

    Ok(ParsedFields {
        user: strip_quotes(parts[0]).to_string(),
        resource: strip_quotes(parts[1]).to_string(),
        timestamp: strip_quotes(parts[2]).to_string(),
        tags,
        categories,
        rating,
    })
}

/// An empty timestamp is allowed, anything else must be all digits.
pub fn validate_timestamp(timestamp: &str) -> Result<(), InvalidTimestamp> {
    if timestamp.is_empty() || is_numeric(timestamp) {
        Ok(())
    } else {
        Err(InvalidTimestamp(timestamp.to_string()))
    }
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn strip_quotes(field: &str) -> &str {
    field.trim_matches('"')
}

fn split_list(field: &str) -> impl Iterator<Item = &str> {
    field.split(',').filter(|token| !token.is_empty())
}

fn parse_rating(field: &str) -> RatingField {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return RatingField::Absent;
    }
    match trimmed.parse::<f64>() {
        Ok(value) => RatingField::Valid(value),
        Err(_) => RatingField::Unparsable(trimmed.to_string()),
    }
}

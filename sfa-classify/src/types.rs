//! Core types for classification lookups
//!
//! Everything here is created while resolving one identifier and dropped
//! once that identifier's value has been written out.

use std::fmt;
use std::str::FromStr;

/// Identifier kind sent to the classification service as a query parameter name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// International Standard Book Number
    Isbn,
    /// International Standard Serial Number
    Issn,
    /// Any standard number (ISBN, ISSN, UPC)
    StdNbr,
    /// OCLC record number; also used for follow-up lookups on candidate works
    Oclc,
    /// OCLC work identifier (group of manifestations)
    Owi,
    /// Work identifier of a single record
    Wi,
    /// Any other parameter name the service accepts
    Other(String),
}

impl KeyType {
    /// Query parameter name for this key type
    pub fn as_param(&self) -> &str {
        match self {
            KeyType::Isbn => "isbn",
            KeyType::Issn => "issn",
            KeyType::StdNbr => "stdnbr",
            KeyType::Oclc => "oclc",
            KeyType::Owi => "owi",
            KeyType::Wi => "wi",
            KeyType::Other(name) => name,
        }
    }
}

impl FromStr for KeyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err("key type must not be empty".to_string());
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(format!("invalid key type '{}'", name));
        }

        Ok(match name.to_ascii_lowercase().as_str() {
            "isbn" => KeyType::Isbn,
            "issn" => KeyType::Issn,
            "stdnbr" => KeyType::StdNbr,
            "oclc" => KeyType::Oclc,
            "owi" => KeyType::Owi,
            "wi" => KeyType::Wi,
            _ => KeyType::Other(name.to_string()),
        })
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// One (key type, key value) pair sent to the service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub key_type: KeyType,
    pub value: String,
}

impl QueryKey {
    pub fn new(key_type: KeyType, value: impl Into<String>) -> Self {
        Self {
            key_type,
            value: value.into(),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key_type, self.value)
    }
}

/// Response code reported by the classification service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseStatus {
    /// Code "0": exactly one work, with a recommendation
    SingleMatch,
    /// Code "4": several candidate works
    MultipleMatches,
    /// Code "2": valid response, nothing usable found
    NoMatch,
    /// Any other code, kept verbatim
    Other(String),
    /// No usable response at all (network, HTTP or parse failure)
    Unusable,
}

impl ResponseStatus {
    /// Map the raw `code` attribute
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "0" => ResponseStatus::SingleMatch,
            "4" => ResponseStatus::MultipleMatches,
            "2" => ResponseStatus::NoMatch,
            other => ResponseStatus::Other(other.to_string()),
        }
    }

    /// Whether this status ends the retry loop
    pub fn is_acceptable(&self) -> bool {
        matches!(
            self,
            ResponseStatus::SingleMatch | ResponseStatus::MultipleMatches | ResponseStatus::NoMatch
        )
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::SingleMatch => f.write_str("0"),
            ResponseStatus::MultipleMatches => f.write_str("4"),
            ResponseStatus::NoMatch => f.write_str("2"),
            ResponseStatus::Other(code) => f.write_str(code),
            ResponseStatus::Unusable => f.write_str("unusable"),
        }
    }
}

/// Candidate work listed in a multiple-match response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkCandidate {
    /// Group identifier (OWI)
    pub owi: String,
    /// Single-record identifier (WI)
    pub wi: String,
}

/// Parsed result of one classification query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResponse {
    pub status: ResponseStatus,
    /// Candidate works, in document order
    pub works: Vec<WorkCandidate>,
    /// Most recent LCC recommendation (`sfa` attribute)
    pub sfa: Option<String>,
}

impl ClassificationResponse {
    /// Response standing in for a failed round trip
    pub fn unusable() -> Self {
        Self {
            status: ResponseStatus::Unusable,
            works: Vec::new(),
            sfa: None,
        }
    }

    /// Single-match response carrying `sfa`
    pub fn single(sfa: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::SingleMatch,
            works: Vec::new(),
            sfa: Some(sfa.into()),
        }
    }

    /// Multiple-match response listing `works`
    pub fn multiple(works: Vec<WorkCandidate>) -> Self {
        Self {
            status: ResponseStatus::MultipleMatches,
            works,
            sfa: None,
        }
    }

    /// Response with a bare status and no payload
    pub fn with_status(status: ResponseStatus) -> Self {
        Self {
            status,
            works: Vec::new(),
            sfa: None,
        }
    }

    /// First candidate work; the only one the resolution protocol consults
    pub fn first_work(&self) -> Option<&WorkCandidate> {
        self.works.first()
    }
}

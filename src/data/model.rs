use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Categorical fields
// ---------------------------------------------------------------------------

/// Sex category of a faculty member.  The source dataset only contains
/// "Female" and "Male", but unexpected labels are preserved rather than
/// rejected so a dirty file still loads.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sex {
    Female,
    Male,
    Other(String),
}

impl Sex {
    pub fn parse(s: &str) -> Sex {
        match s {
            "Female" => Sex::Female,
            "Male" => Sex::Male,
            other => Sex::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Female => write!(f, "Female"),
            Sex::Male => write!(f, "Male"),
            Sex::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Academic rank.  Ranks outside the three observed categories land in
/// `Other` so rank partitions stay exhaustive even on unexpected data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Prof,
    AssocProf,
    AsstProf,
    Other(String),
}

impl Rank {
    pub fn parse(s: &str) -> Rank {
        match s {
            "Prof" => Rank::Prof,
            "AssocProf" => Rank::AssocProf,
            "AsstProf" => Rank::AsstProf,
            other => Rank::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Prof => write!(f, "Prof"),
            Rank::AssocProf => write!(f, "AssocProf"),
            Rank::AsstProf => write!(f, "AsstProf"),
            Rank::Other(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// FacultyRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single faculty member (one row of the source table).  Immutable once
/// loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyRecord {
    pub discipline: String,
    pub sex: Sex,
    pub rank: Rank,
    /// Years since the PhD was awarded.
    pub yrs_since_phd: i64,
    /// Years of service at the institution.
    pub yrs_service: i64,
    /// Annual salary in whole dollars.
    pub salary: i64,
}

/// Failure to convert a raw text field into a typed record field.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("'{value}' is not a number (column '{column}')")]
    NotNumeric { column: &'static str, value: String },
}

/// Parse a numeric field given as decimal text ("139750" or "139750.0")
/// into whole units, trimming surrounding whitespace.
pub fn parse_numeric(column: &'static str, value: &str) -> Result<i64, FieldError> {
    let trimmed = value.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Ok(i);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v as i64)
        .ok_or_else(|| FieldError::NotNumeric {
            column,
            value: value.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Key – a dynamically typed dimension key
// ---------------------------------------------------------------------------

/// Value a dimension projects a record onto.  `List` covers composite keys
/// (the scatter plots key on `[x_metric, salary, rank, sex]`).
///
/// Keys only hold integers and text, so the derived `Ord` is total and they
/// can key `BTreeMap`s directly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Int(i64),
    Text(String),
    List(Vec<Key>),
}

impl Key {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Key::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Key]> {
        match self {
            Key::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{i}"),
            Key::Text(s) => write!(f, "{s}"),
            Key::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " / ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

impl From<&Sex> for Key {
    fn from(sex: &Sex) -> Self {
        Key::Text(sex.to_string())
    }
}

impl From<&Rank> for Key {
    fn from(rank: &Rank) -> Self {
        Key::Text(rank.to_string())
    }
}

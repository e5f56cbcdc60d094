use crate::error::Failure;
use serde::Deserialize;
use serde_json::Value;

/// One unparsed country object as returned by the API (first element of the result array).
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord(pub Value);

impl From<Value> for RawRecord {
    fn from(v: Value) -> Self {
        RawRecord(v)
    }
}

/// The `name` object of a country document.
#[derive(Debug, Clone, Deserialize)]
struct NameDoc {
    common: String,
    #[serde(default)]
    official: Option<String>,
}

/// Typed view of the fields we read from a country document. Everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
struct CountryDoc {
    name: NameDoc,
    population: u64,
    region: String,
    #[serde(default)]
    borders: Vec<String>,
}

/// Normalized country record used by stats, reporting and storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub name: String,
    pub official_name: Option<String>,
    pub population: u64,
    pub region: String,
    /// ISO 3166-1 alpha-3 codes of neighbouring countries.
    pub borders: Vec<String>,
}

impl Country {
    /// Record with just the required fields.
    pub fn new(name: impl Into<String>, population: u64, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            official_name: None,
            population,
            region: region.into(),
            borders: Vec::new(),
        }
    }
}

impl From<CountryDoc> for Country {
    fn from(d: CountryDoc) -> Self {
        Self {
            name: d.name.common,
            official_name: d.name.official,
            population: d.population,
            region: d.region,
            borders: d.borders,
        }
    }
}

/// Extract a [`Country`] from a raw record.
///
/// ### Errors
/// - [`Failure::MissingInput`] when `record` is `None`
/// - [`Failure::SchemaMismatch`] when `name.common`, `population` or `region` is absent
///   or has the wrong type (a negative population counts as the wrong type)
///
/// The record is only borrowed; on error nothing is returned.
pub fn parse(record: Option<&RawRecord>) -> Result<Country, Failure> {
    let raw = record.ok_or(Failure::MissingInput)?;
    let doc = CountryDoc::deserialize(&raw.0).map_err(|e| Failure::SchemaMismatch(e.to_string()))?;
    Ok(Country::from(doc))
}

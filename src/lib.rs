//! country_stats
//!
//! A small Rust library for looking up countries on the REST Countries API,
//! comparing their populations, and keeping a plain-text log of every lookup.
//! Pairs with the `country-stats` CLI.
//!
//! ### Features
//! - Fetch one country by name with a bounded timeout
//! - Typed extraction of name, official name, population, region and borders
//! - Running population summary (total, average, most and least populous)
//! - Append-only `countries.txt` log, one line per successful lookup
//!
//! ### Example
//! ```no_run
//! use country_stats::{Client, models, stats, report, storage::Store};
//!
//! let client = Client::default();
//! let mut seen = Vec::new();
//! for name in ["France", "Germany"] {
//!     let raw = client.fetch(name)?;
//!     seen.push(models::parse(Some(&raw))?);
//! }
//! let summary = stats::summarize(&seen);
//! report::report(&seen[1], summary.as_ref());
//! Store::new("countries.txt").save(seen.last())?;
//! # Ok::<(), country_stats::Failure>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod session;
pub mod stats;
pub mod storage;

pub use api::{Client, CountrySource};
pub use config::Config;
pub use error::{Failure, FailureKind};
pub use models::{Country, RawRecord};
pub use session::{Session, State};
pub use stats::Summary;

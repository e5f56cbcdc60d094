use crate::error::Failure;
use crate::models::Country;
use log::info;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only text log of looked-up countries, one line per record.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

/// The persisted line for one record, including the trailing newline.
pub fn format_line(c: &Country) -> String {
    format!(
        "Country: {}, Population: {}, Region: {}\n",
        c.name, c.population, c.region
    )
}

impl Store {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `country` to the log. `None` is a no-op.
    ///
    /// The file is created if needed and closed again before returning.
    pub fn save(&self, country: Option<&Country>) -> Result<(), Failure> {
        let Some(c) = country else {
            return Ok(());
        };
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        f.write_all(format_line(c).as_bytes())?;
        f.flush()?;
        info!("saved {} to {}", c.name, self.path.display());
        Ok(())
    }
}

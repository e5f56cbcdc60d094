//! Human-readable report text for a looked-up country and the running summary.

use crate::models::Country;
use crate::stats::Summary;
use num_format::{Locale, ToFormattedString};
use std::io::{self, Write};

fn fmt_int(v: u64) -> String {
    v.to_formatted_string(&Locale::en)
}

/// Two decimals with grouped integer part, e.g. `75,500,000.00`.
pub fn fmt_avg(v: f64) -> String {
    if !v.is_finite() {
        return "NA".to_string();
    }
    let s = format!("{:.2}", v.abs());
    let (int_part, frac) = s.split_once('.').unwrap_or((s.as_str(), "00"));
    let grouped = int_part
        .parse::<u64>()
        .map(fmt_int)
        .unwrap_or_else(|_| int_part.to_string());
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

fn text_line<W: Write>(out: &mut W, label: &str, key: &str, value: &str) -> io::Result<()> {
    if value.trim().is_empty() {
        writeln!(out, "Missing field in record: {key}")
    } else {
        writeln!(out, "{label}: {value}")
    }
}

/// Write the report for `country` (and `summary`, if any) to `out`.
///
/// Empty required text fields produce a `Missing field in record: <key>` line instead
/// of aborting the report.
pub fn write_report<W: Write>(
    out: &mut W,
    country: &Country,
    summary: Option<&Summary>,
) -> io::Result<()> {
    text_line(out, "Country", "name", &country.name)?;
    if let Some(official) = country.official_name.as_deref().filter(|s| !s.is_empty()) {
        writeln!(out, "Official name: {official}")?;
    }
    writeln!(out, "Population: {}", fmt_int(country.population))?;
    text_line(out, "Region", "region", &country.region)?;
    if !country.borders.is_empty() {
        writeln!(out, "Borders: {}", country.borders.join(", "))?;
    }

    if let Some(s) = summary {
        writeln!(out, "Countries compared: {}", s.count)?;
        writeln!(out, "Total population: {}", fmt_int(s.total_population))?;
        writeln!(out, "Average population: {}", fmt_avg(s.average_population))?;
        writeln!(
            out,
            "Most populous: {} ({})",
            s.most_populous.name,
            fmt_int(s.most_populous.population)
        )?;
        writeln!(
            out,
            "Least populous: {} ({})",
            s.least_populous.name,
            fmt_int(s.least_populous.population)
        )?;
    }
    Ok(())
}

/// Render the report into a `String`.
pub fn render(country: &Country, summary: Option<&Summary>) -> String {
    let mut buf = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_report(&mut buf, country, summary);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Print the report to stdout and return the text that was printed.
pub fn report(country: &Country, summary: Option<&Summary>) -> String {
    let text = render(country, summary);
    print!("{text}");
    text
}

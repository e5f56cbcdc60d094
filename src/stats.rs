use crate::models::Country;

/// Population statistics over the countries looked up so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub total_population: u64,
    pub average_population: f64,
    pub most_populous: Country,
    pub least_populous: Country,
}

/// Compute a summary over `countries`, or `None` when the slice is empty.
///
/// On equal populations the country that comes first in `countries` wins.
pub fn summarize(countries: &[Country]) -> Option<Summary> {
    let (first, rest) = countries.split_first()?;

    let mut total = first.population;
    let mut most = first;
    let mut least = first;
    for c in rest {
        total = total.saturating_add(c.population);
        // strict comparisons keep the earliest record on ties
        if c.population > most.population {
            most = c;
        }
        if c.population < least.population {
            least = c;
        }
    }

    let count = countries.len();
    Some(Summary {
        count,
        total_population: total,
        average_population: total as f64 / count as f64,
        most_populous: most.clone(),
        least_populous: least.clone(),
    })
}

use crate::types::{PostalRecord, Province};

use std::fmt::Display;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads a previously written `postal-codes.json`.
pub fn load_dataset(path: &Path) -> Result<Vec<PostalRecord>, DatasetError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Unique province names present in the dataset, sorted.
pub fn provinces(records: &[PostalRecord]) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = records.iter().map(|r| r.province.name()).collect();
    names.sort();
    names.dedup();
    names
}

/// Unique cantons of one province, sorted.
pub fn cantons(records: &[PostalRecord], province: Province) -> Vec<String> {
    let mut cantons: Vec<String> = records
        .iter()
        .filter(|r| r.province == province)
        .map(|r| r.canton.clone())
        .collect();
    cantons.sort();
    cantons.dedup();
    cantons
}

/// District records of one province, optionally narrowed to one canton,
/// sorted by district name.
pub fn districts<'a>(
    records: &'a [PostalRecord],
    province: Province,
    canton: Option<&str>,
) -> Vec<&'a PostalRecord> {
    let mut matches: Vec<&PostalRecord> = records
        .iter()
        .filter(|r| r.province == province)
        .filter(|r| canton.is_none_or(|c| r.canton == c))
        .collect();
    matches.sort_by(|a, b| a.district.cmp(&b.district));
    matches
}

/// Case-insensitive substring search across all four fields.
pub fn search<'a>(records: &'a [PostalRecord], query: &str) -> Vec<&'a PostalRecord> {
    let term = query.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.province.name().to_lowercase().contains(&term)
                || r.canton.to_lowercase().contains(&term)
                || r.district.to_lowercase().contains(&term)
                || r.postal_code.contains(&term)
        })
        .collect()
}

#[derive(Debug)]
pub struct DatasetStats {
    pub by_province: Vec<(&'static str, usize)>,
    pub total: usize,
}

impl DatasetStats {
    pub fn from_records(records: &[PostalRecord]) -> DatasetStats {
        let by_province = Province::ALL
            .iter()
            .map(|p| {
                let count = records.iter().filter(|r| r.province == *p).count();
                (p.name(), count)
            })
            .filter(|(_, count)| *count > 0)
            .collect();

        DatasetStats {
            by_province,
            total: records.len(),
        }
    }
}

impl Display for DatasetStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        for (name, count) in &self.by_province {
            writeln!(f, "  {:<12} {:>5}", name, count)?;
        }
        writeln!(f, "  {:<12} {:>5}", "Total", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(province: Province, canton: &str, district: &str, code: &str) -> PostalRecord {
        PostalRecord {
            province,
            canton: canton.to_string(),
            district: district.to_string(),
            postal_code: code.to_string(),
        }
    }

    fn sample() -> Vec<PostalRecord> {
        vec![
            record(Province::SanJose, "San José", "Carmen", "10101"),
            record(Province::SanJose, "San José", "Merced", "10102"),
            record(Province::SanJose, "Escazú", "Escazú", "10201"),
            record(Province::Alajuela, "Grecia", "Bolívar", "20305"),
        ]
    }

    #[test]
    fn test_provinces_unique_and_sorted() {
        assert_eq!(provinces(&sample()), vec!["Alajuela", "San José"]);
    }

    #[test]
    fn test_cantons_by_province() {
        let records = sample();
        assert_eq!(
            cantons(&records, Province::SanJose),
            vec!["Escazú".to_string(), "San José".to_string()]
        );
        assert!(cantons(&records, Province::Limon).is_empty());
    }

    #[test]
    fn test_districts_optionally_scoped_to_canton() {
        let records = sample();

        let all = districts(&records, Province::SanJose, None);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].district, "Carmen");

        let scoped = districts(&records, Province::SanJose, Some("San José"));
        assert_eq!(scoped.len(), 2);
        assert!(scoped.iter().all(|r| r.canton == "San José"));
    }

    #[test]
    fn test_search_matches_any_field() {
        let records = sample();

        assert_eq!(search(&records, "escazú").len(), 1);
        assert_eq!(search(&records, "ESCAZÚ").len(), 1);
        assert_eq!(search(&records, "10102").len(), 1);
        assert_eq!(search(&records, "san josé").len(), 3);
        assert!(search(&records, "nonexistent").is_empty());
    }

    #[test]
    fn test_stats_skip_absent_provinces() {
        let stats = DatasetStats::from_records(&sample());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_province, vec![("Alajuela", 1), ("San José", 3)]);
    }
}

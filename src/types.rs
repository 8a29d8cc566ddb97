use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// The seven provinces of Costa Rica. Variants are declared in the
/// lexicographic order of their display names so the derived `Ord`
/// matches the sort order of the emitted dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Province {
    Alajuela,
    Cartago,
    Guanacaste,
    Heredia,
    #[serde(rename = "Limón")]
    Limon,
    Puntarenas,
    #[serde(rename = "San José")]
    SanJose,
}

impl Province {
    pub const ALL: [Province; 7] = [
        Province::Alajuela,
        Province::Cartago,
        Province::Guanacaste,
        Province::Heredia,
        Province::Limon,
        Province::Puntarenas,
        Province::SanJose,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Province::Alajuela => "Alajuela",
            Province::Cartago => "Cartago",
            Province::Guanacaste => "Guanacaste",
            Province::Heredia => "Heredia",
            Province::Limon => "Limón",
            Province::Puntarenas => "Puntarenas",
            Province::SanJose => "San José",
        }
    }

    /// Recognizes the exact spellings used on the source page, accents
    /// included. Anything else is not a province header.
    pub fn from_name(name: &str) -> Option<Province> {
        match name {
            "Alajuela" => Some(Province::Alajuela),
            "Cartago" => Some(Province::Cartago),
            "Guanacaste" => Some(Province::Guanacaste),
            "Heredia" => Some(Province::Heredia),
            "Limón" => Some(Province::Limon),
            "Puntarenas" => Some(Province::Puntarenas),
            "San José" => Some(Province::SanJose),
            _ => None,
        }
    }
}

impl Display for Province {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Province {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Province::from_name(s).ok_or_else(|| format!("Unknown province: {}", s))
    }
}

/// One row of the emitted dataset. Field order here is the field order
/// of the serialized JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostalRecord {
    pub province: Province,
    pub canton: String,
    pub district: String,
    pub postal_code: String,
}

impl PostalRecord {
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (self.province.name(), &self.canton, &self.district)
    }
}

impl Display for PostalRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} > {} > {} = {}",
            self.province, self.canton, self.district, self.postal_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_province_name_roundtrip() {
        for province in Province::ALL {
            assert_eq!(Province::from_name(province.name()), Some(province));
        }
    }

    #[test]
    fn test_province_rejects_unknown_names() {
        assert_eq!(Province::from_name("Bogotá"), None);
        assert_eq!(Province::from_name("san josé"), None);
        assert_eq!(Province::from_name("San Jose"), None);
        assert_eq!(Province::from_name(""), None);
    }

    #[test]
    fn test_province_order_matches_name_order() {
        let names: Vec<&str> = Province::ALL.iter().map(|p| p.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_province_from_str() {
        assert_eq!("Limón".parse::<Province>(), Ok(Province::Limon));
        assert!("Limon".parse::<Province>().is_err());
    }

    #[test]
    fn test_record_serializes_with_display_names_and_field_order() {
        let record = PostalRecord {
            province: Province::SanJose,
            canton: "San José".to_string(),
            district: "Carmen".to_string(),
            postal_code: "10101".to_string(),
        };

        let json = serde_json::to_string(&record).expect("Failed to serialize");
        assert_eq!(
            json,
            r#"{"province":"San José","canton":"San José","district":"Carmen","postal_code":"10101"}"#
        );

        let back: PostalRecord = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn test_record_display() {
        let record = PostalRecord {
            province: Province::Limon,
            canton: "Talamanca".to_string(),
            district: "Cahuita".to_string(),
            postal_code: "70403".to_string(),
        };
        assert_eq!(record.to_string(), "Limón > Talamanca > Cahuita = 70403");
    }
}

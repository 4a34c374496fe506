//! Deserializers for query-string parameters.
//!
//! Browsers and form clients send `?city=&page=` for untouched inputs. These
//! helpers treat blank values as absent so that a blank filter contributes
//! nothing to a listing query.

use serde::{Deserialize, Deserializer};

/// Blank or whitespace-only strings become `None`; other values are trimmed.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        city: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        company_id: Option<i64>,
    }

    #[test]
    fn test_blank_values_are_absent() {
        let params: Params = serde_json::from_str(r#"{"city":"   ","company_id":""}"#).unwrap();
        assert!(params.city.is_none());
        assert!(params.company_id.is_none());
    }

    #[test]
    fn test_missing_values_are_absent() {
        let params: Params = serde_json::from_str("{}").unwrap();
        assert!(params.city.is_none());
        assert!(params.company_id.is_none());
    }

    #[test]
    fn test_values_are_trimmed_and_parsed() {
        let params: Params =
            serde_json::from_str(r#"{"city":" Recife ","company_id":" 42"}"#).unwrap();
        assert_eq!(params.city.as_deref(), Some("Recife"));
        assert_eq!(params.company_id, Some(42));
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        let result: Result<Params, _> = serde_json::from_str(r#"{"company_id":"abc"}"#);
        assert!(result.is_err());
    }
}

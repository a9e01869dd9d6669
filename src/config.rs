use std::collections::HashMap;

pub const DEFAULT_SHEET: &str = "evaluations";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where saved evaluations go. Absent means the app runs local-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: String,
    pub sheet: String,
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn from_env() -> Option<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Option<Self> {
        let database_url = vars
            .get("DATABASE_URL")
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())?;

        let sheet = vars
            .get("SCORECARD_SHEET")
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_SHEET);

        Some(Self {
            database_url: database_url.to_string(),
            sheet: sheet.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_database_url_means_local_only() {
        assert_eq!(StoreConfig::from_vars(&vars(&[])), None);
        assert_eq!(StoreConfig::from_vars(&vars(&[("DATABASE_URL", "  ")])), None);
    }

    #[test]
    fn sheet_defaults_when_unset() {
        let config =
            StoreConfig::from_vars(&vars(&[("DATABASE_URL", "postgres://localhost/camp")])).unwrap();
        assert_eq!(config.database_url, "postgres://localhost/camp");
        assert_eq!(config.sheet, DEFAULT_SHEET);
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn sheet_can_be_overridden() {
        let config = StoreConfig::from_vars(&vars(&[
            ("DATABASE_URL", "postgres://localhost/camp"),
            ("SCORECARD_SHEET", "juniors"),
        ]))
        .unwrap();
        assert_eq!(config.sheet, "juniors");
    }
}

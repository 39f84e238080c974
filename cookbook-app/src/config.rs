use cookbook_errors::AppError;
use std::env;

const DEFAULT_UPLOAD_PRESET: &str = "expoapp";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub firebase_api_key: String,
    pub cloudinary_cloud_name: String,
    pub cloudinary_upload_preset: String,
    pub bind_addr: String,
    pub secure_cookies: bool,
}

impl AppConfig {
    /// Reads the process environment, loading `.env` first when present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::Internal(format!("{key} must be set")))
        };

        let secure_cookies = match lookup("SESSION_SECURE_COOKIE") {
            Some(value) => parse_flag(&value).ok_or_else(|| {
                AppError::Internal(format!("SESSION_SECURE_COOKIE has invalid value {value:?}"))
            })?,
            None => true,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            firebase_api_key: required("FIREBASE_API_KEY")?,
            cloudinary_cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
            cloudinary_upload_preset: lookup("CLOUDINARY_UPLOAD_PRESET")
                .unwrap_or_else(|| DEFAULT_UPLOAD_PRESET.to_string()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            secure_cookies,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DATABASE_URL", "sqlite::memory:"),
        ("FIREBASE_API_KEY", "key"),
        ("CLOUDINARY_CLOUD_NAME", "cloud"),
    ];

    #[test]
    fn test_defaults() {
        let loaded = config(&REQUIRED).unwrap();
        assert_eq!(loaded.cloudinary_upload_preset, "expoapp");
        assert_eq!(loaded.bind_addr, "127.0.0.1:3000");
        assert!(loaded.secure_cookies);
    }

    #[test]
    fn test_missing_required_key() {
        let err = config(&REQUIRED[..2]).unwrap_err();
        assert_eq!(
            err,
            AppError::Internal("CLOUDINARY_CLOUD_NAME must be set".to_string())
        );
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("SESSION_SECURE_COOKIE", "false"));
        vars.push(("BIND_ADDR", "0.0.0.0:8080"));
        let loaded = config(&vars).unwrap();
        assert!(!loaded.secure_cookies);
        assert_eq!(loaded.bind_addr, "0.0.0.0:8080");

        vars.push(("SESSION_SECURE_COOKIE", "maybe"));
        assert!(config(&vars).is_err());
    }
}

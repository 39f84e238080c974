use cookbook_errors::AppError;
use std::sync::OnceLock;

const MAX_URL_LENGTH: usize = 2048;
const MAX_NAME_LENGTH: usize = 80;
const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_PASSWORD_LENGTH: usize = 128;

const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

fn email_regex() -> &'static regex_lite::Regex {
    static EMAIL: OnceLock<regex_lite::Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        regex_lite::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
    })
}

pub struct InputSanitizer;

impl InputSanitizer {
    pub fn validate_image_url(url: &str) -> Result<String, AppError> {
        let url = url.trim();

        if url.is_empty() {
            return Err(AppError::validation("Image URL can't be empty"));
        }

        if url.len() > MAX_URL_LENGTH {
            return Err(AppError::validation("Image URL is too long"));
        }

        let parsed =
            url::Url::parse(url).map_err(|_| AppError::validation("Image URL is not valid"))?;

        let scheme = parsed.scheme().to_lowercase();
        if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
            tracing::warn!("Rejected image URL with scheme {}", scheme);
            return Err(AppError::validation("Image URL must use http or https"));
        }

        if parsed.host_str().is_none() {
            return Err(AppError::validation("Image URL must have a host"));
        }

        Ok(parsed.to_string())
    }

    /// Splits multi-line form input into entries, dropping blank lines.
    pub fn split_lines(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_control() || *c == '\t')
                    .collect()
            })
            .collect()
    }

    pub fn validate_email(email: &str) -> Result<String, AppError> {
        let email = email.trim().to_lowercase();
        if !email_regex().is_match(&email) {
            return Err(AppError::validation("Please enter a valid email"));
        }
        Ok(email)
    }

    pub fn validate_password(password: &str) -> Result<(), AppError> {
        let len = password.chars().count();
        if len < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password should be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        if len > MAX_PASSWORD_LENGTH {
            return Err(AppError::validation("Password is too long"));
        }
        Ok(())
    }

    pub fn validate_name(name: &str) -> Result<String, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Please enter your name"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(AppError::validation("Name is too long"));
        }
        Ok(name.to_string())
    }
}

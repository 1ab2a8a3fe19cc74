use std::path::{Path, PathBuf};

const TOKEN_ENV: &str = "PDNS_API_TOKEN";

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Cannot determine home directory")]
    NoHome,
    #[error("PowerDNS API key not found: set PDNS_API_TOKEN or write it to one of {paths:?}")]
    NotFound { paths: Vec<PathBuf> },
}

pub fn find_token() -> Result<String, AuthError> {
    if let Some(token) = non_empty(std::env::var(TOKEN_ENV).ok()) {
        return Ok(token);
    }
    let home = dirs::home_dir().ok_or(AuthError::NoHome)?;
    find_token_in(&home)
}

// Testable inner function — accepts home dir as parameter
pub fn find_token_in(home: &Path) -> Result<String, AuthError> {
    let candidates = [
        home.join(".pdns-api-token"),
        home.join(".config/powerdns/api-token"),
    ];
    for path in &candidates {
        if let Ok(content) = std::fs::read_to_string(path) {
            if let Some(token) = non_empty(Some(content)) {
                tracing::debug!(path = %path.display(), "using API key file");
                return Ok(token);
            }
        }
    }
    Err(AuthError::NotFound { paths: candidates.to_vec() })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_token(dir: &Path, rel: &str, token: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, token).unwrap();
    }

    #[test]
    fn finds_token_at_home_path() {
        let tmp = TempDir::new().unwrap();
        write_token(tmp.path(), ".pdns-api-token", "secret");
        assert_eq!(find_token_in(tmp.path()).unwrap(), "secret");
    }

    #[test]
    fn finds_token_at_config_path() {
        let tmp = TempDir::new().unwrap();
        write_token(tmp.path(), ".config/powerdns/api-token", "token-config");
        assert_eq!(find_token_in(tmp.path()).unwrap(), "token-config");
    }

    #[test]
    fn prefers_home_over_config() {
        let tmp = TempDir::new().unwrap();
        write_token(tmp.path(), ".pdns-api-token", "token-home");
        write_token(tmp.path(), ".config/powerdns/api-token", "token-config");
        assert_eq!(find_token_in(tmp.path()).unwrap(), "token-home");
    }

    #[test]
    fn skips_blank_token_file() {
        let tmp = TempDir::new().unwrap();
        write_token(tmp.path(), ".pdns-api-token", "  \n");
        write_token(tmp.path(), ".config/powerdns/api-token", "token-config");
        assert_eq!(find_token_in(tmp.path()).unwrap(), "token-config");
    }

    #[test]
    fn trims_whitespace() {
        let tmp = TempDir::new().unwrap();
        write_token(tmp.path(), ".pdns-api-token", "  token-xyz\n");
        assert_eq!(find_token_in(tmp.path()).unwrap(), "token-xyz");
    }

    #[test]
    fn returns_error_when_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = find_token_in(tmp.path());
        assert!(matches!(result, Err(AuthError::NotFound { ref paths }) if paths.len() == 2));
    }
}

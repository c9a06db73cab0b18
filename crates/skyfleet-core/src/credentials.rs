//! Credentials loading
//!
//! Environments are named `key=value` files in a credentials directory,
//! listed in an `environments` index file. All five keys are required;
//! anything missing aborts with the credentials failure code.

use crate::codes::fleet;
use crate::error::{Abort, Result};
use std::collections::HashMap;
use std::path::Path;

/// Connection credentials for one control-plane environment.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub host: String,
    pub user: String,
    pub password: String,
    pub project: String,
    pub domain: String,
}

/// Environments the credentials directory supports.
pub fn known_environments(dir: &Path) -> Result<Vec<String>> {
    let index = dir.join("environments");
    let content = std::fs::read_to_string(&index).map_err(|e| {
        Abort::new(
            fleet::FAILED_CREDENTIALS,
            format!("failed to read {}: {e}", index.display()),
        )
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

impl Credentials {
    /// Load the credentials file for one named environment.
    pub fn load(dir: &Path, environment: &str) -> Result<Self> {
        let known = known_environments(dir)?;
        if !known.iter().any(|e| e == environment) {
            return Err(Abort::new(
                fleet::FAILED_CREDENTIALS,
                format!("{environment} is not a supported environment"),
            ));
        }

        let path = dir.join(environment);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Abort::new(
                fleet::FAILED_CREDENTIALS,
                format!("failed to read {}: {e}", path.display()),
            )
        })?;

        let entries: HashMap<&str, &str> = content
            .lines()
            .filter_map(|line| line.trim().split_once('='))
            .map(|(k, v)| (k.trim(), v.trim()))
            .collect();

        let required = |key: &str| -> Result<String> {
            entries.get(key).map(|v| v.to_string()).ok_or_else(|| {
                Abort::new(
                    fleet::FAILED_CREDENTIALS,
                    format!("missing {key} in credentials file {}", path.display()),
                )
            })
        };

        Ok(Self {
            host: required("host")?,
            user: required("user")?,
            password: required("password")?,
            project: required("project")?,
            domain: required("domain")?,
        })
    }

    /// Assemble credentials from explicit parts (flag overrides), without
    /// touching the credentials directory.
    pub fn from_parts(
        host: Option<String>,
        user: Option<String>,
        password: Option<String>,
        project: Option<String>,
        domain: Option<String>,
    ) -> Result<Self> {
        let required = |name: &str, value: Option<String>| -> Result<String> {
            value.ok_or_else(|| {
                Abort::new(
                    fleet::FAILED_CLIENT_INIT,
                    format!("without an environment, --{name} is required"),
                )
            })
        };

        Ok(Self {
            host: required("host", host)?,
            user: required("user", user)?,
            password: required("password", password)?,
            project: required("project", project)?,
            domain: domain.unwrap_or_else(|| "default".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_env(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join("environments"), format!("{name}\n")).unwrap();
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn loads_complete_credentials_file() {
        let dir = tempdir().unwrap();
        write_env(
            dir.path(),
            "sandbox",
            "host=https://keystone.example:5000/v3\nuser=ops\npassword=secret\nproject=fleet\ndomain=default\n",
        );

        let creds = Credentials::load(dir.path(), "sandbox").unwrap();
        assert_eq!(creds.user, "ops");
        assert_eq!(creds.project, "fleet");
    }

    #[test]
    fn missing_key_aborts_with_credentials_code() {
        let dir = tempdir().unwrap();
        write_env(dir.path(), "sandbox", "host=h\nuser=u\npassword=p\n");

        let err = Credentials::load(dir.path(), "sandbox").unwrap_err();
        assert_eq!(err.code, fleet::FAILED_CREDENTIALS);
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let dir = tempdir().unwrap();
        write_env(dir.path(), "sandbox", "host=h\n");

        let err = Credentials::load(dir.path(), "production").unwrap_err();
        assert_eq!(err.code, fleet::FAILED_CREDENTIALS);
    }

    #[test]
    fn explicit_parts_require_every_field() {
        let err = Credentials::from_parts(Some("h".into()), None, None, None, None).unwrap_err();
        assert_eq!(err.code, fleet::FAILED_CLIENT_INIT);

        let creds = Credentials::from_parts(
            Some("h".into()),
            Some("u".into()),
            Some("p".into()),
            Some("t".into()),
            None,
        )
        .unwrap();
        assert_eq!(creds.domain, "default");
    }
}

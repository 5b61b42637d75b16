//! CLI configuration: an optional JSON file merged with flags and environment.

use std::path::Path;

use anyhow::{anyhow, Context};
use serde::Deserialize;
use shelf_client::ShelfConfig;
use shelf_protocol::ShelfToken;
use shelf_transport::HttpTransportConfig;
use url::Url;

/// Contents of the `--config` file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<Url>,
    pub token: Option<String>,
    pub transport: HttpTransportConfig,
}

impl FileConfig {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Settings resolved from every source.
#[derive(Debug)]
pub struct Resolved {
    pub shelf: ShelfConfig,
    pub transport: HttpTransportConfig,
}

/// Merges flag values over the file. Flags win.
///
/// # Errors
///
/// Fails when no source supplies a non-empty token.
pub fn resolve(
    host: Option<Url>,
    token: Option<String>,
    file: FileConfig,
) -> anyhow::Result<Resolved> {
    let token = token
        .or(file.token)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            anyhow!("no Shelf token: pass --shelf-token, set SHELF_AUTH_TOKEN, or add `token` to the config file")
        })?;

    let mut shelf = ShelfConfig::new(ShelfToken::new(token));
    shelf.host = host.or(file.host);

    Ok(Resolved {
        shelf,
        transport: file.transport,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(value: &str) -> Url {
        Url::parse(value).unwrap()
    }

    #[test]
    fn test_file_values_apply_without_flags() {
        let file = FileConfig::from_json(
            r#"{"host":"https://shelf.example.com/","token":"FILETOKEN","transport":{"timeout_secs":5}}"#,
        )
        .unwrap();

        let resolved = resolve(None, None, file).unwrap();

        assert_eq!(resolved.shelf.token.expose(), "FILETOKEN");
        assert_eq!(resolved.shelf.host, Some(url("https://shelf.example.com/")));
        assert_eq!(resolved.transport.timeout_secs, Some(5));
    }

    #[test]
    fn test_flags_override_file() {
        let file = FileConfig::from_json(
            r#"{"host":"https://file.example.com/","token":"FILETOKEN"}"#,
        )
        .unwrap();

        let resolved = resolve(
            Some(url("https://flag.example.com/")),
            Some("FLAGTOKEN".into()),
            file,
        )
        .unwrap();

        assert_eq!(resolved.shelf.token.expose(), "FLAGTOKEN");
        assert_eq!(resolved.shelf.host, Some(url("https://flag.example.com/")));
        assert_eq!(resolved.transport, HttpTransportConfig::default());
    }

    #[test]
    fn test_missing_token_is_an_error() {
        assert!(resolve(None, None, FileConfig::default()).is_err());
        assert!(resolve(None, Some(String::new()), FileConfig::default()).is_err());
    }

    #[test]
    fn test_unknown_file_keys_are_rejected() {
        assert!(FileConfig::from_json(r#"{"hots":"https://typo/"}"#).is_err());
    }
}

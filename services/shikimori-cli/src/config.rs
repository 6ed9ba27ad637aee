//! Configuration types and loading
//!
//! Config precedence: CLI args > env vars > config file > defaults.
//! Tokens and the client secret are loaded from env vars or files, never
//! stored in the TOML directly to avoid leaking secrets.

use common::Secret;
use serde::Deserialize;
use shikimori_api::{Client, Credentials, ProxyConfig};
use shikimori_strategy::StrategyOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ACCESS_TOKEN_ENV: &str = "SHIKIMORI_ACCESS_TOKEN";
const REFRESH_TOKEN_ENV: &str = "SHIKIMORI_REFRESH_TOKEN";
const CLIENT_SECRET_ENV: &str = "SHIKIMORI_CLIENT_SECRET";
const PROXY_PASSWORD_ENV: &str = "SHIKIMORI_PROXY_PASSWORD";

/// Root configuration
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub proxy: Option<ProxySettings>,
}

/// Target site and client identity
#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_url")]
    pub url: String,
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Request timeout; unset means no timeout beyond the HTTP client's own.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: default_site_url(),
            app_name: default_app_name(),
            timeout_secs: None,
        }
    }
}

/// OAuth application and user tokens
#[derive(Debug, Default, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub redirect_uri: Option<String>,
    #[serde(default)]
    pub scope: Vec<String>,
    /// Path to a file holding the access token (alternative to SHIKIMORI_ACCESS_TOKEN)
    #[serde(default)]
    pub access_token_file: Option<PathBuf>,
    /// Path to a file holding the refresh token (alternative to SHIKIMORI_REFRESH_TOKEN)
    #[serde(default)]
    pub refresh_token_file: Option<PathBuf>,
    /// Path to a file holding the client secret (alternative to SHIKIMORI_CLIENT_SECRET)
    #[serde(default)]
    pub client_secret_file: Option<PathBuf>,
    #[serde(skip)]
    pub access_token: Option<Secret<String>>,
    #[serde(skip)]
    pub refresh_token: Option<Secret<String>>,
    #[serde(skip)]
    pub client_secret: Option<Secret<String>>,
}

/// Forward proxy for all API traffic
#[derive(Debug, Deserialize)]
pub struct ProxySettings {
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub user: Option<String>,
    /// Path to a file holding the proxy password (alternative to SHIKIMORI_PROXY_PASSWORD)
    #[serde(default)]
    pub password_file: Option<PathBuf>,
    #[serde(skip)]
    pub password: Option<Secret<String>>,
}

fn default_site_url() -> String {
    shikimori_api::DEFAULT_SITE_URL.to_owned()
}

fn default_app_name() -> String {
    shikimori_oauth2::DEFAULT_APP_NAME.to_owned()
}

impl Config {
    /// Load configuration from a TOML file, then overlay environment variables.
    ///
    /// Secret resolution order, per secret:
    /// 1. its env var
    /// 2. its `*_file` path from config
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;
        config.validate()?;

        config.auth.access_token =
            resolve_secret(ACCESS_TOKEN_ENV, config.auth.access_token_file.as_deref())?;
        config.auth.refresh_token =
            resolve_secret(REFRESH_TOKEN_ENV, config.auth.refresh_token_file.as_deref())?;
        config.auth.client_secret =
            resolve_secret(CLIENT_SECRET_ENV, config.auth.client_secret_file.as_deref())?;
        if let Some(proxy) = config.proxy.as_mut() {
            proxy.password = resolve_secret(PROXY_PASSWORD_ENV, proxy.password_file.as_deref())?;
        }

        Ok(config)
    }

    fn validate(&self) -> common::Result<()> {
        if !self.site.url.starts_with("http://") && !self.site.url.starts_with("https://") {
            return Err(common::Error::Config(format!(
                "site.url must start with http:// or https://, got: {}",
                self.site.url
            )));
        }

        if self.site.timeout_secs == Some(0) {
            return Err(common::Error::Config(
                "site.timeout_secs must be greater than 0".into(),
            ));
        }

        if let Some(proxy) = &self.proxy {
            if proxy.host.trim().is_empty() {
                return Err(common::Error::Config("proxy.host must not be empty".into()));
            }
            if proxy.port == Some(0) {
                return Err(common::Error::Config(
                    "proxy.port must be greater than 0".into(),
                ));
            }
        }

        Ok(())
    }

    /// Resolve config file path from CLI arg or CONFIG_PATH env var.
    pub fn resolve_path(cli_path: Option<&str>) -> PathBuf {
        if let Some(p) = cli_path {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var("CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("shikimori.toml")
    }

    /// API client for the configured site, credentials and proxy.
    pub fn api_client(&self) -> shikimori_api::Result<Client> {
        let mut builder = Client::builder()
            .site(&self.site.url)
            .credentials(Credentials {
                app_name: Some(self.site.app_name.clone()),
                access_token: self.auth.access_token.clone(),
                refresh_token: self.auth.refresh_token.clone(),
            });
        if let Some(secs) = self.site.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(proxy) = &self.proxy {
            builder = builder.proxy(ProxyConfig {
                host: proxy.host.clone(),
                port: proxy.port,
                user: proxy.user.clone(),
                password: proxy.password.clone(),
            });
        }
        builder.build()
    }

    /// Sign-in options, when a client id and secret are configured.
    pub fn strategy_options(&self) -> common::Result<StrategyOptions> {
        let client_id = self
            .auth
            .client_id
            .clone()
            .ok_or_else(|| common::Error::Config("auth.client_id is not set".into()))?;
        let client_secret = self.auth.client_secret.clone().ok_or_else(|| {
            common::Error::Config(format!(
                "client secret missing: set {CLIENT_SECRET_ENV} or auth.client_secret_file"
            ))
        })?;

        let mut options = StrategyOptions::new(client_id, client_secret)
            .site(&self.site.url)
            .app_name(&self.site.app_name)
            .scope(self.auth.scope.iter().cloned());
        if let Some(redirect_uri) = &self.auth.redirect_uri {
            options = options.redirect_uri(redirect_uri);
        }
        Ok(options)
    }
}

/// Env var wins; otherwise read and trim the file. Empty files yield `None`.
fn resolve_secret(env: &str, file: Option<&Path>) -> common::Result<Option<Secret<String>>> {
    if let Ok(value) = std::env::var(env) {
        return Ok(Some(Secret::new(value)));
    }
    let Some(file) = file else {
        return Ok(None);
    };
    let value = std::fs::read_to_string(file).map_err(|e| {
        common::Error::Config(format!("failed to read {}: {e}", file.display()))
    })?;
    let value = value.trim().to_owned();
    Ok((!value.is_empty()).then(|| Secret::new(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize tests that mutate environment variables, preventing
    /// data races when tests run in parallel.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// SAFETY: Callers must hold ENV_MUTEX to prevent concurrent env mutation.
    unsafe fn set_env(key: &str, val: &str) {
        unsafe { std::env::set_var(key, val) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    fn clear_secret_env() {
        for key in [
            ACCESS_TOKEN_ENV,
            REFRESH_TOKEN_ENV,
            CLIENT_SECRET_ENV,
            PROXY_PASSWORD_ENV,
        ] {
            unsafe { remove_env(key) };
        }
    }

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("shikimori.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn valid_toml() -> &'static str {
        r#"
[site]
url = "https://shikimori.one/"
app_name = "My App"

[auth]
client_id = "client-123"
scope = ["user_rates", "comments"]
"#
    }

    #[test]
    fn test_load_valid_config() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secret_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, valid_toml());

        let config = Config::load(&path).unwrap();
        assert_eq!(config.site.url, "https://shikimori.one/");
        assert_eq!(config.site.app_name, "My App");
        assert!(config.site.timeout_secs.is_none());
        assert_eq!(config.auth.client_id.as_deref(), Some("client-123"));
        assert_eq!(config.auth.scope, vec!["user_rates", "comments"]);
        assert!(config.auth.access_token.is_none());
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secret_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.site.url, "https://shikimori.one/");
        assert_eq!(config.site.app_name, "Api Test");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/path/shikimori.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "not valid {{{{ toml");
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_access_token_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secret_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, valid_toml());

        unsafe { set_env(ACCESS_TOKEN_ENV, "env-token") };
        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.auth.access_token.as_ref().unwrap().expose(),
            "env-token"
        );
        unsafe { remove_env(ACCESS_TOKEN_ENV) };
    }

    #[test]
    fn test_tokens_from_files() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secret_env();
        let dir = tempfile::tempdir().unwrap();
        let access = dir.path().join("access_token");
        let refresh = dir.path().join("refresh_token");
        std::fs::write(&access, "file-access\n").unwrap();
        std::fs::write(&refresh, "file-refresh").unwrap();

        let toml_content = format!(
            r#"
[auth]
access_token_file = "{}"
refresh_token_file = "{}"
"#,
            access.display(),
            refresh.display()
        );
        let path = write_config(&dir, &toml_content);

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.auth.access_token.as_ref().unwrap().expose(),
            "file-access"
        );
        assert_eq!(
            config.auth.refresh_token.as_ref().unwrap().expose(),
            "file-refresh"
        );
    }

    #[test]
    fn test_env_overrides_nonexistent_file() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secret_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
[auth]
access_token_file = "/nonexistent/path/access_token"
"#,
        );

        unsafe { set_env(ACCESS_TOKEN_ENV, "env-wins") };
        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.auth.access_token.as_ref().unwrap().expose(),
            "env-wins",
            "env var must take precedence over nonexistent token file"
        );
        unsafe { remove_env(ACCESS_TOKEN_ENV) };
    }

    #[test]
    fn test_nonexistent_token_file_returns_error() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secret_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
[auth]
access_token_file = "/nonexistent/path/access_token"
"#,
        );

        assert!(
            Config::load(&path).is_err(),
            "nonexistent access_token_file must return an error"
        );
    }

    #[test]
    fn test_whitespace_token_file_yields_none() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secret_env();
        let dir = tempfile::tempdir().unwrap();
        let token = dir.path().join("access_token");
        std::fs::write(&token, "  \n  ").unwrap();
        let path = write_config(
            &dir,
            &format!("[auth]\naccess_token_file = \"{}\"\n", token.display()),
        );

        let config = Config::load(&path).unwrap();
        assert!(config.auth.access_token.is_none());
    }

    #[test]
    fn test_invalid_site_url_rejected() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secret_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[site]\nurl = \"shikimori.one\"\n");

        let err = Config::load(&path).unwrap_err().to_string();
        assert!(
            err.contains("site.url must start with http"),
            "error message should explain the issue, got: {err}"
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secret_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[site]\ntimeout_secs = 0\n");
        assert!(Config::load(&path).is_err(), "timeout_secs = 0 must be rejected");
    }

    #[test]
    fn test_proxy_settings() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secret_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
[proxy]
host = "proxy.example"
port = 3128
user = "squid"
"#,
        );

        unsafe { set_env(PROXY_PASSWORD_ENV, "hunter2") };
        let config = Config::load(&path).unwrap();
        let proxy = config.proxy.as_ref().unwrap();
        assert_eq!(proxy.host, "proxy.example");
        assert_eq!(proxy.port, Some(3128));
        assert_eq!(proxy.password.as_ref().unwrap().expose(), "hunter2");
        assert!(config.api_client().is_ok());
        unsafe { remove_env(PROXY_PASSWORD_ENV) };
    }

    #[test]
    fn test_zero_proxy_port_rejected() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secret_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[proxy]\nhost = \"proxy.example\"\nport = 0\n");
        assert!(Config::load(&path).is_err(), "proxy.port = 0 must be rejected");
    }

    #[test]
    fn test_strategy_options_need_client_secret() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secret_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, valid_toml());

        let config = Config::load(&path).unwrap();
        let err = config.strategy_options().unwrap_err().to_string();
        assert!(err.contains(CLIENT_SECRET_ENV), "got: {err}");

        unsafe { set_env(CLIENT_SECRET_ENV, "s3cret") };
        let config = Config::load(&path).unwrap();
        let options = config.strategy_options().unwrap();
        assert_eq!(options.client_id, "client-123");
        assert_eq!(options.app_name, "My App");
        assert_eq!(options.joined_scope().as_deref(), Some("user_rates+comments"));
        unsafe { remove_env(CLIENT_SECRET_ENV) };
    }

    #[test]
    fn test_api_client_uses_site() {
        let config = Config {
            site: SiteConfig {
                url: "https://shikimori.fake/".into(),
                ..SiteConfig::default()
            },
            ..Config::default()
        };
        let client = config.api_client().unwrap();
        assert_eq!(
            client.v2().base_url().as_str(),
            "https://shikimori.fake/api/v2/"
        );
    }

    #[test]
    fn test_resolve_path_cli_arg() {
        let path = Config::resolve_path(Some("/custom/path.toml"));
        assert_eq!(path, PathBuf::from("/custom/path.toml"));
    }

    #[test]
    fn test_resolve_path_env_var() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_env("CONFIG_PATH", "/env/path.toml") };
        let path = Config::resolve_path(None);
        assert_eq!(path, PathBuf::from("/env/path.toml"));
        unsafe { remove_env("CONFIG_PATH") };
    }

    #[test]
    fn test_resolve_path_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { remove_env("CONFIG_PATH") };
        let path = Config::resolve_path(None);
        assert_eq!(path, PathBuf::from("shikimori.toml"));
    }

    #[test]
    fn test_resolve_path_cli_overrides_env() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_env("CONFIG_PATH", "/env/should-lose.toml") };
        let path = Config::resolve_path(Some("/cli/wins.toml"));
        assert_eq!(
            path,
            PathBuf::from("/cli/wins.toml"),
            "CLI arg must take precedence over CONFIG_PATH env var"
        );
        unsafe { remove_env("CONFIG_PATH") };
    }
}

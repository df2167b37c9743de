use anyhow::{anyhow, Context, Result};
use soil_analysis::gemini_service::{DEFAULT_API_BASE, DEFAULT_MODEL};
use soil_analysis::GeminiConfig;
use std::env;
use std::num::NonZeroUsize;
use std::str::FromStr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// How handled analysis failures map onto HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Domain failures are reported with 200 and an error body.
    #[default]
    Compat,
    /// Domain failures get 422 (unusable PDF) or 502 (model failure).
    Strict,
}

impl FromStr for StatusPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compat" => Ok(Self::Compat),
            "strict" => Ok(Self::Strict),
            other => Err(anyhow!(
                "unknown status policy '{}', expected 'compat' or 'strict'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub max_report_tokens: Option<NonZeroUsize>,
    pub status_policy: StatusPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get("GEMINI_API_KEY")
            .ok_or_else(|| anyhow!("GEMINI_API_KEY environment variable not set"))?;

        let gemini = GeminiConfig {
            api_key,
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: get("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        };

        Ok(Self {
            gemini,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse(get("PORT"), "PORT")?.unwrap_or(DEFAULT_PORT),
            max_upload_bytes: parse(get("MAX_UPLOAD_BYTES"), "MAX_UPLOAD_BYTES")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            max_report_tokens: parse(get("MAX_REPORT_TOKENS"), "MAX_REPORT_TOKENS")?,
            status_policy: parse(get("STATUS_POLICY"), "STATUS_POLICY")?.unwrap_or_default(),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T>(value: Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| anyhow!("{}", e))
                .with_context(|| format!("invalid value for {}: '{}'", key, raw))
        })
        .transpose()
}

use serde::Deserialize;

/// Which extraction adapter the capture flow uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAi,
    Mock,
}

impl std::str::FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAi),
            "mock" | "regex" => Ok(LlmProvider::Mock),
            other => anyhow::bail!("LLM_PROVIDER must be 'openai' or 'mock', got '{}'", other),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub llm_provider: LlmProvider,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub llm_timeout_secs: u64,
    pub qualification_model_id: String,
    pub review_threshold: u32,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            llm_provider: LlmProvider::Mock,
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            llm_timeout_secs: 30,
            qualification_model_id: "amazon.nova-lite-v1:0".to_string(),
            review_threshold: crate::decision::DEFAULT_REVIEW_THRESHOLD,
            rate_limit_per_second: 10,
            rate_limit_burst: 20,
        }
    }
}

fn positive<T>(name: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match raw {
        None => Ok(default),
        Some(value) => {
            let parsed: T = value
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("{} must be a positive integer", name))?;
            if parsed <= T::default() {
                anyhow::bail!("{} must be a positive integer", name);
            }
            Ok(parsed)
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            port: var("PORT")
                .unwrap_or_else(|| defaults.port.to_string())
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            llm_provider: match var("LLM_PROVIDER") {
                Some(raw) => raw.parse()?,
                None => defaults.llm_provider,
            },
            openai_api_key: var("OPENAI_API_KEY"),
            openai_base_url: var("OPENAI_BASE_URL")
                .map(|raw| {
                    let parsed = url::Url::parse(raw.trim()).map_err(|e| {
                        anyhow::anyhow!("OPENAI_BASE_URL is not a valid URL: {}", e)
                    })?;
                    if parsed.scheme() != "http" && parsed.scheme() != "https" {
                        anyhow::bail!("OPENAI_BASE_URL must start with http:// or https://");
                    }
                    Ok(raw.trim().to_string())
                })
                .transpose()?
                .unwrap_or(defaults.openai_base_url),
            openai_model: var("OPENAI_MODEL")
                .map(|m| m.trim().to_string())
                .unwrap_or(defaults.openai_model),
            llm_timeout_secs: positive(
                "LLM_TIMEOUT_SECS",
                var("LLM_TIMEOUT_SECS"),
                defaults.llm_timeout_secs,
            )?,
            qualification_model_id: var("QUALIFICATION_MODEL_ID")
                .map(|m| m.trim().to_string())
                .unwrap_or(defaults.qualification_model_id),
            review_threshold: var("REVIEW_THRESHOLD")
                .map(|raw| {
                    raw.trim()
                        .parse()
                        .map_err(|_| anyhow::anyhow!("REVIEW_THRESHOLD must be a number"))
                })
                .transpose()?
                .unwrap_or(defaults.review_threshold),
            rate_limit_per_second: positive(
                "RATE_LIMIT_PER_SECOND",
                var("RATE_LIMIT_PER_SECOND"),
                defaults.rate_limit_per_second,
            )?,
            rate_limit_burst: positive(
                "RATE_LIMIT_BURST",
                var("RATE_LIMIT_BURST"),
                defaults.rate_limit_burst,
            )?,
        };

        if config.port == 0 {
            anyhow::bail!("PORT must be a valid number between 1-65535");
        }

        // Never log the API key itself.
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("LLM provider: {:?}", config.llm_provider);
        tracing::debug!("Model base URL: {}", config.openai_base_url);
        tracing::debug!("Model: {}", config.openai_model);
        tracing::debug!(
            "Model API key configured: {}",
            config.openai_api_key.is_some()
        );
        tracing::debug!("Server Port: {}", config.port);

        if config.llm_provider == LlmProvider::OpenAi && config.openai_api_key.is_none() {
            tracing::warn!("LLM_PROVIDER=openai but OPENAI_API_KEY is not set; captures will fail");
        }

        Ok(config)
    }
}

/// Configures timeout, retry, TLS and logging behavior of a [`RestClient`].
///
/// [`RestClient`]: crate::RestClient
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds. `0` disables the timeout.
    pub timeout_ms: u64,
    /// Total number of attempts, including the first one. Values below 1
    /// are treated as 1.
    pub retry_max_attempts: usize,
    /// Fixed delay between attempts in milliseconds.
    pub retry_delay_ms: u64,
    /// Whether server TLS certificates are validated.
    pub verify_tls: bool,
    /// Whether request/response pairs are logged through `tracing`.
    pub log_enabled: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 0,
            retry_max_attempts: 1,
            retry_delay_ms: 2_000,
            verify_tls: true,
            log_enabled: false,
        }
    }
}

impl ClientOptions {
    /// Reads options from environment variables, falling back to defaults
    /// for unset ones.
    ///
    /// Reads:
    /// - `REST_JSON_TIMEOUT_MS`
    /// - `REST_JSON_RETRY_MAX_ATTEMPTS`
    /// - `REST_JSON_RETRY_DELAY_MS`
    /// - `REST_JSON_VERIFY_TLS` (`true`/`false`/`1`/`0`)
    /// - `REST_JSON_LOG_ENABLED` (`true`/`false`/`1`/`0`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rest_json::ClientOptions;
    ///
    /// let options = ClientOptions::from_env().expect("invalid REST_JSON_* env vars");
    /// ```
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let defaults = Self::default();
        Ok(Self {
            timeout_ms: parse_var(&lookup, "REST_JSON_TIMEOUT_MS", parse_number)?
                .unwrap_or(defaults.timeout_ms),
            retry_max_attempts: parse_var(&lookup, "REST_JSON_RETRY_MAX_ATTEMPTS", parse_number)?
                .unwrap_or(defaults.retry_max_attempts),
            retry_delay_ms: parse_var(&lookup, "REST_JSON_RETRY_DELAY_MS", parse_number)?
                .unwrap_or(defaults.retry_delay_ms),
            verify_tls: parse_var(&lookup, "REST_JSON_VERIFY_TLS", parse_flag)?
                .unwrap_or(defaults.verify_tls),
            log_enabled: parse_var(&lookup, "REST_JSON_LOG_ENABLED", parse_flag)?
                .unwrap_or(defaults.log_enabled),
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, String> {
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse(trimmed)
        .map(Some)
        .ok_or_else(|| format!("{name} has an invalid value: {raw}"))
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Option<T> {
    value.parse().ok()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

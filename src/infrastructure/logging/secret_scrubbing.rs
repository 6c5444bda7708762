use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

static BEARER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Bearer\s+[a-zA-Z0-9\-_\.]+").expect("bearer pattern is valid")
});

static SECRET_FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"["']?(api_key|apikey|app_secret|secret|tenant_access_token|access_token|token)["']?\s*([:=])\s*["']?[a-zA-Z0-9\-_\.]{8,}["']?"#,
    )
    .expect("secret field pattern is valid")
});

static PASSWORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']?password["']?\s*[:=]\s*["']?[^"'\s,}]+["']?"#)
        .expect("password pattern is valid")
});

/// Redacts credentials from text before it is logged or displayed
#[derive(Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    /// Create a new scrubber
    pub const fn new() -> Self {
        Self
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = BEARER_PATTERN.replace_all(message, "Bearer [TOKEN_REDACTED]");
        let scrubbed = SECRET_FIELD_PATTERN.replace_all(&scrubbed, |caps: &Captures| {
            format!("{}{}[REDACTED]", &caps[1], &caps[2])
        });
        PASSWORD_PATTERN
            .replace_all(&scrubbed, "password=[REDACTED]")
            .into_owned()
    }

    /// Mask a configured secret for display
    pub fn mask(value: Option<&str>) -> Option<String> {
        value.map(|v| {
            if v.trim().is_empty() {
                String::new()
            } else {
                "[REDACTED]".to_string()
            }
        })
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}

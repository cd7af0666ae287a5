use ns_core::{Error, Result};

use crate::config::CredentialPolicy;

/// Resolve the feed credential from the process environment.
pub fn resolve_credential(
    explicit: Option<&str>,
    policy: CredentialPolicy,
    env_name: &str,
) -> Result<String> {
    resolve_with(explicit, policy, env_name, |name| std::env::var(name).ok())
}

/// Resolve the feed credential, looking environment values up through `lookup`.
///
/// Blank values count as absent.
pub fn resolve_with<F>(
    explicit: Option<&str>,
    policy: CredentialPolicy,
    env_name: &str,
    lookup: F,
) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let explicit = match policy {
        CredentialPolicy::ExplicitOrEnv => explicit.map(str::trim).filter(|k| !k.is_empty()),
        CredentialPolicy::EnvOnly => None,
    };
    if let Some(key) = explicit {
        return Ok(key.to_string());
    }

    lookup(env_name)
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            Error::Authentication(format!(
                "no API key supplied and {} is not set in the environment",
                env_name
            ))
        })
}

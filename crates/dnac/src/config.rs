//! CLI configuration: a thin wrapper around `dnac_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--host, --username, --insecure, etc.).

use std::io::IsTerminal;
use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;

use dnac_api::{Credentials, TransportConfig};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use dnac_config::{
    Config, ConnectionSettings, Profile, config_path, controller_url, load_config_or_default,
    save_config, store_password, tls_mode,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated, sorted profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().map(String::as_str).collect();
    names.sort_unstable();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

/// The `[defaults] output` format, `table` when unset or unrecognized.
pub fn default_output(config: &Config) -> OutputFormat {
    OutputFormat::from_str(&config.defaults.output, true).unwrap_or_else(|_| {
        tracing::warn!(output = %config.defaults.output, "unknown defaults.output, using table");
        OutputFormat::Table
    })
}

/// Build `ConnectionSettings` from the config file, active profile, and CLI
/// overrides. Flags win over profile values.
pub fn resolve_settings(global: &GlobalOpts) -> Result<ConnectionSettings, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        // Naming a profile that doesn't exist is an error; the implicit
        // default is allowed to be missing when --host is given.
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => Profile::default(),
    };

    let profile = apply_overrides(profile, global);
    if profile.host.trim().is_empty() {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    }

    let base_url = controller_url(&profile.host, profile.port)?;
    let credentials = resolve_credentials(&profile, &profile_name)?;
    let timeout = profile.timeout.unwrap_or(cfg.defaults.timeout);
    let transport = TransportConfig::default()
        .with_tls(tls_mode(&profile, &cfg.defaults))
        .with_timeout(Duration::from_secs(timeout));

    Ok(ConnectionSettings {
        base_url,
        credentials,
        transport,
    })
}

/// Layer CLI flags (and their `DNAC_*` env vars) over a profile.
fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(port) = global.port {
        profile.port = port;
    }
    if global.username.is_some() {
        profile.username.clone_from(&global.username);
    }
    if global.ca_cert.is_some() {
        profile.ca_cert.clone_from(&global.ca_cert);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
    profile
}

/// Resolve credentials, falling back to an interactive password prompt when
/// nothing is configured and stdin is a TTY.
fn resolve_credentials(profile: &Profile, profile_name: &str) -> Result<Credentials, CliError> {
    let username = dnac_config::resolve_username(profile, profile_name)?;

    let password = match dnac_config::resolve_password(profile, profile_name) {
        Ok(pw) => pw,
        Err(dnac_config::ConfigError::NoCredentials { .. }) if std::io::stdin().is_terminal() => {
            let pw = rpassword::prompt_password(format!("Password for {username}: "))?;
            SecretString::from(pw)
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Credentials { username, password })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_output(output: &str) -> Config {
        let mut cfg = Config::default();
        cfg.defaults.output = output.into();
        cfg
    }

    #[test]
    fn default_output_reads_config() {
        assert!(matches!(default_output(&with_output("json-compact")), OutputFormat::JsonCompact));
        assert!(matches!(default_output(&with_output("YAML")), OutputFormat::Yaml));
    }

    #[test]
    fn unknown_default_output_falls_back_to_table() {
        assert!(matches!(default_output(&with_output("xml")), OutputFormat::Table));
        assert!(matches!(default_output(&Config::default()), OutputFormat::Table));
    }
}

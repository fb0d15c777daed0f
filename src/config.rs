//! CLI and environment configuration.
//!
//! Every flag has a `RUNWATCH_*` environment variable equivalent, so the
//! binary works equally well from a shell, a CI step or a `.env` file.

use clap::Parser;

/// Production origin used when the caller does not override it.
pub const DEFAULT_ORIGIN: &str = "https://app.runwatch.dev";

/// Inputs for one run.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Trigger a remote test-suite run and stream its events", long_about = None)]
pub struct Config {
    /// API key used to authenticate against the service
    #[arg(long, env = "RUNWATCH_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base origin of the service API
    #[arg(long, env = "RUNWATCH_ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Comma-separated suite identifiers to run (service default selection when omitted)
    #[arg(long, env = "RUNWATCH_SUITE_IDS", value_delimiter = ',')]
    pub suite_ids: Vec<String>,

    /// Ask the service to stop the run at the first failing test
    #[arg(long, env = "RUNWATCH_FAIL_FAST")]
    pub fail_fast: bool,

    /// How many times the trigger call may be retried on transient failures
    #[arg(long, env = "RUNWATCH_MAX_RETRIES", default_value_t = 0)]
    pub max_retries: u32,

    /// Optional deadline for the streaming phase, in seconds (no deadline when omitted)
    #[arg(long, env = "RUNWATCH_DEADLINE_SECS")]
    pub deadline_secs: Option<u64>,
}

impl Config {
    /// Suite ids with surrounding whitespace stripped and empty entries
    /// dropped, in caller order. `None` when nothing usable was supplied,
    /// which asks the service for its default selection.
    pub fn selected_suites(&self) -> Option<Vec<String>> {
        let ids: Vec<String> = self
            .suite_ids
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        if ids.is_empty() { None } else { Some(ids) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        unsafe {
            env::remove_var("RUNWATCH_API_KEY");
            env::remove_var("RUNWATCH_ORIGIN");
            env::remove_var("RUNWATCH_SUITE_IDS");
            env::remove_var("RUNWATCH_FAIL_FAST");
            env::remove_var("RUNWATCH_MAX_RETRIES");
            env::remove_var("RUNWATCH_DEADLINE_SECS");
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_when_only_the_key_is_given() {
        clear_env();
        let config = Config::try_parse_from(["runwatch", "--api-key", "k"]).unwrap();
        assert_eq!(config.origin, DEFAULT_ORIGIN);
        assert!(config.suite_ids.is_empty());
        assert!(!config.fail_fast);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.deadline_secs, None);
    }

    #[test]
    #[serial]
    fn api_key_is_required() {
        clear_env();
        assert!(Config::try_parse_from(["runwatch"]).is_err());
    }

    #[test]
    #[serial]
    fn suite_ids_split_on_commas_preserving_order() {
        clear_env();
        let config = Config::try_parse_from([
            "runwatch",
            "--api-key",
            "k",
            "--suite-ids",
            "s2, s1 ,,s2",
        ])
        .unwrap();
        assert_eq!(
            config.selected_suites().unwrap(),
            vec!["s2".to_string(), "s1".to_string(), "s2".to_string()]
        );
    }

    #[test]
    #[serial]
    fn no_suites_means_no_filter() {
        clear_env();
        let config = Config::try_parse_from(["runwatch", "--api-key", "k"]).unwrap();
        assert_eq!(config.selected_suites(), None);
    }

    #[test]
    #[serial]
    fn environment_variables_feed_every_flag() {
        clear_env();
        unsafe {
            env::set_var("RUNWATCH_API_KEY", "secret");
            env::set_var("RUNWATCH_ORIGIN", "https://staging.example.test");
            env::set_var("RUNWATCH_SUITE_IDS", "a,b");
            env::set_var("RUNWATCH_MAX_RETRIES", "4");
            env::set_var("RUNWATCH_DEADLINE_SECS", "90");
        }
        let config = Config::try_parse_from(["runwatch"]).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.origin, "https://staging.example.test");
        assert_eq!(config.selected_suites().unwrap(), vec!["a", "b"]);
        assert_eq!(config.max_retries, 4);
        assert_eq!(config.deadline_secs, Some(90));
        clear_env();
    }
}

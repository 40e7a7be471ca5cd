//! Engine configuration loaded from environment variables.

use encuesta_core::DuplicateVotePolicy;

/// Tunables for the engine's write path.
///
/// All fields have defaults suitable for local development; override via
/// environment variables.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// What `cast_vote` does when the voter already voted
    /// (default: `allow`, matching the advisory-only participation guard).
    pub duplicate_vote_policy: DuplicateVotePolicy,
    /// How many times a transiently-conflicting stats write is retried
    /// before surfacing `TransientWrite` (default: `3`).
    pub stats_write_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            duplicate_vote_policy: DuplicateVotePolicy::default(),
            stats_write_retries: 3,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default  |
    /// |-------------------------|----------|
    /// | `DUPLICATE_VOTE_POLICY` | `allow`  |
    /// | `STATS_WRITE_RETRIES`   | `3`      |
    pub fn from_env() -> Self {
        // Load .env if present (development convenience).
        dotenvy::dotenv().ok();

        let duplicate_vote_policy = std::env::var("DUPLICATE_VOTE_POLICY")
            .unwrap_or_else(|_| "allow".into())
            .parse()
            .expect("DUPLICATE_VOTE_POLICY must be allow, reject_per_survey or reject_per_question");

        let stats_write_retries: u32 = std::env::var("STATS_WRITE_RETRIES")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("STATS_WRITE_RETRIES must be a valid u32");

        Self {
            duplicate_vote_policy,
            stats_write_retries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test covers defaults and overrides so concurrent test threads
    // never race on the process environment.
    #[test]
    fn from_env_defaults_and_overrides() {
        std::env::remove_var("DUPLICATE_VOTE_POLICY");
        std::env::remove_var("STATS_WRITE_RETRIES");
        let config = EngineConfig::from_env();
        assert_eq!(config.duplicate_vote_policy, DuplicateVotePolicy::Allow);
        assert_eq!(config.stats_write_retries, 3);

        std::env::set_var("DUPLICATE_VOTE_POLICY", "reject_per_survey");
        std::env::set_var("STATS_WRITE_RETRIES", "5");
        let config = EngineConfig::from_env();
        assert_eq!(
            config.duplicate_vote_policy,
            DuplicateVotePolicy::RejectPerSurvey
        );
        assert_eq!(config.stats_write_retries, 5);

        std::env::remove_var("DUPLICATE_VOTE_POLICY");
        std::env::remove_var("STATS_WRITE_RETRIES");
    }
}

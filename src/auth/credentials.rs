use crate::config::Config;

/// Exact comparison against the configured pair. No hashing, no lockout.
pub fn authenticate(config: &Config, username: &str, password: &str) -> bool {
    username == config.login_username && password == config.login_password
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_config;

    #[test]
    fn matches_only_the_configured_pair() {
        let config = test_config("/tmp/unused");

        assert!(authenticate(&config, "admin", "secret"));
        assert!(!authenticate(&config, "admin", "Secret"));
        assert!(!authenticate(&config, "Admin", "secret"));
        assert!(!authenticate(&config, "admin ", "secret"));
        assert!(!authenticate(&config, "", ""));
    }
}

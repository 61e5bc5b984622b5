use figment::Jail;
use telos_config::TelosConfig;
use telos_core::enums::Purpose;

#[test]
fn env_var_overrides_default() {
    Jail::expect_with(|jail| {
        jail.set_env("TELOS_PIPELINE__MAX_REBALANCE_ATTEMPTS", "7");
        jail.set_env("TELOS_GENERAL__BATCH_THREADS", "2");

        let config = TelosConfig::load().expect("config loads");
        assert_eq!(config.pipeline.max_rebalance_attempts, 7);
        assert_eq!(config.general.batch_threads, 2);
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".telos")?;
        jail.create_file(
            ".telos/config.toml",
            r"
[pipeline]
secondary_threshold = 0.4
",
        )?;
        jail.set_env("TELOS_PIPELINE__SECONDARY_THRESHOLD", "0.1");

        let config = TelosConfig::load().expect("config loads");
        assert!((config.pipeline.secondary_threshold - 0.1).abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn env_var_sets_requested_purposes() {
    Jail::expect_with(|jail| {
        jail.set_env("TELOS_PIPELINE__REQUESTED_PURPOSES", "[causal, descriptive]");

        let config = TelosConfig::load().expect("config loads");
        assert_eq!(
            config.pipeline.requested_purposes.into_iter().collect::<Vec<_>>(),
            vec![Purpose::Descriptive, Purpose::Causal]
        );
        Ok(())
    });
}

#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("TELOS_PIPELINE__MAX_REBALANCE_ATTEMPT", "9");

        let config = TelosConfig::load().expect("config loads");
        assert_eq!(config.pipeline.max_rebalance_attempts, 3);
        Ok(())
    });
}

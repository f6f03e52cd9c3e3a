// File: config_tests.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

#[cfg(test)]
mod tests {
    use crate::config::RunConfig;
    use rstest::*;
    use std::num::NonZeroU32;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_run_config_default() {
        let config = RunConfig::default();

        assert_eq!(config.host(), "localhost");
        assert_eq!(config.port(), 80);
        assert_eq!(config.tls(), false);
        assert_eq!(config.insecure(), false);
        assert_eq!(config.stop_on_success(), false);
        assert!(config.record_path().is_none());
        assert!(config.report_path().is_none());
        assert!(config.timeout().is_none());
        assert!(config.max_continues().is_none());
        assert!(config.rate_limit().is_none());
    }

    #[test]
    fn test_run_config_new() {
        let config = RunConfig::new("10.0.0.5", 8443);

        assert_eq!(config.host(), "10.0.0.5");
        assert_eq!(config.port(), 8443);
        assert_eq!(config.target(), "10.0.0.5:8443");
    }

    #[test]
    fn test_set_flags() {
        let mut config = RunConfig::new("example.com", 443);

        config.set_tls(true);
        config.set_insecure(true);
        config.set_stop_on_success(true);
        assert_eq!(config.tls(), true);
        assert_eq!(config.insecure(), true);
        assert_eq!(config.stop_on_success(), true);

        config.set_tls(false);
        assert_eq!(config.tls(), false);
    }

    #[test]
    fn test_set_paths() {
        let mut config = RunConfig::default();

        config.set_record_path(Some(PathBuf::from("/tmp/record.txt")));
        config.set_report_path(Some(PathBuf::from("/tmp/report.json")));

        assert_eq!(
            config.record_path().map(|p| p.to_path_buf()),
            Some(PathBuf::from("/tmp/record.txt"))
        );
        assert_eq!(
            config.report_path().map(|p| p.to_path_buf()),
            Some(PathBuf::from("/tmp/report.json"))
        );

        config.set_record_path(None);
        assert!(config.record_path().is_none());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(1))]
    #[case(Some(25))]
    fn test_set_max_continues(#[case] limit: Option<usize>) {
        let mut config = RunConfig::default();
        config.set_max_continues(limit);
        assert_eq!(config.max_continues(), limit);
    }

    #[test]
    fn test_set_timeout_and_rate_limit() {
        let mut config = RunConfig::default();

        config.set_timeout(Some(Duration::from_secs(3)));
        config.set_rate_limit(NonZeroU32::new(5));

        assert_eq!(config.timeout(), Some(Duration::from_secs(3)));
        assert_eq!(config.rate_limit().map(|r| r.get()), Some(5));
    }
}

//! Property-based tests for log_bootstrap using proptest

use log_bootstrap::appenders::SharedBuffer;
use log_bootstrap::prelude::*;
use proptest::prelude::*;
use std::time::Duration;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), lower in any::<bool>()) {
        let text = if lower {
            level.to_str().to_lowercase()
        } else {
            level.to_str().to_string()
        };
        let parsed: LogLevel = text.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that LogLevel ordering matches discriminant order
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        prop_assert_eq!(level1 <= level2, (level1 as u8) <= (level2 as u8));
        prop_assert_eq!(level1 > level2, (level1 as u8) > (level2 as u8));
    }

    #[test]
    fn test_log_level_invalid_parse(invalid in "[0-9 ]{1,8}") {
        prop_assert!(invalid.parse::<LogLevel>().is_err());
    }
}

// ============================================================================
// Level filter Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A record is written exactly when its level reaches the logger's minimum
    #[test]
    fn test_level_filter(min in any_level(), level in any_level(), message in "[a-z ]{1,40}") {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .min_level(min)
            .appender(JsonAppender::with_writer(Box::new(buffer.clone())))
            .build();

        logger.log(level, message.clone());

        prop_assert_eq!(logger.enabled(level), level >= min);
        prop_assert_eq!(buffer.is_empty(), level < min);
    }

    /// Every written record is a single JSON line whatever the message holds
    #[test]
    fn test_json_record_is_one_line(message in ".*") {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .appender(JsonAppender::with_writer(Box::new(buffer.clone())))
            .build();

        logger.info(message);

        let contents = buffer.contents();
        prop_assert_eq!(contents.lines().count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(contents.trim_end()).unwrap();
        prop_assert_eq!(&parsed["level"], "INFO");
    }
}

// ============================================================================
// RotationPolicy Tests
// ============================================================================

proptest! {
    #[test]
    fn test_non_positive_limits_use_defaults(
        size in i64::MIN..=0,
        backups in i64::MIN..=0,
        age in i64::MIN..=0,
    ) {
        let policy = RotationPolicy::from_limits(size, backups, age);
        prop_assert_eq!(policy.max_bytes, 100 * 1024 * 1024);
        prop_assert_eq!(policy.max_backups, None);
        prop_assert_eq!(policy.max_age, None);
    }

    #[test]
    fn test_positive_limits_are_kept(
        size in 1i64..10_000,
        backups in 1i64..1_000,
        age in 1i64..3_650,
    ) {
        let policy = RotationPolicy::from_limits(size, backups, age);
        prop_assert_eq!(policy.max_bytes, size as u64 * 1024 * 1024);
        prop_assert_eq!(policy.max_backups, Some(backups as usize));
        prop_assert_eq!(policy.max_age, Some(Duration::from_secs(age as u64 * 86_400)));
    }
}

// ============================================================================
// LoggingConfig Tests
// ============================================================================

proptest! {
    #[test]
    fn test_config_json_roundtrip(
        console in any::<bool>(),
        verbose in any::<bool>(),
        json in any::<bool>(),
        directory in "[a-z/]{0,20}",
        max_size in any::<i64>(),
        max_backups in any::<i64>(),
    ) {
        let config = LoggingConfig {
            console_enabled: console,
            verbose,
            json_encoding: json,
            directory,
            max_size_mb: max_size,
            max_backups,
            ..Default::default()
        };

        let text = serde_json::to_string(&config).unwrap();
        let back: LoggingConfig = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(&back, &config);
        prop_assert_eq!(back.min_level() == LogLevel::Debug, verbose);
    }
}

//! Config file loading and overrides

use rxbind::algorithm::{ProviderConfig, RxProvider, SerialRxProvider, UidMode};
use rxbind::{ConfigError, RxConfig};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = RxConfig::load(&dir.path().join("absent.json")).unwrap();

    assert_eq!(config, RxConfig::default());
    assert_eq!(config.provider.rx_provider, RxProvider::Serial);
    assert_eq!(config.provider.serial_provider, SerialRxProvider::Crsf);
    assert_eq!(config.mode, UidMode::Auto);
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = RxConfig {
        provider: ProviderConfig::new(RxProvider::Spi, SerialRxProvider::Ghst),
        mode: UidMode::Hashed,
    };
    config.save(&path).unwrap();

    assert_eq!(RxConfig::load(&path).unwrap(), config);
}

#[test]
fn file_format_uses_snake_case_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "provider": { "rx_provider": "serial", "serial_provider": "jeti_ex_bus" },
            "mode": "numeric"
        }"#,
    )
    .unwrap();

    let config = RxConfig::load(&path).unwrap();
    assert_eq!(
        config.provider.serial_provider,
        SerialRxProvider::JetiExBus
    );
    assert_eq!(config.mode, UidMode::Numeric);
}

#[test]
fn partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "provider": { "rx_provider": "msp" } }"#).unwrap();

    let config = RxConfig::load(&path).unwrap();
    assert_eq!(config.provider.rx_provider, RxProvider::Msp);
    assert_eq!(config.provider.serial_provider, SerialRxProvider::Crsf);
    assert_eq!(config.mode, UidMode::Auto);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "mode": "sha256" }"#).unwrap();

    assert!(matches!(
        RxConfig::load(&path),
        Err(ConfigError::InvalidFormat(_))
    ));
}

#[test]
fn overrides_replace_only_given_fields() {
    let base = RxConfig::default();

    let config = base.with_overrides(None, Some(SerialRxProvider::Sbus), None);
    assert_eq!(config.provider.rx_provider, RxProvider::Serial);
    assert_eq!(config.provider.serial_provider, SerialRxProvider::Sbus);
    assert_eq!(config.mode, UidMode::Auto);

    let config = base.with_overrides(Some(RxProvider::Ppm), None, Some(UidMode::Numeric));
    assert_eq!(config.provider.rx_provider, RxProvider::Ppm);
    assert_eq!(config.mode, UidMode::Numeric);
}

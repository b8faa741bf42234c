use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_to_all_interfaces_on_3000() {
    let config = HostConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.bind_addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn reads_host_and_port() {
    let config = HostConfig::from_lookup(lookup(&[("HOST", "127.0.0.1"), ("PORT", " 8080 ")])).unwrap();
    assert_eq!(config.bind_addr().to_string(), "127.0.0.1:8080");
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let config = HostConfig::from_lookup(lookup(&[("HOST", " "), ("PORT", "")])).unwrap();
    assert_eq!(config.port, DEFAULT_PORT);
}

#[test]
fn invalid_port_is_an_error() {
    assert_eq!(
        HostConfig::from_lookup(lookup(&[("PORT", "eighty")])),
        Err(ConfigError::InvalidPort("eighty".to_owned()))
    );
    assert_eq!(
        HostConfig::from_lookup(lookup(&[("PORT", "70000")])),
        Err(ConfigError::InvalidPort("70000".to_owned()))
    );
}

#[test]
fn invalid_host_is_an_error() {
    assert_eq!(
        HostConfig::from_lookup(lookup(&[("HOST", "not-an-ip")])),
        Err(ConfigError::InvalidHost("not-an-ip".to_owned()))
    );
}

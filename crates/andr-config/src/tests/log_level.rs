use crate::LogLevel;

use log::LevelFilter;

#[derive(serde::Deserialize)]
struct Wrapper {
    level: LogLevel,
}

#[test]
fn given_known_level_when_parse_then_maps_to_filter() {
    let cases = [
        ("off", LevelFilter::Off),
        ("error", LevelFilter::Error),
        ("warn", LevelFilter::Warn),
        ("info", LevelFilter::Info),
        ("debug", LevelFilter::Debug),
        ("trace", LevelFilter::Trace),
        ("DEBUG", LevelFilter::Debug),
    ];

    for (input, expected) in cases {
        let level: LogLevel = input.parse().unwrap();
        assert_eq!(*level, expected, "input {input:?}");
    }
}

#[test]
fn given_unknown_level_when_parse_then_defaults_to_info() {
    let level: LogLevel = "chatty".parse().unwrap();
    assert_eq!(*level, LevelFilter::Info);
}

#[test]
fn given_non_string_level_in_toml_when_deserialize_then_defaults_to_info() {
    let wrapper: Wrapper = toml::from_str("level = 3").unwrap();
    assert_eq!(LevelFilter::from(wrapper.level), LevelFilter::Info);
}

#[test]
fn given_string_level_in_toml_when_deserialize_then_parses() {
    let wrapper: Wrapper = toml::from_str("level = \"warn\"").unwrap();
    assert_eq!(*wrapper.level, LevelFilter::Warn);
}

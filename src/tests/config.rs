use crate::{
    api::Endpoint,
    auction::BidPolicy,
    config::{Config, DEFAULT_API_BASE_URL},
    logging,
};
use anyhow::Result;
use pretty_assertions::assert_eq;

#[test]
fn defaults() -> Result<()> {
    let config = Config::from_json("{}")?;

    assert_eq!(config, Config::default());
    assert_eq!(config.bid_policy, BidPolicy::Strict);
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.log_level, "info");

    Ok(())
}

#[test]
fn overrides() -> Result<()> {
    let config = Config::from_json(
        r#"{ "bidPolicy": "lenient", "apiBaseUrl": "https://bidnet.test/api/", "logLevel": "debug" }"#,
    )?;

    assert_eq!(config.bid_policy, BidPolicy::Lenient);
    assert_eq!(
        config.endpoint_url(&Endpoint::Leaderboard),
        "https://bidnet.test/api/leaderboard"
    );
    assert_eq!(config.log_level, "debug");

    Ok(())
}

#[test]
fn rejects_bad_config() {
    assert!(Config::from_json(r#"{ "bidPolicy": "reckless" }"#).is_err());
    assert!(Config::from_json(r#"{ "unknown": 1 }"#).is_err());
    assert!(Config::from_json(r#"{ "apiBaseUrl": " " }"#).is_err());
    assert!(Config::from_json("not json").is_err());
}

#[test]
fn default_endpoint_urls() {
    assert_eq!(
        Config::default().endpoint_url(&Endpoint::SignIn),
        "http://localhost:3003/api/auth/sign-in"
    );
}

#[test]
fn logging_init() -> Result<()> {
    assert!(logging::init("verbose-ish").is_err());

    logging::init("debug")?;
    // second install is refused quietly
    assert!(!logging::init("debug")?);

    Ok(())
}

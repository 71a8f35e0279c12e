//! Integration tests for the subscription flow.
//!
//! Tests configuration loading through pricing to the payment hand-off.

use std::io::Write as _;

use festival_pricing::{
    CouponSelection, EventKey, PaymentSubmission, PricingConfig, PricingEngine, PricingError,
};
use rust_decimal::Decimal;
use serde_json::json;

fn key(name: &str) -> EventKey {
    EventKey::new(name).unwrap()
}

#[test]
fn test_full_subscription_flow() {
    let engine = PricingEngine::default();
    let (saptami, nabami) = (key("Saptami"), key("Nabami"));

    let mut selection = engine.new_selection();
    for event in [&saptami, &saptami, &nabami, &nabami] {
        selection = engine.increment_count(selection, event);
    }
    selection = engine.decrement_count(selection, &nabami);

    let totals = engine.compute_total(&selection);
    assert_eq!(totals.total_coupons, 3);
    assert_eq!(totals.coupon_amount, Decimal::from(1500));
    assert_eq!(totals.grand_total, Decimal::from(2500));

    let submission = PaymentSubmission::new(&engine, &selection);
    assert_eq!(
        serde_json::to_value(&submission).unwrap(),
        json!({
            "counts": {"Dashami": 0, "Nabami": 1, "Saptami": 2},
            "totalAmount": 2500.0
        })
    );
}

#[test]
fn test_custom_calendar_from_toml() {
    let toml = r#"
        price_per_coupon = "450.50"
        family_base_fee = 1200
        max_coupons_per_event = 6
        currency = "INR"
        events = ["Shashthi", "Saptami", "Ashtami", "Nabami", "Dashami"]
    "#;

    let config = PricingConfig::from_toml(toml).expect("should parse valid TOML");
    let engine = PricingEngine::new(config).unwrap();

    let selection = CouponSelection::parse(engine.config(), ["Ashtami=6", "Shashthi=1"]).unwrap();
    let totals = engine.compute_total(&selection);

    assert_eq!(totals.total_coupons, 7);
    assert_eq!(totals.coupon_amount, Decimal::new(315_350, 2));
    assert_eq!(totals.grand_total, Decimal::new(435_350, 2));

    // clamped at the configured maximum
    let ashtami = key("Ashtami");
    assert_eq!(engine.increment_count(selection, &ashtami).count(&ashtami), Some(6));
}

#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!("festival-pricing-{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "price_per_coupon = 600").unwrap();
    drop(file);

    let config = PricingConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.price_per_coupon, Decimal::from(600));
    assert_eq!(config.family_base_fee, Decimal::from(1000));
    assert_eq!(config.max_coupons_per_event, 4);
}

#[test]
fn test_load_missing_config_file() {
    let err = PricingConfig::load("/nonexistent/festival-pricing.toml").unwrap_err();
    assert!(matches!(err, PricingError::ConfigIo(_)));
}

#[test]
fn test_invalid_configs_rejected() {
    let cases = [
        ("price_per_coupon = 0", "non-positive price"),
        ("family_base_fee = -1", "negative fee"),
        ("max_coupons_per_event = 0", "zero ceiling"),
        ("events = []", "empty calendar"),
        (r#"events = ["Saptami", "Saptami"]"#, "duplicate day"),
        (r#"currency = "rupees""#, "bad currency"),
    ];

    for (toml, reason) in cases {
        let err = PricingConfig::from_toml(toml).unwrap_err();
        assert!(matches!(err, PricingError::InvalidConfig(_)), "{reason}: got {err}");
    }
}

#[test]
fn test_malformed_config_rejected() {
    assert!(matches!(
        PricingConfig::from_toml("price_per_coupon = [").unwrap_err(),
        PricingError::ConfigParse(_)
    ));
    assert!(matches!(
        PricingConfig::from_toml("discount = 10").unwrap_err(),
        PricingError::ConfigParse(_)
    ));
    assert!(matches!(
        PricingConfig::from_toml(r#"events = ["Maha Ashtami"]"#).unwrap_err(),
        PricingError::ConfigParse(_)
    ));
}

use anyhow::Result;
use mb_quote::{
    body, mailto_uri, price, subject, Complexity, ContactSettings, Frequency, PricingTable,
    QuoteEstimator, QuoteForm, QuoteInput, Service,
};
use pretty_assertions::assert_eq;
use url::Url;

#[test]
fn test_full_residential_message() {
    let input = QuoteInput::residential()
        .with_size(2200.0)
        .with_rooms(3, 2)
        .with_frequency(Frequency::Monthly)
        .with_deep_clean(true)
        .with_window_cleaning(true)
        .with_notes("Please bring unscented products.");
    let result = price(&input, &PricingTable::default());

    // (2200 * 0.11 + 75 + 70) * 1.45 = 561.15; + 150 window; * 0.9 = 640.035
    assert_eq!(result.total, 640);

    let expected = "\
Hello, I'd like a quote for residential cleaning.

Service: Residential
Property size: 2,200 sq ft
Bedrooms: 3
Bathrooms: 2
Frequency: Monthly
Add-ons: Deep clean, Window cleaning

Estimated total: $640
Per sq ft: $0.29

Notes:
Please bring unscented products.";
    assert_eq!(body(&input, &result), expected);
}

#[test]
fn test_construction_message() {
    let input = QuoteInput::construction()
        .with_size(20000.0)
        .with_complexity(Complexity::High);
    let result = price(&input, &PricingTable::default());

    let expected = "\
Hello, I'd like a quote for post-construction cleanup.

Service: Construction
Project size: 20,000 sq ft
Complexity: High

Estimated total: $6,000
Per sq ft: $0.30";
    assert_eq!(body(&input, &result), expected);
    assert_eq!(subject(&input), "Construction Cleanup Quote Request");
}

#[test]
fn test_mailto_round_trips_through_url_parser() -> Result<()> {
    let notes = "Line one\nLine two: 50% off? & more";
    let input = QuoteInput::residential().with_notes(notes);
    let result = price(&input, &PricingTable::default());
    let uri = mailto_uri("info@mb.cleaning", &input, &result)?;

    let url = Url::parse(&uri)?;
    assert_eq!(url.scheme(), "mailto");
    assert_eq!(url.path(), "info@mb.cleaning");

    let query = url.query().unwrap_or_default();
    let mut decoded_subject = String::new();
    let mut decoded_body = String::new();
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = urlencoding::decode(value)?.into_owned();
        match key {
            "subject" => decoded_subject = value,
            "body" => decoded_body = value,
            _ => {}
        }
    }

    assert_eq!(decoded_subject, "Residential Cleaning Quote Request");
    assert_eq!(decoded_body, body(&input, &result).replace('\n', "\r\n"));
    assert!(decoded_body.ends_with("Line one\r\nLine two: 50% off? & more"));
    Ok(())
}

#[test]
fn test_session_submission() -> Result<()> {
    let mut estimator = QuoteEstimator::new(Service::Residential, PricingTable::default());
    estimator.apply_form(&QuoteForm {
        service: Some("residential".to_string()),
        size: Some("1200".to_string()),
        bedrooms: Some("two".to_string()),
        bathrooms: Some("1".to_string()),
        frequency: Some("weekly".to_string()),
        garage_cleaning: Some("on".to_string()),
        notes: Some("Garage is full of boxes".to_string()),
        ..QuoteForm::default()
    });

    // bedrooms "two" -> 0: (1200 * 0.13 + 35 + 75) * 0.8 = 212.8
    assert_eq!(estimator.result().total, 213);
    assert_eq!(estimator.input().bedrooms, 0);

    let submission = estimator.submit(&ContactSettings::default())?;
    assert_eq!(submission.request.estimate, 213);
    assert_eq!(submission.request.garage_cleaning, Some(true));
    assert_eq!(submission.request.complexity, None);
    assert!(submission.mailto.starts_with("mailto:info@mb.cleaning?subject="));
    assert!(submission.body.contains("Add-ons: Garage cleaning"));
    assert!(submission.body.contains("Garage is full of boxes"));
    Ok(())
}

#[test]
fn test_bad_recipient_is_an_error_not_a_panic() {
    let estimator = QuoteEstimator::new(Service::Construction, PricingTable::default());
    let contact = ContactSettings {
        recipient: "nobody".to_string(),
        business_name: "MB Cleaning".to_string(),
    };
    let err = estimator.submit(&contact).unwrap_err();
    assert!(err.user_friendly_message().contains("contact.recipient"));
}

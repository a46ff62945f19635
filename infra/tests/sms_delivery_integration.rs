//! Issue and verify through the real Arkesel sender against a stubbed provider

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use dl_core::{InMemoryOtpStore, IssueRequest, OtpService, OtpServiceConfig, Purpose, Transport, VerifyOutcome};
use dl_infra::build_dispatcher;
use dl_shared::AppConfig;

fn config(endpoint: &str) -> AppConfig {
    let pairs = vec![
        ("EMAIL_PROVIDER".to_string(), "none".to_string()),
        ("SMS_PROVIDER".to_string(), "arkesel".to_string()),
        ("SMS_KEY".to_string(), "integration-key".to_string()),
        ("SMS_ENDPOINT".to_string(), endpoint.to_string()),
    ];
    AppConfig::from_lookup(|name| pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone()))
        .unwrap()
}

fn code_from(request: &Request) -> String {
    let body = request
        .url
        .query_pairs()
        .find(|(k, _)| k == "sms")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    body.split_whitespace()
        .find(|word| word.len() == 6 && word.chars().all(|c| c.is_ascii_digit()))
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_sms_code_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sms/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&format!("{}/sms/api", server.uri()));
    let dispatcher = build_dispatcher(&config).unwrap();
    let service = OtpService::new(
        Arc::new(InMemoryOtpStore::new()),
        Arc::new(dispatcher),
        OtpServiceConfig::from_settings(&config.otp, &config.notifications.app_name),
    );

    assert!(!service.supports(Transport::Email));

    let outcome = service
        .issue(IssueRequest::new("+233241234567", Purpose::Verification, Transport::Sms))
        .await
        .unwrap();
    assert!(outcome.is_delivered());

    let requests = server.received_requests().await.unwrap();
    let code = code_from(&requests[0]);

    assert_eq!(
        service.verify("+233241234567", &code, Purpose::Verification).await.unwrap(),
        VerifyOutcome::Verified
    );
}

#[tokio::test]
async fn test_provider_rejection_is_reported_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "102", "message": "Insufficient balance"})))
        .mount(&server)
        .await;

    let config = config(&format!("{}/sms/api", server.uri()));
    let store = Arc::new(InMemoryOtpStore::new());
    let service = OtpService::new(
        store.clone(),
        Arc::new(build_dispatcher(&config).unwrap()),
        OtpServiceConfig::from_settings(&config.otp, &config.notifications.app_name),
    );

    let outcome = service
        .issue(IssueRequest::new("+233241234567", Purpose::PasswordReset, Transport::Sms))
        .await
        .unwrap();

    assert!(!outcome.is_delivered());
    assert_eq!(outcome.dispatch.info, "Failed to send SMS");
    assert_eq!(outcome.dispatch.data.unwrap()["code"], "102");
    assert_eq!(store.len().await, 1);
}

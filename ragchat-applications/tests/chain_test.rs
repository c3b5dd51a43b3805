//! Chain configuration panel and connection probe

mod common;

use common::{api_error, healthy_report, MockChains, MockChat};
use ragchat_applications::{
    ApplicationError, ChainConfigPanel, ConnectionProbe, ProbeState, CHAIN_FAILURE_MESSAGE,
    CHAIN_SUCCESS_MESSAGE,
};
use ragchat_core::{ChainConfig, CUSTOMIZABLE_CHAIN};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

fn panel(chains: Arc<MockChains>) -> ChainConfigPanel {
    ChainConfigPanel::new(chains, &ChainConfig::default())
}

#[tokio::test]
async fn test_configure_customizable_chain() {
    let chains = Arc::new(MockChains::default());
    let panel = panel(chains.clone());

    assert!(!panel.can_submit());
    panel.set_system_message("You are a concise assistant.");
    assert_eq!(panel.set_temperature(0.84), 0.8);
    assert!(panel.can_submit());

    let response = assert_ok!(panel.submit().await);
    assert_eq!(response.name, CUSTOMIZABLE_CHAIN);

    let sent = chains.received.lock().unwrap()[0].clone();
    assert_eq!(sent.name, "customizable");
    assert_eq!(sent.system_message, "You are a concise assistant.");
    assert_eq!(sent.parameters.temperature, 0.8);

    let status = panel.status().unwrap();
    assert!(!status.is_error);
    assert_eq!(status.message, CHAIN_SUCCESS_MESSAGE);
    assert!(!panel.is_submitting());
}

#[tokio::test]
async fn test_defaults_and_temperature_bounds() {
    let panel = panel(Arc::new(MockChains::default()));

    assert_eq!(panel.temperature(), 0.7);
    assert_eq!(panel.set_temperature(7.0), 1.0);
    assert_eq!(panel.set_temperature(-1.0), 0.0);
    assert_eq!(panel.set_temperature(f32::NAN), 0.0);
}

#[tokio::test]
async fn test_blank_system_message_is_not_sent() {
    let chains = Arc::new(MockChains::default());
    let panel = panel(chains.clone());
    panel.set_system_message("   ");

    assert!(!panel.can_submit());
    let result = panel.submit().await;
    assert!(matches!(result, Err(ApplicationError::Validation { .. })));
    assert!(chains.received.lock().unwrap().is_empty());
    assert!(panel.status().is_none());
}

#[tokio::test]
async fn test_failure_reports_backend_detail() {
    let chains = Arc::new(MockChains::failing(Some(serde_json::json!(
        "Chain 'customizable' is not registered"
    ))));
    let panel = panel(chains);
    panel.set_system_message("Be brief.");

    assert_err!(panel.submit().await);
    let status = panel.status().unwrap();
    assert!(status.is_error);
    assert_eq!(status.message, "Chain 'customizable' is not registered");

    // form values survive the failure
    assert_eq!(panel.system_message(), "Be brief.");
}

#[tokio::test]
async fn test_failure_without_detail_uses_fallback() {
    let panel = panel(Arc::new(MockChains::failing(None)));
    panel.set_system_message("Be brief.");

    assert_err!(panel.submit().await);
    assert_eq!(panel.status().unwrap().message, CHAIN_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_probe_connected() {
    let probe = ConnectionProbe::new(Arc::new(MockChat::with_health(Ok(healthy_report()))));
    assert_eq!(probe.state(), ProbeState::Idle);

    let state = probe.check().await;
    assert!(state.is_connected());
    assert_eq!(probe.state(), state);
}

#[tokio::test]
async fn test_probe_degraded_backend() {
    let detail = serde_json::json!({
        "status": "degraded",
        "version": "1.0.0",
        "timestamp": 1.0,
        "uptime": 3.0,
        "environment": "development",
        "system_info": {},
        "services": {"model_service": "ERROR: no providers", "vector_store": "OK"}
    });
    let probe = ConnectionProbe::new(Arc::new(MockChat::with_health(Err(api_error(
        503,
        Some(detail),
    )))));

    match probe.check().await {
        ProbeState::Failed { message, degraded } => {
            assert_eq!(
                message,
                "Backend is degraded: model_service (ERROR: no providers)"
            );
            assert_eq!(degraded.unwrap().status, "degraded");
        }
        other => panic!("Expected Failed state, got {:?}", other),
    }
}

#[tokio::test]
async fn test_probe_unreachable_backend() {
    // no scripted health result: the mock fails like a refused connection
    let probe = ConnectionProbe::new(Arc::new(MockChat::new()));

    match probe.check().await {
        ProbeState::Failed { message, degraded } => {
            assert!(message.contains("Could not reach the server"));
            assert!(degraded.is_none());
        }
        other => panic!("Expected Failed state, got {:?}", other),
    }
}

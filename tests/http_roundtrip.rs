//! End-to-end exchanges over the production reqwest network handle.

use std::sync::Arc;

use mms_transport::telephony::{SubscriptionId, SubscriptionSource, Telephony};
use mms_transport::{Method, MmsConfig, MmsHttpClient, ReqwestNetwork, TransportError};

mod common;

struct NoTelephony;

impl Telephony for NoTelephony {
    fn line1_number(&self, _sub_id: SubscriptionId) -> Option<String> {
        None
    }
}

struct NoSubscriptions;

impl SubscriptionSource for NoSubscriptions {
    fn active_subscription_ids(&self) -> Vec<SubscriptionId> {
        Vec::new()
    }

    fn phone_number(&self, _sub_id: SubscriptionId) -> Option<String> {
        None
    }
}

fn client() -> MmsHttpClient {
    MmsHttpClient::new(
        Arc::new(ReqwestNetwork::new()),
        Arc::new(NoTelephony),
        Arc::new(NoSubscriptions),
    )
}

#[tokio::test]
async fn get_round_trips_against_a_live_socket() {
    let addr = common::start_canned_backend(200, "mms-payload").await;
    let client = client();

    let body = client
        .execute(
            &format!("{addr}/mms"),
            &[],
            Method::Get,
            false,
            "integration-agent",
            5_000,
            &MmsConfig::default(),
            SubscriptionId(1),
            "req-live-1",
        )
        .await
        .unwrap();

    assert_eq!(&body[..], b"mms-payload");
}

#[tokio::test]
async fn non_success_status_surfaces_with_its_code() {
    let addr = common::start_canned_backend(404, "nothing here").await;
    let client = client();

    let err = client
        .execute(
            &format!("{addr}/mms"),
            &[],
            Method::Get,
            false,
            "",
            5_000,
            &MmsConfig::default(),
            SubscriptionId(1),
            "req-live-2",
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Status { status: 404 }));
}

#[tokio::test]
async fn refused_connection_is_a_transport_failure() {
    let addr = common::unreachable_addr().await;
    let client = client();

    let err = client
        .execute(
            &format!("{addr}/mms"),
            b"pdu",
            Method::Post,
            false,
            "",
            5_000,
            &MmsConfig::default(),
            SubscriptionId(1),
            "req-live-3",
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Transport(_)));
}

//! Tests to verify that the service layer emits expected tracing output

mod common;

use tracing_test::traced_test;

use accounts::contract::model::Credentials;
use common::{harness, registration};

#[traced_test]
#[tokio::test]
async fn register_emits_spans() {
    let h = harness();

    let result = h.auth.register(registration("Ann", "a@x.com", "pw1")).await;

    assert!(result.is_ok());
    assert!(logs_contain("accounts.auth.register"));
    assert!(logs_contain("Successfully registered user"));
}

#[traced_test]
#[tokio::test]
async fn passwords_never_reach_the_log() {
    let h = harness();

    h.auth
        .register(registration("Ann", "a@x.com", "hunter2-secret"))
        .await
        .unwrap();
    h.auth
        .login(Credentials {
            email: "a@x.com".into(),
            password: "hunter2-secret".into(),
        })
        .await
        .unwrap();

    assert!(logs_contain("accounts.auth.login"));
    assert!(!logs_contain("hunter2-secret"));
}

#[traced_test]
#[tokio::test]
async fn failed_registration_email_is_logged() {
    let h = harness();
    h.mailer.set_failing(true);

    let result = h.auth.register(registration("Ann", "a@x.com", "pw1")).await;

    assert!(result.is_ok());
    assert!(logs_contain("Verification email not sent on registration"));
}

#[traced_test]
#[tokio::test]
async fn pact_operations_emit_spans() {
    let h = harness();
    let ann = h.verified_user("Ann", "a@x.com", "pw1").await;
    h.verified_user("Bob", "b@x.com", "pw2").await;

    h.pact.add_to_pact(ann, "b@x.com").await.unwrap();
    h.pact.remove_from_pact(ann, "b@x.com").await.unwrap();

    assert!(logs_contain("accounts.pact.add"));
    assert!(logs_contain("accounts.pact.remove"));
}

// tests/claim_flow_tests.rs
//
// End-to-end claim workflow over a real Postgres. Set
// TEST_DATABASE_URL to run; otherwise each test is a no-op.

use std::sync::Arc;

use campushub_common::models::{Gift, User};
use campushub_common::traits::repository_traits::{GiftRepository, UserRepository};
use campushub_core::repositories::postgres::{
    PostgresGiftRepository, PostgresGiftVerificationRepository, PostgresUserRepository,
};
use campushub_core::services::{ConfirmOutcome, GiftService};
use campushub_core::test_utils::helpers::setup_test_database;
use campushub_core::Error;

fn test_db_configured() -> bool {
    if std::env::var("TEST_DATABASE_URL").is_err() {
        eprintln!("TEST_DATABASE_URL not set; skipping database test");
        return false;
    }
    true
}

#[tokio::test]
async fn claim_lookup_confirm_roundtrip() -> Result<(), Error> {
    if !test_db_configured() {
        return Ok(());
    }
    let db = setup_test_database().await?;

    let user_repo = Arc::new(PostgresUserRepository::new(db.pool().clone()));
    let gift_repo = Arc::new(PostgresGiftRepository::new(db.pool().clone()));
    let verification_repo = Arc::new(PostgresGiftVerificationRepository::new(db.pool().clone()));

    let user = User::new("Elif", "Aydin", Some("elif@example.edu"));
    user_repo.create(&user).await?;
    gift_repo
        .create_gift(&Gift::new("Welcome tote", "Tote bag for new members", None))
        .await?;

    let service = GiftService::new(user_repo.clone(), gift_repo, verification_repo);

    let outcome = service.claim_gift(user.user_id).await?;
    assert!(outcome.newly_claimed);
    assert_eq!(outcome.claim_code.len(), 6);

    // Idempotent: a second claim hands back the same code.
    let again = service.claim_gift(user.user_id).await?;
    assert!(!again.newly_claimed);
    assert_eq!(again.claim_code, outcome.claim_code);

    let lookup = service
        .lookup_claim(&outcome.claim_code)
        .await?
        .expect("issued code must resolve");
    assert_eq!(lookup.user.user_id, user.user_id);
    assert!(!lookup.already_verified);

    let confirmed = service
        .confirm_claim(user.user_id, &outcome.claim_code, "front-desk")
        .await?;
    assert!(matches!(confirmed, ConfirmOutcome::Verified(_)));

    let second = service
        .confirm_claim(user.user_id, &outcome.claim_code, "front-desk")
        .await?;
    assert!(matches!(second, ConfirmOutcome::AlreadyVerified(_)));

    let lookup = service
        .lookup_claim(&outcome.claim_code)
        .await?
        .expect("issued code must resolve");
    assert!(lookup.already_verified);

    assert!(service.available_gift().await?.is_some());
    Ok(())
}

#[tokio::test]
async fn concurrent_claims_converge_on_one_code() -> Result<(), Error> {
    if !test_db_configured() {
        return Ok(());
    }
    let db = setup_test_database().await?;

    let user_repo = Arc::new(PostgresUserRepository::new(db.pool().clone()));
    let user = User::new("Nora", "Ek", None);
    user_repo.create(&user).await?;

    let service = Arc::new(GiftService::new(
        user_repo,
        Arc::new(PostgresGiftRepository::new(db.pool().clone())),
        Arc::new(PostgresGiftVerificationRepository::new(db.pool().clone())),
    ));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = service.clone();
        let user_id = user.user_id;
        handles.push(tokio::spawn(async move { service.claim_gift(user_id).await }));
    }

    let mut codes = Vec::new();
    for handle in handles {
        codes.push(handle.await.expect("task must not panic")?.claim_code);
    }
    codes.dedup();
    assert_eq!(codes.len(), 1, "all claimants must see the same code");
    Ok(())
}

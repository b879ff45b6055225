// tests/gift_service_tests.rs

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use campushub_common::models::{Gift, GiftVerification, User};
use campushub_common::traits::repository_traits::{
    ClaimWrite, GiftRepository, GiftVerificationRepository, UserRepository,
};
use campushub_core::services::{ConfirmOutcome, GiftService};
use campushub_core::Error;

/// In-memory UserRepository backed by a HashMap. `assign_claim`
/// reproduces the conditional-update semantics of the real store.
#[derive(Default)]
struct MockUserRepo {
    data: Mutex<HashMap<Uuid, User>>,
}

impl MockUserRepo {
    fn with_user(user: User) -> Arc<Self> {
        let repo = Self::default();
        repo.data.lock().unwrap().insert(user.user_id, user);
        Arc::new(repo)
    }
}

#[async_trait]
impl UserRepository for MockUserRepo {
    async fn create(&self, user: &User) -> Result<(), Error> {
        self.data.lock().unwrap().insert(user.user_id, user.clone());
        Ok(())
    }

    async fn get(&self, user_id: Uuid) -> Result<Option<User>, Error> {
        Ok(self.data.lock().unwrap().get(&user_id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn get_by_claim_code(&self, claim_code: &str) -> Result<Option<User>, Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .values()
            .find(|u| u.claim_code.as_deref() == Some(claim_code))
            .cloned())
    }

    async fn assign_claim(
        &self,
        user_id: Uuid,
        claim_code: &str,
        claimed_at: DateTime<Utc>,
    ) -> Result<ClaimWrite, Error> {
        let mut data = self.data.lock().unwrap();
        let taken = data
            .values()
            .any(|u| u.user_id != user_id && u.claim_code.as_deref() == Some(claim_code));
        if taken {
            return Ok(ClaimWrite::CodeTaken);
        }
        let user = data
            .get_mut(&user_id)
            .ok_or_else(|| Error::NotFound(format!("No user with id={}", user_id)))?;
        if user.has_claimed_gift {
            return Ok(ClaimWrite::AlreadyClaimed);
        }
        user.has_claimed_gift = true;
        user.claim_code = Some(claim_code.to_string());
        user.claimed_at = Some(claimed_at);
        Ok(ClaimWrite::Applied)
    }

    async fn update(&self, user: &User) -> Result<(), Error> {
        self.data.lock().unwrap().insert(user.user_id, user.clone());
        Ok(())
    }

    async fn delete(&self, user_id: Uuid) -> Result<(), Error> {
        self.data.lock().unwrap().remove(&user_id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, Error> {
        Ok(self.data.lock().unwrap().values().cloned().collect())
    }
}

#[derive(Default)]
struct MockGiftRepo {
    data: Mutex<Vec<Gift>>,
}

#[async_trait]
impl GiftRepository for MockGiftRepo {
    async fn create_gift(&self, gift: &Gift) -> Result<(), Error> {
        self.data.lock().unwrap().push(gift.clone());
        Ok(())
    }

    async fn get_gift(&self, gift_id: Uuid) -> Result<Option<Gift>, Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.gift_id == gift_id)
            .cloned())
    }

    async fn list_gifts(&self) -> Result<Vec<Gift>, Error> {
        Ok(self.data.lock().unwrap().clone())
    }

    async fn update_gift(&self, gift: &Gift) -> Result<(), Error> {
        let mut data = self.data.lock().unwrap();
        if let Some(slot) = data.iter_mut().find(|g| g.gift_id == gift.gift_id) {
            *slot = gift.clone();
        }
        Ok(())
    }

    async fn delete_gift(&self, gift_id: Uuid) -> Result<(), Error> {
        self.data.lock().unwrap().retain(|g| g.gift_id != gift_id);
        Ok(())
    }
}

/// Keyed by claim code, like the unique index in the real schema.
#[derive(Default)]
struct MockVerificationRepo {
    data: Mutex<HashMap<String, GiftVerification>>,
}

#[async_trait]
impl GiftVerificationRepository for MockVerificationRepo {
    async fn insert_if_absent(&self, verification: &GiftVerification) -> Result<bool, Error> {
        let mut data = self.data.lock().unwrap();
        if data.contains_key(&verification.claim_code) {
            return Ok(false);
        }
        data.insert(verification.claim_code.clone(), verification.clone());
        Ok(true)
    }

    async fn get_by_claim_code(&self, claim_code: &str) -> Result<Option<GiftVerification>, Error> {
        Ok(self.data.lock().unwrap().get(claim_code).cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<GiftVerification>, Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .values()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect())
    }
}

fn service_with_user(user: User) -> (GiftService, Arc<MockUserRepo>) {
    let user_repo = MockUserRepo::with_user(user);
    let service = GiftService::new(
        user_repo.clone(),
        Arc::new(MockGiftRepo::default()),
        Arc::new(MockVerificationRepo::default()),
    );
    (service, user_repo)
}

#[tokio::test]
async fn claim_is_idempotent() -> Result<(), Error> {
    let user = User::new("Maya", "Lindqvist", Some("maya@example.edu"));
    let user_id = user.user_id;
    let (service, _) = service_with_user(user);

    let first = service.claim_gift(user_id).await?;
    assert!(first.newly_claimed);
    assert_eq!(first.claim_code.len(), 6);

    let second = service.claim_gift(user_id).await?;
    assert!(!second.newly_claimed);
    assert_eq!(first.claim_code, second.claim_code);
    Ok(())
}

#[tokio::test]
async fn claim_code_is_uppercase_alphanumeric() -> Result<(), Error> {
    let user = User::new("Jonas", "Berg", None);
    let user_id = user.user_id;
    let (service, _) = service_with_user(user);

    let outcome = service.claim_gift(user_id).await?;
    assert!(outcome
        .claim_code
        .bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    Ok(())
}

#[tokio::test]
async fn claim_for_unknown_user_is_not_found() {
    let (service, _) = service_with_user(User::new("A", "B", None));
    let err = service.claim_gift(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn lookup_reports_verification_state() -> Result<(), Error> {
    let user = User::new("Sara", "Holm", None);
    let user_id = user.user_id;
    let (service, _) = service_with_user(user);

    assert!(service.lookup_claim("NOPE42").await?.is_none());

    let outcome = service.claim_gift(user_id).await?;
    let code = outcome.claim_code;

    let lookup = service.lookup_claim(&code).await?.expect("code was issued");
    assert_eq!(lookup.user.user_id, user_id);
    assert!(!lookup.already_verified);

    service.confirm_claim(user_id, &code, "desk-1").await?;

    let lookup = service.lookup_claim(&code).await?.expect("code was issued");
    assert!(lookup.already_verified);
    Ok(())
}

#[tokio::test]
async fn lookup_trims_surrounding_whitespace() -> Result<(), Error> {
    let user = User::new("Ines", "Dahl", None);
    let user_id = user.user_id;
    let (service, _) = service_with_user(user);

    let code = service.claim_gift(user_id).await?.claim_code;
    let padded = format!("  {}\n", code);
    assert!(service.lookup_claim(&padded).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn second_confirm_reports_already_verified() -> Result<(), Error> {
    let user = User::new("Omar", "Khan", None);
    let user_id = user.user_id;
    let (service, _) = service_with_user(user);

    let code = service.claim_gift(user_id).await?.claim_code;

    let first = service.confirm_claim(user_id, &code, "desk-1").await?;
    let winner = match first {
        ConfirmOutcome::Verified(v) => v,
        ConfirmOutcome::AlreadyVerified(_) => panic!("first confirm must win"),
    };

    let second = service.confirm_claim(user_id, &code, "desk-2").await?;
    match second {
        ConfirmOutcome::AlreadyVerified(v) => {
            assert_eq!(v.verification_id, winner.verification_id);
            assert_eq!(v.verified_by, "desk-1");
        }
        ConfirmOutcome::Verified(_) => panic!("second confirm must not insert"),
    }
    Ok(())
}

#[tokio::test]
async fn confirm_rejects_wrong_owner() -> Result<(), Error> {
    let user = User::new("Lea", "Nyberg", None);
    let user_id = user.user_id;
    let (service, _) = service_with_user(user);

    let code = service.claim_gift(user_id).await?.claim_code;
    let err = service
        .confirm_claim(Uuid::new_v4(), &code, "desk-1")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Claim(_)));
    Ok(())
}

#[tokio::test]
async fn confirm_requires_verifier_identity() -> Result<(), Error> {
    let user = User::new("Tim", "Falk", None);
    let user_id = user.user_id;
    let (service, _) = service_with_user(user);

    let code = service.claim_gift(user_id).await?.claim_code;
    let err = service.confirm_claim(user_id, &code, "  ").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    Ok(())
}

/// Delegates to an inner repo but forces `CodeTaken` for the first N
/// `assign_claim` calls, standing in for a unique-index collision.
struct CollidingUserRepo {
    inner: Arc<MockUserRepo>,
    collisions_left: AtomicU32,
}

#[async_trait]
impl UserRepository for CollidingUserRepo {
    async fn create(&self, user: &User) -> Result<(), Error> {
        self.inner.create(user).await
    }
    async fn get(&self, user_id: Uuid) -> Result<Option<User>, Error> {
        self.inner.get(user_id).await
    }
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        self.inner.get_by_email(email).await
    }
    async fn get_by_claim_code(&self, claim_code: &str) -> Result<Option<User>, Error> {
        self.inner.get_by_claim_code(claim_code).await
    }
    async fn assign_claim(
        &self,
        user_id: Uuid,
        claim_code: &str,
        claimed_at: DateTime<Utc>,
    ) -> Result<ClaimWrite, Error> {
        if self.collisions_left.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
            if n > 0 { Some(n - 1) } else { None }
        }).is_ok() {
            return Ok(ClaimWrite::CodeTaken);
        }
        self.inner.assign_claim(user_id, claim_code, claimed_at).await
    }
    async fn update(&self, user: &User) -> Result<(), Error> {
        self.inner.update(user).await
    }
    async fn delete(&self, user_id: Uuid) -> Result<(), Error> {
        self.inner.delete(user_id).await
    }
    async fn list_all(&self) -> Result<Vec<User>, Error> {
        self.inner.list_all().await
    }
}

#[tokio::test]
async fn claim_retries_through_code_collisions() -> Result<(), Error> {
    let user = User::new("Nora", "Ek", None);
    let user_id = user.user_id;
    let repo = CollidingUserRepo {
        inner: MockUserRepo::with_user(user),
        collisions_left: AtomicU32::new(2),
    };
    let service = GiftService::new(
        Arc::new(repo),
        Arc::new(MockGiftRepo::default()),
        Arc::new(MockVerificationRepo::default()),
    );

    let outcome = service.claim_gift(user_id).await?;
    assert!(outcome.newly_claimed);
    assert_eq!(outcome.claim_code.len(), 6);
    Ok(())
}

#[tokio::test]
async fn claim_gives_up_after_too_many_collisions() {
    let user = User::new("Alex", "Strand", None);
    let user_id = user.user_id;
    let repo = CollidingUserRepo {
        inner: MockUserRepo::with_user(user),
        collisions_left: AtomicU32::new(u32::MAX),
    };
    let service = GiftService::new(
        Arc::new(repo),
        Arc::new(MockGiftRepo::default()),
        Arc::new(MockVerificationRepo::default()),
    );

    let err = service.claim_gift(user_id).await.unwrap_err();
    assert!(matches!(err, Error::Claim(_)));
}

#[tokio::test]
async fn concurrent_confirms_produce_one_verification() -> Result<(), Error> {
    let user = User::new("Vera", "Lund", None);
    let user_id = user.user_id;
    let user_repo = MockUserRepo::with_user(user);
    let verification_repo = Arc::new(MockVerificationRepo::default());
    let service = Arc::new(GiftService::new(
        user_repo,
        Arc::new(MockGiftRepo::default()),
        verification_repo.clone(),
    ));

    let code = service.claim_gift(user_id).await?.claim_code;

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            service
                .confirm_claim(user_id, &code, &format!("desk-{}", i))
                .await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.expect("task must not panic")? {
            ConfirmOutcome::Verified(_) => winners += 1,
            ConfirmOutcome::AlreadyVerified(_) => {}
        }
    }

    assert_eq!(winners, 1, "exactly one confirm may win");
    assert_eq!(verification_repo.list_for_user(user_id).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn end_to_end_claim_lookup_confirm() -> Result<(), Error> {
    let user = User::new("Elif", "Aydin", Some("elif@example.edu"));
    let user_id = user.user_id;
    let (service, _) = service_with_user(user);

    let outcome = service.claim_gift(user_id).await?;
    assert!(outcome.newly_claimed);
    assert!(outcome.user.has_claimed_gift);

    let lookup = service
        .lookup_claim(&outcome.claim_code)
        .await?
        .expect("issued code must resolve");
    assert!(!lookup.already_verified);

    let confirmed = service
        .confirm_claim(user_id, &outcome.claim_code, "front-desk")
        .await?;
    assert!(matches!(confirmed, ConfirmOutcome::Verified(_)));

    let lookup = service
        .lookup_claim(&outcome.claim_code)
        .await?
        .expect("issued code must resolve");
    assert!(lookup.already_verified);
    Ok(())
}

#[tokio::test]
async fn available_gift_returns_first_listed() -> Result<(), Error> {
    let gift_repo = Arc::new(MockGiftRepo::default());
    let service = GiftService::new(
        Arc::new(MockUserRepo::default()),
        gift_repo.clone(),
        Arc::new(MockVerificationRepo::default()),
    );

    assert!(service.available_gift().await?.is_none());

    let gift = Gift::new("Welcome tote", "Tote bag for new members", None);
    gift_repo.create_gift(&gift).await?;

    let available = service.available_gift().await?.expect("one gift exists");
    assert_eq!(available.gift_id, gift.gift_id);
    Ok(())
}

// src/services/gift_service.rs

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use campushub_common::models::{Gift, GiftVerification, User};
use campushub_common::traits::repository_traits::{
    ClaimWrite, GiftRepository, GiftVerificationRepository, UserRepository,
};
use crate::Error;

const CLAIM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CLAIM_CODE_LEN: usize = 6;

/// How many fresh codes we try before giving up on a unique-index
/// collision. At 36^6 codes the second attempt is already vanishingly
/// rare.
const MAX_CODE_ATTEMPTS: u32 = 5;

/// Result of a claim request.
#[derive(Debug, Clone)]
pub struct ClaimOutcome {
    pub user: User,
    pub claim_code: String,
    /// False when the user had already claimed and we returned the
    /// stored code unchanged.
    pub newly_claimed: bool,
}

/// A claim code resolved to its owner, for the verifier screen.
#[derive(Debug, Clone)]
pub struct ClaimLookup {
    pub user: User,
    pub already_verified: bool,
}

/// Result of a confirm request.
#[derive(Debug, Clone)]
pub enum ConfirmOutcome {
    Verified(GiftVerification),
    /// The code was already redeemed; carries the winning record.
    AlreadyVerified(GiftVerification),
}

pub struct GiftService {
    user_repo: Arc<dyn UserRepository + Send + Sync>,
    gift_repo: Arc<dyn GiftRepository + Send + Sync>,
    verification_repo: Arc<dyn GiftVerificationRepository + Send + Sync>,
}

impl GiftService {
    pub fn new(
        user_repo: Arc<dyn UserRepository + Send + Sync>,
        gift_repo: Arc<dyn GiftRepository + Send + Sync>,
        verification_repo: Arc<dyn GiftVerificationRepository + Send + Sync>,
    ) -> Self {
        Self {
            user_repo,
            gift_repo,
            verification_repo,
        }
    }

    /// Issues a claim code to `user_id`, or returns the code they already
    /// hold. The write is a conditional update that only touches an
    /// unclaimed row, so two concurrent claims converge on one code.
    pub async fn claim_gift(&self, user_id: Uuid) -> Result<ClaimOutcome, Error> {
        let user = self
            .user_repo
            .get(user_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("No user with id={}", user_id)))?;

        if user.has_claimed_gift {
            let code = user.claim_code.clone().ok_or_else(|| {
                Error::Claim(format!("User {} is claimed but has no code", user_id))
            })?;
            info!("claim_gift: user={} already claimed, code returned unchanged", user_id);
            return Ok(ClaimOutcome {
                user,
                claim_code: code,
                newly_claimed: false,
            });
        }

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = generate_claim_code();
            let claimed_at = Utc::now();

            match self.user_repo.assign_claim(user_id, &code, claimed_at).await? {
                ClaimWrite::Applied => {
                    let updated = self
                        .user_repo
                        .get(user_id)
                        .await?
                        .ok_or_else(|| Error::NotFound(format!("No user with id={}", user_id)))?;
                    info!("claim_gift: user={} issued code on attempt {}", user_id, attempt);
                    return Ok(ClaimOutcome {
                        user: updated,
                        claim_code: code,
                        newly_claimed: true,
                    });
                }
                ClaimWrite::AlreadyClaimed => {
                    // Lost the race to a concurrent claim; return the
                    // winner's code.
                    let updated = self
                        .user_repo
                        .get(user_id)
                        .await?
                        .ok_or_else(|| Error::NotFound(format!("No user with id={}", user_id)))?;
                    let code = updated.claim_code.clone().ok_or_else(|| {
                        Error::Claim(format!("User {} is claimed but has no code", user_id))
                    })?;
                    info!("claim_gift: user={} claimed concurrently, code returned", user_id);
                    return Ok(ClaimOutcome {
                        user: updated,
                        claim_code: code,
                        newly_claimed: false,
                    });
                }
                ClaimWrite::CodeTaken => {
                    warn!(
                        "claim_gift: code collision for user={} (attempt {}), regenerating",
                        user_id, attempt
                    );
                }
            }
        }

        Err(Error::Claim(format!(
            "Could not generate a unique claim code for user {} after {} attempts",
            user_id, MAX_CODE_ATTEMPTS
        )))
    }

    /// Resolves a scanned or typed code to its owner. Side-effect free.
    /// Input is trimmed; the match itself is exact.
    pub async fn lookup_claim(&self, code: &str) -> Result<Option<ClaimLookup>, Error> {
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::Validation("Claim code must not be empty".into()));
        }

        let user = match self.user_repo.get_by_claim_code(code).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        let already_verified = self
            .verification_repo
            .get_by_claim_code(code)
            .await?
            .is_some();

        Ok(Some(ClaimLookup {
            user,
            already_verified,
        }))
    }

    /// Records a redemption. The insert is keyed by the claim code, so
    /// only one confirm can ever win; later confirms get back the
    /// record the winner wrote.
    pub async fn confirm_claim(
        &self,
        user_id: Uuid,
        code: &str,
        verified_by: &str,
    ) -> Result<ConfirmOutcome, Error> {
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::Validation("Claim code must not be empty".into()));
        }
        if verified_by.trim().is_empty() {
            return Err(Error::Validation("Verifier identity must not be empty".into()));
        }

        let owner = self
            .user_repo
            .get_by_claim_code(code)
            .await?
            .ok_or_else(|| Error::NotFound(format!("No claim with code '{}'", code)))?;
        if owner.user_id != user_id {
            return Err(Error::Claim(format!(
                "Code '{}' does not belong to user {}",
                code, user_id
            )));
        }

        let verification = GiftVerification::new(user_id, code, verified_by);
        let inserted = self.verification_repo.insert_if_absent(&verification).await?;

        if inserted {
            info!("confirm_claim: code='{}' verified by '{}'", code, verified_by);
            Ok(ConfirmOutcome::Verified(verification))
        } else {
            let existing = self
                .verification_repo
                .get_by_claim_code(code)
                .await?
                .ok_or_else(|| {
                    Error::Claim(format!("Verification for code '{}' vanished mid-confirm", code))
                })?;
            info!("confirm_claim: code='{}' was already verified", code);
            Ok(ConfirmOutcome::AlreadyVerified(existing))
        }
    }

    /// The gift currently on offer, if any. Display-only.
    pub async fn available_gift(&self) -> Result<Option<Gift>, Error> {
        let gifts = self.gift_repo.list_gifts().await?;
        Ok(gifts.into_iter().next())
    }
}

fn generate_claim_code() -> String {
    let mut rng = rand::rng();
    (0..CLAIM_CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CLAIM_CODE_ALPHABET.len());
            CLAIM_CODE_ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_six_uppercase_alphanumerics() {
        for _ in 0..100 {
            let code = generate_claim_code();
            assert_eq!(code.len(), CLAIM_CODE_LEN);
            assert!(code
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }
}

//! Single-representative-image rule.
//!
//! A restaurant may have any number of images but at most one of them is
//! flagged as its representative (display) image. The decision here is pure;
//! callers must run it against a view of the restaurant's images that cannot
//! change until their own write commits.

use crate::error::CoreError;
use crate::types::DbId;

/// User-facing message attached to a representative-image rejection.
pub const REPRESENTATIVE_CONFLICT_MESSAGE: &str =
    "Only one representative image is allowed per restaurant";

/// The write being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepresentativeCandidate {
    /// Restaurant the image will belong to after the write.
    pub restaurant_id: DbId,
    /// Identity of the image being updated, `None` when creating.
    pub image_id: Option<DbId>,
    /// Proposed value of the representative flag.
    pub is_representative: bool,
}

impl RepresentativeCandidate {
    pub fn for_create(restaurant_id: DbId, is_representative: bool) -> Self {
        Self {
            restaurant_id,
            image_id: None,
            is_representative,
        }
    }

    pub fn for_update(restaurant_id: DbId, image_id: DbId, is_representative: bool) -> Self {
        Self {
            restaurant_id,
            image_id: Some(image_id),
            is_representative,
        }
    }
}

/// Decide whether `candidate` may be written.
///
/// `current_representatives` holds the ids of the images of
/// `candidate.restaurant_id` that are flagged representative right now.
///
/// - Clearing or leaving the flag unset is always accepted.
/// - Re-saving the current representative is accepted.
/// - Anything else with existing representatives is rejected with
///   [`CoreError::InvariantViolation`].
pub fn check_representative(
    candidate: &RepresentativeCandidate,
    current_representatives: &[DbId],
) -> Result<(), CoreError> {
    if !candidate.is_representative || current_representatives.is_empty() {
        return Ok(());
    }

    let is_self = candidate
        .image_id
        .is_some_and(|id| current_representatives.contains(&id));

    if is_self {
        Ok(())
    } else {
        Err(CoreError::InvariantViolation(
            REPRESENTATIVE_CONFLICT_MESSAGE.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn first_representative_is_accepted() {
        let candidate = RepresentativeCandidate::for_create(1, true);
        assert!(check_representative(&candidate, &[]).is_ok());
    }

    #[test]
    fn second_representative_is_rejected() {
        let candidate = RepresentativeCandidate::for_create(1, true);
        let result = check_representative(&candidate, &[10]);
        assert_matches!(result, Err(CoreError::InvariantViolation(msg)) if msg == REPRESENTATIVE_CONFLICT_MESSAGE);
    }

    #[test]
    fn non_representative_always_accepted() {
        let create = RepresentativeCandidate::for_create(1, false);
        assert!(check_representative(&create, &[10]).is_ok());

        let update = RepresentativeCandidate::for_update(1, 11, false);
        assert!(check_representative(&update, &[10]).is_ok());
    }

    #[test]
    fn resaving_current_representative_is_idempotent() {
        let candidate = RepresentativeCandidate::for_update(1, 10, true);
        assert!(check_representative(&candidate, &[10]).is_ok());
    }

    #[test]
    fn promoting_other_image_over_existing_is_rejected() {
        let candidate = RepresentativeCandidate::for_update(1, 11, true);
        assert_matches!(
            check_representative(&candidate, &[10]),
            Err(CoreError::InvariantViolation(_))
        );
    }

    #[test]
    fn already_broken_state_still_accepts_self() {
        // Legacy rows with two representatives: re-saving one of them must not fail.
        let candidate = RepresentativeCandidate::for_update(1, 11, true);
        assert!(check_representative(&candidate, &[10, 11]).is_ok());
    }
}

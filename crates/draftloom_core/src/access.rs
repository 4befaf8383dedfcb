//! Access-control gate for draft visibility tiers.
//!
//! # Responsibility
//! - Resolve one permission tier per (draft, viewer) pair.
//! - Answer the read/write questions asked by every store entry point.
//!
//! # Invariants
//! - `shared_with` is consulted only while visibility is `shared`.
//! - Write access is limited to the owner and shared collaborators.

use crate::model::draft::{Draft, Visibility};

/// Permission tier resolved for one viewer against one draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTier {
    /// The draft's owner.
    Owner,
    /// Member of the sharing list while visibility is shared.
    Collaborator,
    /// Anyone, while visibility is public.
    PublicReader,
    /// No access.
    None,
}

/// Resolves the viewer's permission tier for one draft.
///
/// Owner wins over collaborator, which wins over public reader; the first
/// matching tier is returned.
pub fn resolve_tier(draft: &Draft, viewer_id: &str) -> AccessTier {
    if viewer_id == draft.owner_id {
        return AccessTier::Owner;
    }
    if draft.visibility == Visibility::Shared && draft.shared_with.contains(viewer_id) {
        return AccessTier::Collaborator;
    }
    if draft.visibility == Visibility::Public {
        return AccessTier::PublicReader;
    }
    AccessTier::None
}

/// Returns whether the viewer may read the draft at all.
pub fn can_read(draft: &Draft, viewer_id: &str) -> bool {
    resolve_tier(draft, viewer_id) != AccessTier::None
}

/// Returns whether the viewer may mutate the draft.
///
/// Shared collaborators are trusted as equal editors.
pub fn can_write(draft: &Draft, viewer_id: &str) -> bool {
    matches!(
        resolve_tier(draft, viewer_id),
        AccessTier::Owner | AccessTier::Collaborator
    )
}

#[cfg(test)]
mod tests {
    use super::{can_read, can_write, resolve_tier, AccessTier};
    use crate::model::draft::{Draft, Visibility};

    fn draft_with(visibility: Visibility, shared_with: &[&str]) -> Draft {
        let mut draft = Draft::new("writer-aria", "Gate test", "body", visibility, 1_000);
        draft.shared_with = shared_with.iter().map(|id| id.to_string()).collect();
        draft
    }

    #[test]
    fn owner_is_resolved_regardless_of_visibility() {
        for visibility in [Visibility::Private, Visibility::Shared, Visibility::Public] {
            let draft = draft_with(visibility, &[]);
            assert_eq!(resolve_tier(&draft, "writer-aria"), AccessTier::Owner);
            assert!(can_read(&draft, "writer-aria"));
            assert!(can_write(&draft, "writer-aria"));
        }
    }

    #[test]
    fn private_draft_rejects_everyone_but_owner() {
        let draft = draft_with(Visibility::Private, &[]);
        assert_eq!(resolve_tier(&draft, "writer-jules"), AccessTier::None);
        assert!(!can_read(&draft, "writer-jules"));
        assert!(!can_write(&draft, "writer-jules"));
    }

    #[test]
    fn shared_draft_grants_listed_collaborators_write_access() {
        let draft = draft_with(Visibility::Shared, &["writer-jules"]);
        assert_eq!(resolve_tier(&draft, "writer-jules"), AccessTier::Collaborator);
        assert!(can_write(&draft, "writer-jules"));

        assert_eq!(resolve_tier(&draft, "writer-ronin"), AccessTier::None);
        assert!(!can_read(&draft, "writer-ronin"));
    }

    #[test]
    fn sharing_list_is_ignored_unless_visibility_is_shared() {
        let draft = draft_with(Visibility::Private, &["writer-jules"]);
        assert_eq!(resolve_tier(&draft, "writer-jules"), AccessTier::None);
    }

    #[test]
    fn public_draft_is_readable_but_not_writable_by_strangers() {
        let draft = draft_with(Visibility::Public, &[]);
        assert_eq!(resolve_tier(&draft, "writer-ronin"), AccessTier::PublicReader);
        assert!(can_read(&draft, "writer-ronin"));
        assert!(!can_write(&draft, "writer-ronin"));
    }

    #[test]
    fn owner_tier_wins_over_sharing_list_membership() {
        let draft = draft_with(Visibility::Shared, &["writer-aria"]);
        assert_eq!(resolve_tier(&draft, "writer-aria"), AccessTier::Owner);
    }
}

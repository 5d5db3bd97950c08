//! Cache tags, page paths, and the content-type → invalidation dispatch table.
//!
//! Stored results (data snapshots and rendered pages) are labeled with tags;
//! the revalidation endpoint maps a changed content type to the superset of
//! tags and page paths that render data derived from it. Invalidating an
//! already-invalidated tag is a no-op, so at-least-once webhook delivery is
//! harmless.

use crate::model::ContentType;

/// Cache tags for data snapshots and the pages that consume them.
pub mod tag {
    pub const HOME: &str = "home";
    pub const PROJECTS: &str = "projects";
    pub const PROJECT_DETAIL: &str = "project-detail";
    pub const TEAM: &str = "team";
    pub const STATISTICS: &str = "statistics";
    pub const CATEGORIES: &str = "categories";

    /// Every known tag, for the unknown-content-type fallback.
    pub const ALL: &[&str] = &[HOME, PROJECTS, PROJECT_DETAIL, TEAM, STATISTICS, CATEGORIES];
}

/// Fixed page paths. Project-detail pages are dynamic and are invalidated
/// via [`tag::PROJECT_DETAIL`] rather than enumerated here.
pub mod path {
    pub const HOME: &str = "/";
    pub const PROJECTS: &str = "/projects";
    pub const TEAM: &str = "/team";

    pub const ALL: &[&str] = &[HOME, PROJECTS, TEAM];
}

/// The set of invalidations a content-type change requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidationPlan {
    /// Fixed page paths to evict.
    pub paths: &'static [&'static str],
    /// Cache tags to evict (covers data snapshots and dynamic pages).
    pub tags: &'static [&'static str],
}

impl InvalidationPlan {
    /// True when this plan is the full superset used for unknown types.
    pub fn is_full(&self) -> bool {
        self.paths == path::ALL && self.tags == tag::ALL
    }
}

/// Map a content type to its invalidation plan.
///
/// Each type maps to the superset of pages that render data derived from it:
/// a project-statistic change surfaces on the home page, the project list,
/// and the project detail route. Unknown types invalidate everything —
/// freshness over efficiency, never a silent drop.
pub fn plan_for(content_type: ContentType) -> InvalidationPlan {
    match content_type {
        ContentType::HomePage => InvalidationPlan {
            paths: &[path::HOME],
            tags: &[tag::HOME],
        },
        ContentType::Project | ContentType::ProjectStatistic => InvalidationPlan {
            paths: &[path::HOME, path::PROJECTS],
            tags: &[tag::HOME, tag::PROJECTS, tag::PROJECT_DETAIL],
        },
        ContentType::Statistic => InvalidationPlan {
            paths: &[path::HOME],
            tags: &[tag::HOME, tag::STATISTICS],
        },
        ContentType::TeamMember => InvalidationPlan {
            paths: &[path::HOME, path::TEAM],
            tags: &[tag::HOME, tag::TEAM],
        },
        ContentType::Category => InvalidationPlan {
            paths: &[path::HOME, path::PROJECTS],
            tags: &[tag::HOME, tag::PROJECTS, tag::PROJECT_DETAIL, tag::CATEGORIES],
        },
        ContentType::Unknown => InvalidationPlan {
            paths: path::ALL,
            tags: tag::ALL,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_change_hits_home_list_and_detail() {
        let plan = plan_for(ContentType::Project);
        assert!(plan.tags.contains(&tag::HOME));
        assert!(plan.tags.contains(&tag::PROJECTS));
        assert!(plan.tags.contains(&tag::PROJECT_DETAIL));
        assert!(plan.paths.contains(&path::HOME));
        assert!(plan.paths.contains(&path::PROJECTS));
    }

    #[test]
    fn project_statistic_matches_project_plan() {
        assert_eq!(
            plan_for(ContentType::ProjectStatistic),
            plan_for(ContentType::Project)
        );
    }

    #[test]
    fn team_member_change_does_not_touch_projects() {
        let plan = plan_for(ContentType::TeamMember);
        assert!(!plan.tags.contains(&tag::PROJECTS));
        assert!(plan.tags.contains(&tag::TEAM));
        assert!(plan.tags.contains(&tag::HOME));
    }

    #[test]
    fn unknown_invalidates_everything() {
        let plan = plan_for(ContentType::Unknown);
        assert!(plan.is_full());
        for t in tag::ALL {
            assert!(plan.tags.contains(t));
        }
        for p in path::ALL {
            assert!(plan.paths.contains(p));
        }
    }

    #[test]
    fn every_known_type_invalidates_home_when_it_feeds_home() {
        // All current content types surface on the home page.
        for ct in [
            ContentType::HomePage,
            ContentType::Project,
            ContentType::ProjectStatistic,
            ContentType::Statistic,
            ContentType::TeamMember,
            ContentType::Category,
        ] {
            assert!(plan_for(ct).tags.contains(&tag::HOME), "{ct:?}");
        }
    }
}

//! Query engine
//!
//! Pure read-only derivations over one in-memory profile snapshot:
//! skill-based project filtering, skill-frequency ranking, and free-text
//! search. Nothing in this module mutates the profile; every operation
//! re-derives its view from the snapshot it is handed, so repeated calls
//! on the same snapshot are identical.

pub mod filter;
pub mod search;
pub mod skills;

pub use filter::filter_projects_by_skill;
pub use search::{locate_profile, search_profile, ProfileLookup, ProfileSummary, SearchResults};
pub use skills::{top_skills, SkillCount, DEFAULT_TOP_SKILLS_LIMIT};

//! Database schemas for Folio
//!
//! Defines the MongoDB document structure for the singleton profile.

mod profile;

pub use profile::{
    Education, Links, ProfileDoc, ProfileMeta, Project, ProjectLinks, Skills, WorkEntry,
    PROFILE_COLLECTION,
};

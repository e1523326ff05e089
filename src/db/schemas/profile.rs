//! Profile document schema
//!
//! The singleton portfolio record: bio, education, skills, projects,
//! and work history. At most one non-deleted profile exists at any time;
//! the unique email index is belt-and-braces on top of that invariant.

use bson::{doc, oid::ObjectId, DateTime};
use mongodb::{options::IndexOptions, IndexModel};
use serde::{Deserialize, Serialize};

/// Collection name for the profile singleton
pub const PROFILE_COLLECTION: &str = "profiles";

/// Storage bookkeeping carried on the profile document.
///
/// The store stamps these on every write; reads filter on `is_deleted`,
/// so a deleted profile is indistinguishable from an absent one.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ProfileMeta {
    #[serde(default)]
    pub is_deleted: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

/// An education entry
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub gpa: String,
}

/// Declared skills, grouped by category
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Skills {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

/// External links for a project
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ProjectLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

/// A portfolio project
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub links: ProjectLinks,
    /// Skill names; may contain duplicates and mixed case
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

/// A work history entry
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct WorkEntry {
    pub company: String,
    pub position: String,
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Profile-level external links
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Links {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
}

/// The profile document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ProfileDoc {
    /// MongoDB document ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    /// Storage bookkeeping (timestamps, soft-delete flag)
    #[serde(default)]
    pub metadata: ProfileMeta,

    pub name: String,
    pub email: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub work: Vec<WorkEntry>,
    #[serde(default)]
    pub links: Links,
}

impl ProfileDoc {
    /// Check required fields before a write.
    ///
    /// Mirrors the schema: name, email, education institution/degree,
    /// project title/description, work company/position/duration.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        if self.email.trim().is_empty() {
            return Err("email is required".to_string());
        }

        for (i, edu) in self.education.iter().enumerate() {
            if edu.institution.trim().is_empty() {
                return Err(format!("education[{}].institution is required", i));
            }
            if edu.degree.trim().is_empty() {
                return Err(format!("education[{}].degree is required", i));
            }
        }

        for (i, project) in self.projects.iter().enumerate() {
            if project.title.trim().is_empty() {
                return Err(format!("projects[{}].title is required", i));
            }
            if project.description.trim().is_empty() {
                return Err(format!("projects[{}].description is required", i));
            }
        }

        for (i, entry) in self.work.iter().enumerate() {
            if entry.company.trim().is_empty() {
                return Err(format!("work[{}].company is required", i));
            }
            if entry.position.trim().is_empty() {
                return Err(format!("work[{}].position is required", i));
            }
            if entry.duration.trim().is_empty() {
                return Err(format!("work[{}].duration is required", i));
            }
        }

        Ok(())
    }

    /// Indexes applied to the profile collection at startup:
    /// unique email (scoped to live documents so a soft-deleted profile
    /// does not block re-creation), skill lookups, and the text index
    /// backing the indexed search strategy.
    pub fn indexes() -> Vec<IndexModel> {
        vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .partial_filter_expression(doc! { "metadata.is_deleted": false })
                        .name("email_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "skills.technical": 1 })
                .options(
                    IndexOptions::builder()
                        .name("technical_skills_index".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "projects.skills": 1 })
                .options(
                    IndexOptions::builder()
                        .name("project_skills_index".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! {
                    "name": "text",
                    "bio": "text",
                    "projects.title": "text",
                    "projects.description": "text",
                })
                .options(
                    IndexOptions::builder()
                        .name("profile_text_index".to_string())
                        .build(),
                )
                .build(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_profile() -> ProfileDoc {
        ProfileDoc {
            name: "Jane Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_minimal_profile() {
        assert!(valid_profile().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_name() {
        let mut profile = valid_profile();
        profile.name = "  ".to_string();
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_incomplete_project() {
        let mut profile = valid_profile();
        profile.projects.push(Project {
            title: "Portfolio Website".to_string(),
            description: String::new(),
            ..Default::default()
        });
        let err = profile.validate().unwrap_err();
        assert!(err.contains("projects[0].description"));
    }

    #[test]
    fn test_validate_rejects_incomplete_work_entry() {
        let mut profile = valid_profile();
        profile.work.push(WorkEntry {
            company: "TechStart".to_string(),
            position: "Software Engineer".to_string(),
            duration: String::new(),
            ..Default::default()
        });
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_declares_text_index() {
        let text = ProfileDoc::indexes()
            .into_iter()
            .find(|m| matches!(m.keys.get_str("name"), Ok("text")));
        assert!(text.is_some(), "text index over name/bio/project fields");
    }

    #[test]
    fn test_email_unique_index_is_scoped_to_live_documents() {
        let email = ProfileDoc::indexes()
            .into_iter()
            .find(|m| matches!(m.keys.get_i32("email"), Ok(1)))
            .expect("email index");

        let options = email.options.expect("email index options");
        assert_eq!(options.unique, Some(true));
        let partial = options
            .partial_filter_expression
            .expect("partial filter on live documents");
        assert_eq!(partial.get_bool("metadata.is_deleted").unwrap(), false);
    }

    #[test]
    fn test_fresh_metadata_serializes_as_live() {
        let json = serde_json::to_value(valid_profile()).unwrap();
        assert_eq!(json["metadata"]["is_deleted"], serde_json::json!(false));
        // No timestamps until the store stamps them
        assert!(json["metadata"].get("created_at").is_none());
    }
}

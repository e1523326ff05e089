//! Query routes
//!
//! Thin handlers that translate HTTP query parameters into query engine
//! calls and serialize the results:
//!
//! - `GET /api/projects?skill={skill}` - projects filtered by skill
//! - `GET /api/skills/top?limit={n}` - skill-frequency ranking
//! - `GET /api/search?q={query}` - free-text search

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use crate::db::schemas::Project;
use crate::query::{
    filter_projects_by_skill, locate_profile, search_profile, top_skills, SearchResults,
    SkillCount, DEFAULT_TOP_SKILLS_LIMIT,
};
use crate::routes::{folio_error_response, json_response, parse_query_params};
use crate::server::AppState;
use crate::types::FolioError;

/// Response envelope for GET /api/projects
#[derive(Serialize)]
struct FilteredProjects {
    skill: String,
    count: usize,
    projects: Vec<Project>,
}

/// Response envelope for GET /api/skills/top
#[derive(Serialize)]
struct TopSkills {
    limit: usize,
    total: usize,
    skills: Vec<SkillCount>,
}

/// Response envelope for GET /api/search
#[derive(Serialize)]
struct SearchResponse {
    query: String,
    results: SearchResults,
}

/// Handle GET /api/projects?skill={skill}
pub async fn handle_filter_projects(
    state: Arc<AppState>,
    query: Option<&str>,
) -> Response<Full<Bytes>> {
    let params = parse_query_params(query.unwrap_or(""));
    let skill = match params.get("skill").filter(|s| !s.is_empty()) {
        Some(s) => s.clone(),
        None => return folio_error_response(&FolioError::MissingParameter("Skill")),
    };

    let profile = match state.store.fetch().await {
        Ok(Some(p)) => p,
        Ok(None) => return folio_error_response(&FolioError::ProfileNotFound),
        Err(e) => return folio_error_response(&e),
    };

    let projects = filter_projects_by_skill(&profile, &skill);

    json_response(
        StatusCode::OK,
        &FilteredProjects {
            skill,
            count: projects.len(),
            projects,
        },
    )
}

/// Handle GET /api/skills/top?limit={n}
pub async fn handle_top_skills(
    state: Arc<AppState>,
    query: Option<&str>,
) -> Response<Full<Bytes>> {
    let params = parse_query_params(query.unwrap_or(""));
    let limit = parse_limit(params.get("limit").map(String::as_str));

    let profile = match state.store.fetch().await {
        Ok(Some(p)) => p,
        Ok(None) => return folio_error_response(&FolioError::ProfileNotFound),
        Err(e) => return folio_error_response(&e),
    };

    let skills = top_skills(&profile, limit);

    json_response(
        StatusCode::OK,
        &TopSkills {
            limit,
            total: skills.len(),
            skills,
        },
    )
}

/// Handle GET /api/search?q={query}
///
/// No match is not an error: the envelope comes back with a null profile
/// and empty lists.
pub async fn handle_search(state: Arc<AppState>, query: Option<&str>) -> Response<Full<Bytes>> {
    let params = parse_query_params(query.unwrap_or(""));
    let q = match params.get("q").filter(|s| !s.is_empty()) {
        Some(s) => s.clone(),
        None => return folio_error_response(&FolioError::MissingParameter("Query")),
    };

    let results = match locate_profile(&state.store, &q).await {
        Ok(Some(profile)) => search_profile(&profile, &q),
        Ok(None) => SearchResults::empty(),
        Err(e) => return folio_error_response(&e),
    };

    json_response(StatusCode::OK, &SearchResponse { query: q, results })
}

/// Parse the `limit` parameter; unparsable or non-positive values fall
/// back to the default.
fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|n| *n > 0)
        .map(|n| n as usize)
        .unwrap_or(DEFAULT_TOP_SKILLS_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit_default_when_missing() {
        assert_eq!(parse_limit(None), 10);
    }

    #[test]
    fn test_parse_limit_default_when_unparsable() {
        assert_eq!(parse_limit(Some("abc")), 10);
        assert_eq!(parse_limit(Some("")), 10);
    }

    #[test]
    fn test_parse_limit_default_when_non_positive() {
        assert_eq!(parse_limit(Some("0")), 10);
        assert_eq!(parse_limit(Some("-5")), 10);
    }

    #[test]
    fn test_parse_limit_accepts_positive() {
        assert_eq!(parse_limit(Some("3")), 3);
        assert_eq!(parse_limit(Some("25")), 25);
    }

    #[test]
    fn test_no_match_search_envelope_shape() {
        let response = SearchResponse {
            query: "xyz-nonexistent".to_string(),
            results: SearchResults::empty(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["query"], "xyz-nonexistent");
        assert!(json["results"]["profile"].is_null());
        assert_eq!(json["results"]["projects"], serde_json::json!([]));
        assert_eq!(json["results"]["skills"], serde_json::json!([]));
    }
}

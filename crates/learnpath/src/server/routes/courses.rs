//! Roadmap and objective read endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::{Error, Result};
use crate::server::state::AppState;

/// Query parameters for course lookups
#[derive(Debug, Deserialize)]
pub struct CourseQuery {
    /// Course name entered at ingestion time
    #[serde(default)]
    pub name: String,
}

impl CourseQuery {
    fn name(&self) -> Result<&str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::invalid_input("Course name is required"));
        }
        Ok(name)
    }
}

/// GET /api/roadmap?name= - Roadmap for a course
pub async fn get_roadmap(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> Result<Json<serde_json::Value>> {
    let name = query.name()?;
    let record = state.repository().find_by_course_name(name).await?;

    Ok(Json(json!({
        "course_name": record.roadmap.course_name,
        "roadmap": record.roadmap,
    })))
}

/// GET /api/objective?name= - Extracted objective text for a course
pub async fn get_objective(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> Result<Json<serde_json::Value>> {
    let name = query.name()?;
    let record = state.repository().find_by_course_name(name).await?;

    Ok(Json(json!({ "objective": record.objective })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_name_is_trimmed_for_lookup() {
        let query = CourseQuery {
            name: "  Alice ".to_string(),
        };
        assert_eq!(query.name().unwrap(), "Alice");
    }

    #[test]
    fn blank_query_name_is_rejected() {
        let query = CourseQuery {
            name: "   ".to_string(),
        };
        assert!(matches!(query.name(), Err(Error::InvalidInput(_))));
    }
}

//! Structural validation of generation output against the roadmap schema
//!
//! The model response is untrusted free text. This module reconciles it with
//! the strict downstream contract: either the whole response parses into a
//! [`Roadmap`] or validation fails naming the defect. Malformed units are
//! never silently dropped.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::{Roadmap, Unit};

/// Parse raw generation output and validate it against the roadmap schema
///
/// Unit order in the response array is preserved in the returned value. The
/// only repair performed is stripping a Markdown code fence wrapping the
/// JSON; everything else is reject-only.
pub fn parse_and_validate(raw: &str) -> Result<Roadmap> {
    let cleaned = strip_code_fence(raw);

    let value: Value = serde_json::from_str(cleaned)
        .map_err(|e| Error::schema(format!("malformed JSON: {}", e)))?;

    let road_map = value
        .get("roadMap")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::schema("missing roadMap"))?;

    let course_name = road_map
        .get("course_name")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| Error::schema("missing required keys: course_name"))?;

    let units_value = road_map
        .get("roadmap")
        .and_then(Value::as_array)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| Error::schema("missing required keys: roadmap"))?;

    let mut units = Vec::with_capacity(units_value.len());
    for (index, unit_value) in units_value.iter().enumerate() {
        units.push(validate_unit(index, unit_value)?);
    }

    Ok(Roadmap {
        course_name: course_name.to_string(),
        units,
    })
}

/// Validate one element of the `roadmap` array
fn validate_unit(index: usize, value: &Value) -> Result<Unit> {
    let unit = value
        .as_object()
        .ok_or_else(|| Error::schema(format!("unit {}: not an object", index)))?;

    let unit_number = required_string(unit, "unit_number", index)?;
    let unit_title = required_string(unit, "unit_title", index)?;

    let topics_value = unit
        .get("topics")
        .and_then(Value::as_array)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| Error::schema(format!("unit {}: missing or empty 'topics'", index)))?;

    let mut topics = Vec::with_capacity(topics_value.len());
    for (topic_index, topic) in topics_value.iter().enumerate() {
        let topic = topic
            .as_str()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                Error::schema(format!(
                    "unit {}: topic {} is missing or empty",
                    index, topic_index
                ))
            })?;
        topics.push(topic.to_string());
    }

    Ok(Unit {
        unit_number,
        unit_title,
        topics,
    })
}

fn required_string(
    unit: &serde_json::Map<String, Value>,
    field: &str,
    index: usize,
) -> Result<String> {
    unit.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::schema(format!("unit {}: missing or empty '{}'", index, field)))
}

/// Strip a Markdown code fence wrapping the response, if present
///
/// Models occasionally ignore the JSON mime-type hint and wrap the payload
/// in ```json fences.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

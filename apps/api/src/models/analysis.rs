use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Everything one submission sends to the completions endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description: String,
    pub model_id: String,
}

/// Analysis returned by the model, in the camelCase shape the system prompt asks for.
///
/// The content comes from a non-deterministic external source and is not
/// validated: numbers that are missing or non-numeric become `None`, lists that
/// are missing or malformed become empty, and out-of-range values are kept.
/// Only a JSON object is accepted; fields are never taken by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
    /// 0-10
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_assessment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar_check: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_structure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_structure: Option<f64>,
    pub missing_skills: Vec<String>,
    pub keyword_alignment: Vec<String>,
    pub recommendations: Vec<String>,
}

impl<'de> Deserialize<'de> for AnalysisResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        let mut score = |key: &str| fields.remove(key).and_then(lenient_score);

        let match_score = score("matchScore");
        let formatting = score("formatting");
        let language_assessment = score("languageAssessment");
        let readability = score("readability");
        let grammar_check = score("grammarCheck");
        let project_structure = score("projectStructure");
        let experience_structure = score("experienceStructure");

        let mut list = |key: &str| fields.remove(key).map(lenient_list).unwrap_or_default();

        Ok(AnalysisResult {
            match_score,
            formatting,
            language_assessment,
            readability,
            grammar_check,
            project_structure,
            experience_structure,
            missing_skills: list("missingSkills"),
            keyword_alignment: list("keywordAlignment"),
            recommendations: list("recommendations"),
        })
    }
}

fn lenient_score(value: Value) -> Option<f64> {
    let score = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    score.filter(|v| v.is_finite())
}

fn lenient_list(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.into_iter().filter_map(list_item).collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    }
}

fn list_item(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

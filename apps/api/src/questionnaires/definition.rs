//! Questionnaire authoring input and its checks.

use serde::{Deserialize, Serialize};

use crate::naming::slugify;
use crate::profile::builder::QuestionnaireType;

const DEFAULT_DURATION_MINUTES: i32 = 15;
const DEFAULT_CREATED_BY: &str = "user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    OpenEnded,
    MultipleChoice,
    YesNo,
    Scale,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::OpenEnded => "open_ended",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::YesNo => "yes_no",
            QuestionType::Scale => "scale",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open_ended" => Some(QuestionType::OpenEnded),
            "multiple_choice" => Some(QuestionType::MultipleChoice),
            "yes_no" => Some(QuestionType::YesNo),
            "scale" => Some(QuestionType::Scale),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateQuestionnaireRequest {
    pub questionnaire_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub questionnaire_type: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionInput>,
    pub estimated_duration: Option<i32>,
    pub is_public: Option<bool>,
    pub created_by: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionInput {
    pub id: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    pub options: Option<Vec<String>>,
    pub required: Option<bool>,
    #[serde(rename = "helpText")]
    pub help_text: Option<String>,
    /// `[category, subcategory]` pairs.
    pub tags: Option<Vec<Vec<String>>>,
    pub question_order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionnaireQuestion {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub required: bool,
    #[serde(rename = "helpText")]
    pub help_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Vec<String>>>,
    pub question_order: i32,
}

#[derive(Debug, Clone)]
pub struct NewQuestionnaire {
    pub questionnaire_id: String,
    pub title: String,
    pub description: String,
    pub questionnaire_type: QuestionnaireType,
    pub category: String,
    pub subcategory: Option<String>,
    pub questions: Vec<QuestionnaireQuestion>,
    pub estimated_duration: i32,
    pub is_public: bool,
    pub created_by: String,
}

pub fn validate_questionnaire(
    request: CreateQuestionnaireRequest,
) -> Result<NewQuestionnaire, String> {
    let title = request
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    let questionnaire_type = request.questionnaire_type.as_deref().map(str::trim);

    let (Some(title), Some(type_name)) = (title, questionnaire_type.filter(|t| !t.is_empty()))
    else {
        return Err(
            "Please provide a title, questionnaire type, and at least one question".to_string(),
        );
    };
    if request.questions.is_empty() {
        return Err(
            "Please provide a title, questionnaire type, and at least one question".to_string(),
        );
    }

    let questionnaire_type = QuestionnaireType::parse(type_name)
        .ok_or_else(|| format!("Invalid questionnaire type: {type_name}"))?;

    let category = match questionnaire_type {
        QuestionnaireType::Centrepiece => "centrepiece".to_string(),
        other => request
            .category
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| format!("Please select a {} for this questionnaire type", other.as_str()))?,
    };

    let questionnaire_id = request
        .questionnaire_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| slugify(&title));
    if questionnaire_id.is_empty() {
        return Err("Title must contain at least one letter or digit".to_string());
    }

    let questions = request
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| validate_question(i + 1, q))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewQuestionnaire {
        questionnaire_id,
        title,
        description: request.description.unwrap_or_default(),
        questionnaire_type,
        category,
        subcategory: request.subcategory.filter(|s| !s.trim().is_empty()),
        questions,
        estimated_duration: request.estimated_duration.unwrap_or(DEFAULT_DURATION_MINUTES),
        is_public: request.is_public.unwrap_or(false),
        created_by: request
            .created_by
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CREATED_BY.to_string()),
    })
}

fn validate_question(number: usize, input: QuestionInput) -> Result<QuestionnaireQuestion, String> {
    let id = input
        .id
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| format!("Question {number} missing required field: id"))?;
    let text = input
        .text
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| format!("Question {number} missing required field: text"))?;

    let question_type = match input.question_type.as_deref() {
        None => QuestionType::OpenEnded,
        Some(raw) => QuestionType::parse(raw)
            .ok_or_else(|| format!("Question {number} has invalid type: {raw}"))?,
    };

    if question_type == QuestionType::MultipleChoice
        && input.options.as_ref().map_or(0, Vec::len) < 2
    {
        return Err(format!("Question {number} must have at least 2 options"));
    }

    Ok(QuestionnaireQuestion {
        id,
        text,
        question_type,
        options: input.options,
        required: input.required.unwrap_or(true),
        help_text: input.help_text.unwrap_or_default(),
        tags: input.tags,
        question_order: input.question_order.unwrap_or(number as i32),
    })
}

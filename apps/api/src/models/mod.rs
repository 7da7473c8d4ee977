pub mod profile;
pub mod questionnaire;
pub mod survey;
pub mod validation;

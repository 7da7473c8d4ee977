use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a transcript message. The fallback session only ever holds the
/// opening AI turn; user turns live in the backend's session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Ai,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// First-turn session handed out when the interview backend is unavailable.
/// The backend owns real session state; this one is never advanced here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackSession {
    pub session_id: String,
    pub messages: Vec<InterviewMessage>,
    pub questionnaire_id: String,
    pub participant_name: String,
    pub status: String,
}

impl FallbackSession {
    pub fn start(participant_name: &str, questionnaire_id: &str, now: DateTime<Utc>) -> Self {
        let session_id = format!(
            "interview_{}_{}_{}",
            now.timestamp_millis(),
            participant_name,
            questionnaire_id
        );
        let greeting = InterviewMessage {
            id: "1".to_string(),
            speaker: Speaker::Ai,
            content: format!(
                "Hi {participant_name}! I'm excited to learn more about you. Let's start with \
                 something simple - can you tell me a bit about yourself and what you do?"
            ),
            timestamp: now,
        };

        Self {
            session_id,
            messages: vec![greeting],
            questionnaire_id: questionnaire_id.to_string(),
            participant_name: participant_name.to_string(),
            status: "active".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fallback_session_shape() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let s = FallbackSession::start("Rachita", "centrepiece_v1", now);
        assert_eq!(s.session_id, "interview_1700000000123_Rachita_centrepiece_v1");
        assert_eq!(s.status, "active");
        assert_eq!(s.messages.len(), 1);
        assert_eq!(s.messages[0].speaker, Speaker::Ai);
        assert!(s.messages[0].content.starts_with("Hi Rachita!"));
    }

    #[test]
    fn test_message_serializes_type_tag() {
        let now = Utc.timestamp_millis_opt(0).unwrap();
        let s = FallbackSession::start("A", "q", now);
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["messages"][0]["type"], "ai");
        assert_eq!(v["messages"][0]["id"], "1");
    }
}

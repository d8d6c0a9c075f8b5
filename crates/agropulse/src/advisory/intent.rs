use serde::{Deserialize, Serialize};

/// Topic of a farmer's question. The first matching keyword group wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionIntent {
    Irrigation,
    Market,
    Pest,
    Fertilizer,
    General,
}

const KEYWORDS: [(QuestionIntent, &[&str]); 4] = [
    (QuestionIntent::Irrigation, &["irrigat"]),
    (QuestionIntent::Market, &["sell", "market"]),
    (QuestionIntent::Pest, &["pest", "disease"]),
    (QuestionIntent::Fertilizer, &["fertiliz"]),
];

impl QuestionIntent {
    pub fn classify(question: &str) -> Self {
        let question = question.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| question.contains(keyword)))
            .map(|(intent, _)| *intent)
            .unwrap_or(QuestionIntent::General)
    }

    /// `General` when there is no question at all.
    pub fn from_question(question: Option<&str>) -> Self {
        question.map(Self::classify).unwrap_or(QuestionIntent::General)
    }

    pub const fn label(self) -> &'static str {
        match self {
            QuestionIntent::Irrigation => "irrigation",
            QuestionIntent::Market => "market",
            QuestionIntent::Pest => "pest",
            QuestionIntent::Fertilizer => "fertilizer",
            QuestionIntent::General => "general",
        }
    }
}

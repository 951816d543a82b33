//! Sentiment codes attached to review rows

/// Review sentiment as encoded in `sentiment_analysis`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Sentiment::Negative),
            1 => Some(Sentiment::Neutral),
            2 => Some(Sentiment::Positive),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Sentiment::Negative => 0,
            Sentiment::Neutral => 1,
            Sentiment::Positive => 2,
        }
    }
}

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(LeadId);
id_newtype!(BroadcastId);

/// Pipeline phase of a lead. Declaration order is the pipeline order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    New,
    Contact,
    Deal,
    Payment,
    Done,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::New,
        Stage::Contact,
        Stage::Deal,
        Stage::Payment,
        Stage::Done,
    ];

    pub fn position(self) -> usize {
        match self {
            Stage::New => 0,
            Stage::Contact => 1,
            Stage::Deal => 2,
            Stage::Payment => 3,
            Stage::Done => 4,
        }
    }

    /// The following stage, or `None` at `Done`.
    pub fn next(self) -> Option<Stage> {
        Stage::ALL.get(self.position() + 1).copied()
    }

    /// The preceding stage, or `None` at `New`.
    pub fn prev(self) -> Option<Stage> {
        self.position()
            .checked_sub(1)
            .and_then(|idx| Stage::ALL.get(idx).copied())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::New => "new",
            Stage::Contact => "contact",
            Stage::Deal => "deal",
            Stage::Payment => "payment",
            Stage::Done => "done",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::New => "New",
            Stage::Contact => "Contact",
            Stage::Deal => "Deal",
            Stage::Payment => "Payment",
            Stage::Done => "Done",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Stage::New => "📥",
            Stage::Contact => "💬",
            Stage::Deal => "🤝",
            Stage::Payment => "💳",
            Stage::Done => "✅",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value '{0}'")]
pub struct ParseKindError(pub String);

impl FromStr for Stage {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == needle)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

/// Broadcast audience: every lead, or the leads of one open stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    #[default]
    All,
    New,
    Contact,
    Deal,
    Payment,
}

impl Segment {
    pub const ALL: [Segment; 5] = [
        Segment::All,
        Segment::New,
        Segment::Contact,
        Segment::Deal,
        Segment::Payment,
    ];

    pub fn stage(self) -> Option<Stage> {
        match self {
            Segment::All => None,
            Segment::New => Some(Stage::New),
            Segment::Contact => Some(Stage::Contact),
            Segment::Deal => Some(Stage::Deal),
            Segment::Payment => Some(Stage::Payment),
        }
    }

    pub fn matches(self, stage: Stage) -> bool {
        match self.stage() {
            None => true,
            Some(target) => target == stage,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Segment::All => "all",
            Segment::New => "new",
            Segment::Contact => "contact",
            Segment::Deal => "deal",
            Segment::Payment => "payment",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Segment {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Segment::ALL
            .into_iter()
            .find(|segment| segment.as_str() == needle)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_id: Option<i64>,
    pub stage: Stage,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub notes: String,
    /// Display label such as "2 hours ago"; not a clock value.
    #[serde(default)]
    pub last_contact: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_neighbours_follow_pipeline_order() {
        assert_eq!(Stage::New.prev(), None);
        assert_eq!(Stage::New.next(), Some(Stage::Contact));
        assert_eq!(Stage::Deal.prev(), Some(Stage::Contact));
        assert_eq!(Stage::Deal.next(), Some(Stage::Payment));
        assert_eq!(Stage::Done.next(), None);
        assert_eq!(Stage::Done.prev(), Some(Stage::Payment));
    }

    #[test]
    fn stage_positions_match_table() {
        for (idx, stage) in Stage::ALL.into_iter().enumerate() {
            assert_eq!(stage.position(), idx);
        }
    }

    #[test]
    fn stage_parses_wire_names_and_rejects_unknown() {
        assert_eq!("payment".parse::<Stage>(), Ok(Stage::Payment));
        assert_eq!(" Done ".parse::<Stage>(), Ok(Stage::Done));
        assert!("archived".parse::<Stage>().is_err());
    }

    #[test]
    fn stage_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&Stage::Contact).expect("json"),
            "\"contact\""
        );
        let parsed: Stage = serde_json::from_str("\"deal\"").expect("parse");
        assert_eq!(parsed, Stage::Deal);
    }

    #[test]
    fn done_is_not_a_broadcast_segment() {
        assert!("done".parse::<Segment>().is_err());
        assert!(Segment::All.matches(Stage::Done));
        assert!(!Segment::Payment.matches(Stage::Done));
        assert!(Segment::Payment.matches(Stage::Payment));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-way sentiment label derived from the sign of a polarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Positive,
    Negative,
    Neutral,
}

impl Classification {
    /// Exact sign rule, no tolerance band around zero. `-0.0` and `NaN` are neutral.
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Classification::Positive
        } else if score < 0.0 {
            Classification::Negative
        } else {
            Classification::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Classification::Positive => "Positive",
            Classification::Negative => "Negative",
            Classification::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::polarity;

    const ALL: [Classification; 3] = [
        Classification::Positive,
        Classification::Negative,
        Classification::Neutral,
    ];

    #[test]
    fn sign_rule() {
        assert_eq!(Classification::from_score(0.3), Classification::Positive);
        assert_eq!(Classification::from_score(f64::MIN_POSITIVE), Classification::Positive);
        assert_eq!(Classification::from_score(-0.3), Classification::Negative);
        assert_eq!(Classification::from_score(-1.0), Classification::Negative);
        assert_eq!(Classification::from_score(0.0), Classification::Neutral);
        assert_eq!(Classification::from_score(-0.0), Classification::Neutral);
        assert_eq!(Classification::from_score(f64::NAN), Classification::Neutral);
    }

    #[test]
    fn neutral_iff_score_is_zero() {
        for text in ["", "I love this", "I hate this", "plain words here", "not good", ":)"] {
            let score = polarity::score(text);
            let class = Classification::from_score(score);
            assert!(ALL.contains(&class));
            assert_eq!(class == Classification::Neutral, score == 0.0, "{:?}", text);
        }
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Classification::Negative).unwrap();
        assert_eq!(json, "\"Negative\"");
        for class in &ALL {
            assert_eq!(
                serde_json::to_string(class).unwrap(),
                format!("\"{}\"", class)
            );
        }
    }
}

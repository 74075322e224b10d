//! Lexicon based polarity scoring.
//!
//! Each sentiment word found in the text contributes its polarity. A preceding
//! intensifier scales it, a preceding negation flips and halves it. The score
//! of a text is the mean of all contributions, so texts without a single
//! sentiment word score exactly `0.0`.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Multiplier applied to a word that follows a negation.
const NEGATION_FACTOR: f64 = -0.5;

static SHARED: OnceLock<PolarityScorer> = OnceLock::new();

/// Polarity of `text` in `[-1.0, 1.0]` using the built-in lexicon.
pub fn score(text: &str) -> f64 {
    SHARED.get_or_init(PolarityScorer::new).score(text)
}

pub struct PolarityScorer {
    words: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
    emoticons: HashMap<&'static str, f64>,
}

impl PolarityScorer {
    pub fn new() -> Self {
        Self {
            words: build_word_lexicon(),
            intensifiers: build_intensifiers(),
            emoticons: build_emoticons(),
        }
    }

    pub fn score(&self, text: &str) -> f64 {
        let mut contributions: Vec<f64> = Vec::new();
        let mut intensity = 1.0;
        let mut negated = false;

        for raw in text.split_whitespace() {
            if let Some(&p) = self.emoticons.get(raw) {
                contributions.push(p);
                intensity = 1.0;
                negated = false;
                continue;
            }

            let normalized = raw.replace('\u{2019}', "'").to_lowercase();
            let token = normalized.trim_matches(|c: char| !c.is_alphanumeric());
            if token.is_empty() {
                continue;
            }

            if is_negation(token) {
                negated = true;
                continue;
            }

            if let Some(&factor) = self.intensifiers.get(token) {
                intensity *= factor;
                continue;
            }

            match self.words.get(token) {
                Some(&p) => {
                    let mut value = (p * intensity).clamp(-1.0, 1.0);
                    if negated {
                        value *= NEGATION_FACTOR;
                    }
                    contributions.push(value);
                    intensity = 1.0;
                    negated = false;
                }
                None => {
                    // Any other word breaks the modifier chain.
                    intensity = 1.0;
                    negated = false;
                }
            }
        }

        if contributions.is_empty() {
            return 0.0;
        }

        let mean = contributions.iter().sum::<f64>() / contributions.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

impl Default for PolarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_negation(token: &str) -> bool {
    matches!(
        token,
        "not" | "no" | "never" | "nor" | "neither" | "cannot" | "dont" | "doesnt" | "didnt"
            | "isnt" | "wasnt" | "cant" | "wont"
    ) || token.ends_with("n't")
}

fn build_word_lexicon() -> HashMap<&'static str, f64> {
    [
        // Positive
        ("love", 0.5),
        ("loved", 0.7),
        ("loving", 0.6),
        ("lovely", 0.5),
        ("like", 0.1),
        ("liked", 0.2),
        ("good", 0.7),
        ("great", 0.8),
        ("nice", 0.6),
        ("fine", 0.4),
        ("ok", 0.5),
        ("okay", 0.5),
        ("cool", 0.35),
        ("happy", 0.8),
        ("glad", 0.5),
        ("pleased", 0.5),
        ("enjoy", 0.4),
        ("enjoyed", 0.4),
        ("fun", 0.3),
        ("funny", 0.25),
        ("interesting", 0.5),
        ("helpful", 0.5),
        ("useful", 0.3),
        ("beautiful", 0.85),
        ("pretty", 0.25),
        ("awesome", 1.0),
        ("amazing", 0.6),
        ("excellent", 1.0),
        ("fantastic", 0.4),
        ("wonderful", 1.0),
        ("brilliant", 0.9),
        ("perfect", 1.0),
        ("best", 1.0),
        ("better", 0.5),
        ("impressive", 1.0),
        ("incredible", 0.9),
        ("superb", 1.0),
        ("outstanding", 0.5),
        ("favorite", 0.5),
        ("favourite", 0.5),
        ("recommend", 0.3),
        ("thanks", 0.2),
        ("thank", 0.2),
        ("agree", 0.3),
        ("right", 0.29),
        ("correct", 0.3),
        ("clean", 0.37),
        ("easy", 0.43),
        ("fast", 0.2),
        ("smart", 0.21),
        ("clever", 0.5),
        ("valuable", 0.3),
        ("positive", 0.23),
        ("exciting", 0.3),
        ("excited", 0.38),
        ("successful", 0.75),
        ("win", 0.8),
        ("solid", 0.1),
        // Negative
        ("hate", -0.8),
        ("hated", -0.9),
        ("dislike", -0.5),
        ("bad", -0.7),
        ("worse", -0.4),
        ("worst", -1.0),
        ("terrible", -1.0),
        ("awful", -1.0),
        ("horrible", -1.0),
        ("dreadful", -1.0),
        ("poor", -0.4),
        ("sad", -0.5),
        ("unhappy", -0.6),
        ("angry", -0.5),
        ("annoying", -0.8),
        ("annoyed", -0.4),
        ("boring", -1.0),
        ("bored", -0.5),
        ("ugly", -0.7),
        ("stupid", -0.8),
        ("dumb", -0.38),
        ("useless", -0.5),
        ("wrong", -0.5),
        ("broken", -0.4),
        ("slow", -0.3),
        ("hard", -0.29),
        ("difficult", -0.5),
        ("disappointing", -0.6),
        ("disappointed", -0.75),
        ("frustrating", -0.4),
        ("confusing", -0.3),
        ("ridiculous", -0.33),
        ("pathetic", -1.0),
        ("disgusting", -1.0),
        ("nasty", -1.0),
        ("fail", -0.5),
        ("failed", -0.5),
        ("sucks", -0.3),
        ("waste", -0.2),
        ("problem", -0.2),
        ("negative", -0.3),
        ("sorry", -0.5),
        ("lose", -0.4),
        ("mediocre", -0.5),
    ]
    .into_iter()
    .collect()
}

fn build_intensifiers() -> HashMap<&'static str, f64> {
    [
        ("very", 1.3),
        ("really", 1.3),
        ("so", 1.2),
        ("too", 1.2),
        ("extremely", 1.5),
        ("incredibly", 1.5),
        ("absolutely", 1.4),
        ("totally", 1.3),
        ("highly", 1.4),
        ("super", 1.3),
        ("quite", 1.1),
        ("somewhat", 0.7),
        ("slightly", 0.5),
        ("barely", 0.4),
    ]
    .into_iter()
    .collect()
}

fn build_emoticons() -> HashMap<&'static str, f64> {
    [
        (":)", 0.5),
        (":-)", 0.5),
        ("(:", 0.5),
        (";)", 0.5),
        (":D", 1.0),
        (":-D", 1.0),
        ("<3", 1.0),
        (":(", -0.75),
        (":-(", -0.75),
        ("):", -0.75),
        (":'(", -0.75),
        (">:(", -1.0),
    ]
    .into_iter()
    .collect()
}

//! Advisory preview - Anteprima dell'emozione mentre l'utente scrive
//!
//! Algoritmo diverso da quello del server:
//! niente punteggi né soglie, solo appartenenza di parole chiave per categoria.
//! Il risultato è un suggerimento, può divergere dall'etichetta salvata.

use crate::classifier::Classify;
use crate::label::Emotion;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

const HAPPY: &[&str] = &[
    "happy", "glad", "joy", "yay", "great", "excellent", "delighted", "cheerful", "pleased",
    "wonderful", "smile", "love", "enjoy", "blessed", "fantastic", "good", "lovely", "positive",
    "content", "ecstatic", "elated", "jubilant", "thrilled", "blissful", "radiant", "joyful",
    "merry", "optimistic", "satisfied", "gratified", "beaming", "glowing", "jolly", "fortunate",
    "grateful", "amused", "encouraged", "fulfilled", "hopeful", "peaceful", "proud", "relaxed",
    "relieved", "respected", "terrific", "tranquil", "valued",
];

const SAD: &[&str] = &[
    "sad", "upset", "unfortunate", "sorry", "miss you", "disappointed", "depressed", "unhappy",
    "heartbroken", "down", "regret", "grief", "lonely", "gloomy", "crying", "tears", "hurt",
    "painful", "melancholy", "despair", "hopeless", "miserable", "devastated", "blue",
    "despondent", "disheartened", "forlorn", "sorrowful", "dejected", "downcast", "wistful",
    "brokenhearted", "crushed", "distressed", "woeful", "anguished", "desolate", "somber",
    "ashamed", "burdened", "drained", "empty", "exhausted", "helpless", "humbled", "inadequate",
    "isolated", "mournful", "neglected", "rejected", "worthless", "wounded",
];

const ANGRY: &[&str] = &[
    "angry", "mad", "frustrated", "annoyed", "furious", "irritated", "outraged", "hate", "rage",
    "fed up", "upset", "pissed", "infuriated", "livid", "hostile", "disgusted", "resent", "irate",
    "fuming", "enraged", "seething", "bitter", "incensed", "indignant", "offended", "agitated",
    "exasperated", "resentful", "provoked", "vexed", "irked", "aggravated", "displeased",
    "contempt", "loathing", "scorn", "wrath", "betrayed", "humiliated", "peeved", "spiteful",
    "vengeful", "vindictive",
];

const EXCITED: &[&str] = &[
    "excited", "thrilled", "awesome", "amazing", "pumped", "stoked", "ecstatic", "enthusiastic",
    "eager", "hyped", "can't wait", "looking forward", "incredible", "unbelievable", "wow",
    "fantastic", "brilliant", "exhilarated", "energized", "animated", "vibrant", "passionate",
    "zealous", "fervent", "ardent", "elated", "euphoric", "overjoyed", "jubilant", "exuberant",
    "enthralled", "delighted", "psyched", "buzzed", "fired up", "amped", "perky", "frisky",
    "giddy", "giggly", "zestful",
];

const SURPRISED: &[&str] = &[
    "surprised", "wow", "omg", "unexpected", "cannot believe", "shocked", "astonished",
    "stunned", "startled", "amazed", "speechless", "whoa", "what", "really", "seriously",
    "unbelievable", "no way", "astounded", "dumbfounded", "flabbergasted", "thunderstruck",
    "awestruck", "taken aback", "bewildered", "dazed", "floored", "staggered", "baffled",
    "perplexed", "blindsided", "gobsmacked", "mind blown", "jaw dropped", "jolted", "alarmed",
];

lazy_static! {
    static ref BUILTIN: KeywordClassifier = KeywordClassifier::with_keywords([
        (Emotion::Happy, HAPPY),
        (Emotion::Sad, SAD),
        (Emotion::Angry, ANGRY),
        (Emotion::Excited, EXCITED),
        (Emotion::Surprised, SURPRISED),
    ])
    .expect("built-in keyword lists are valid");
}

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("the preview never names `neutral`, it yields no signal instead")]
    NeutralCategory,

    #[error("keyword list for {0} is empty")]
    EmptyCategory(Emotion),

    #[error("failed to compile keyword list: {0}")]
    Regex(#[from] regex::Error),
}

/// Classificatore a parole chiave: la prima categoria (nell'ordine dato)
/// che contiene una parola presente nel testo vince. Match case-insensitive
/// come sottostringa, senza confini di parola.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    categories: Vec<(Emotion, Regex)>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl KeywordClassifier {
    /// Costruisce un classificatore con liste personalizzate.
    /// L'ordine delle categorie è l'ordine di priorità.
    pub fn with_keywords<I, K, S>(categories: I) -> Result<Self, PreviewError>
    where
        I: IntoIterator<Item = (Emotion, K)>,
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();

        for (emotion, keywords) in categories {
            if emotion.is_neutral() {
                return Err(PreviewError::NeutralCategory);
            }

            let alternation = keywords
                .into_iter()
                .map(|k| regex::escape(k.as_ref()))
                .filter(|k| !k.is_empty())
                .collect::<Vec<_>>()
                .join("|");
            if alternation.is_empty() {
                return Err(PreviewError::EmptyCategory(emotion));
            }

            let regex = RegexBuilder::new(&alternation)
                .case_insensitive(true)
                .build()?;
            compiled.push((emotion, regex));
        }

        Ok(Self {
            categories: compiled,
        })
    }

    /// Ordine in cui le categorie vengono valutate
    pub fn priority(&self) -> impl Iterator<Item = Emotion> + '_ {
        self.categories.iter().map(|(e, _)| *e)
    }
}

impl Classify for KeywordClassifier {
    /// `None` = nessun segnale (diverso da `neutral`)
    type Label = Option<Emotion>;

    fn classify(&self, text: Option<&str>) -> Option<Emotion> {
        let text = text.filter(|t| !t.is_empty())?;

        self.categories
            .iter()
            .find(|(_, regex)| regex.is_match(text))
            .map(|(emotion, _)| *emotion)
    }
}

//! Emotion label - Enumerazione chiusa delle emozioni associate ai messaggi

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Etichetta emotiva di un messaggio.
///
/// L'insieme è chiuso: classificatori, mappatura di presentazione e schema di
/// persistenza fanno tutti `match` esaustivi su questo enum, quindi aggiungere
/// una nuova etichetta rompe la compilazione in ogni punto da aggiornare.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Sad,
    Angry,
    Excited,
    Surprised,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown emotion label: {0:?}")]
pub struct UnknownEmotion(pub String);

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Excited,
        Emotion::Surprised,
    ];

    /// Nome canonico, lo stesso usato in JSON e nella colonna `messages.emotion`
    pub const fn as_str(&self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Excited => "excited",
            Emotion::Surprised => "surprised",
        }
    }

    pub fn is_neutral(&self) -> bool {
        matches!(self, Emotion::Neutral)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| UnknownEmotion(s.to_string()))
    }
}

// usato da sqlx (#[sqlx(try_from = "String")]) per decodificare le righe salvate
impl TryFrom<String> for Emotion {
    type Error = UnknownEmotion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

//! Authoritative classifier - Classificazione definitiva eseguita lato server all'invio

use crate::label::Emotion;
use crate::lexicon::Lexicon;
use crate::sentiment::SentimentScorer;
use tracing::debug;

/// Capacità comune ai due classificatori: testo -> etichetta.
/// Ogni implementazione sceglie liberamente algoritmo e lessico,
/// l'unico contratto condiviso è l'enumerazione [`Emotion`].
pub trait Classify {
    type Label;

    fn classify(&self, text: Option<&str>) -> Self::Label;
}

/// Punteggio minimo (incluso) per `excited`
pub const EXCITED_MIN_SCORE: f64 = 3.0;
/// Sotto questa soglia (esclusa) il messaggio è `angry` invece di `sad`
pub const ANGRY_MAX_SCORE: f64 = -2.0;
/// Numero di `!` che rende `surprised` un testo a punteggio zero
pub const SURPRISE_MIN_BANGS: usize = 2;

/// Scala delle soglie, valutata in ordine: il primo ramo vero vince.
/// Il fallback sulla punteggiatura scatta solo con punteggio esattamente zero.
pub fn emotion_for_score(score: f64, text: &str) -> Emotion {
    if score >= EXCITED_MIN_SCORE {
        Emotion::Excited
    } else if score > 0.0 {
        Emotion::Happy
    } else if score < ANGRY_MAX_SCORE {
        Emotion::Angry
    } else if score < 0.0 {
        Emotion::Sad
    } else if text.matches('!').count() >= SURPRISE_MIN_BANGS {
        Emotion::Surprised
    } else {
        Emotion::Neutral
    }
}

/// Classificatore basato su uno scorer di sentiment generico.
/// Puro e senza stato mutabile: può essere condiviso tra richieste concorrenti.
#[derive(Debug, Clone)]
pub struct SentimentClassifier<S = Lexicon> {
    scorer: S,
}

impl SentimentClassifier<Lexicon> {
    pub fn with_builtin_lexicon() -> Self {
        Self::new(Lexicon::builtin())
    }
}

impl Default for SentimentClassifier<Lexicon> {
    fn default() -> Self {
        Self::with_builtin_lexicon()
    }
}

impl<S: SentimentScorer> SentimentClassifier<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }
}

impl<S: SentimentScorer> Classify for SentimentClassifier<S> {
    type Label = Emotion;

    fn classify(&self, text: Option<&str>) -> Emotion {
        let text = match text {
            Some(t) if !t.is_empty() => t,
            _ => return Emotion::Neutral,
        };

        // score NaN (scorer esterno difettoso) -> nessun ramo numerico è vero,
        // si ricade sulla punteggiatura e quindi dentro l'enumerazione
        let score = self.scorer.score(text);
        let emotion = emotion_for_score(score, text);
        debug!(score, emotion = %emotion, "Message classified");
        emotion
    }
}

//! Sentiment scorer - Punteggio lessicale con segno di un testo

use crate::lexicon::Lexicon;
use std::sync::Arc;

/// Risultato dettagliato di un'analisi
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Analysis {
    /// Somma dei pesi delle parole riconosciute
    pub score: f64,
    /// `score` diviso il numero di token (0 se il testo non ha token)
    pub comparative: f64,
    pub tokens: Vec<String>,
    /// Parole che hanno contribuito positivamente (dopo l'eventuale negazione)
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

/// Contratto dello scorer: testo -> punteggio reale con segno.
/// Parole positive aumentano il punteggio, negative lo diminuiscono, le altre valgono zero.
pub trait SentimentScorer {
    fn analyze(&self, text: &str) -> Analysis;

    fn score(&self, text: &str) -> f64 {
        self.analyze(text).score
    }
}

impl<S: SentimentScorer + ?Sized> SentimentScorer for &S {
    fn analyze(&self, text: &str) -> Analysis {
        (**self).analyze(text)
    }
}

impl<S: SentimentScorer + ?Sized> SentimentScorer for Arc<S> {
    fn analyze(&self, text: &str) -> Analysis {
        (**self).analyze(text)
    }
}

/// Minuscolo, rimozione della punteggiatura ASCII (tranne apostrofi e trattini),
/// split sugli spazi.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .filter(|c| !(c.is_ascii_punctuation() && *c != '\'' && *c != '-'))
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

impl SentimentScorer for Lexicon {
    fn analyze(&self, text: &str) -> Analysis {
        let tokens = tokenize(text);
        let mut analysis = Analysis::default();

        for (i, token) in tokens.iter().enumerate() {
            let Some(mut weight) = self.weight(token) else {
                continue;
            };
            if i > 0 && self.is_negator(&tokens[i - 1]) {
                weight = -weight;
            }

            if weight > 0.0 {
                analysis.positive.push(token.clone());
            } else if weight < 0.0 {
                analysis.negative.push(token.clone());
            }
            analysis.score += weight;
        }

        if !tokens.is_empty() {
            analysis.comparative = analysis.score / tokens.len() as f64;
        }
        analysis.tokens = tokens;
        analysis
    }
}

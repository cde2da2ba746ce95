use crate::core::candidate::Candidate;
use crate::core::config::AutocompleteConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub find_similar: bool,
    pub suggest_on_all_words: bool,
}

/// Decides whether `label` matches the typed `text`.
///
/// Matching is a case-folded prefix test. With `suggest_on_all_words` every
/// word of the text is tried against every word of the label, falling back to
/// a prefix test of the whole label.
pub fn is_match(label: &str, text: &str, options: MatchOptions) -> bool {
    if !options.find_similar {
        return true;
    }

    let label_lower = label.to_lowercase();
    let text_lower = text.to_lowercase();

    if options.suggest_on_all_words {
        let text_words = text_lower.split_whitespace().collect::<Vec<_>>();
        let any_word = label_lower.split_whitespace().any(|word| {
            text_words
                .iter()
                .any(|text_word| word.starts_with(text_word))
        });
        if any_word {
            return true;
        }
    }

    label_lower.starts_with(&text_lower)
}

/// Builds the visible candidate list from source candidates.
#[derive(Debug, Clone)]
pub struct SuggestionFilter {
    attribute: String,
    options: MatchOptions,
    allow_similar: bool,
    max_limit: usize,
}

impl SuggestionFilter {
    pub fn from_config(config: &AutocompleteConfig) -> Self {
        Self {
            attribute: config.suggestion_attribute.clone(),
            options: MatchOptions {
                find_similar: config.find_similar,
                suggest_on_all_words: config.suggest_on_all_words,
            },
            allow_similar: config.allow_similar,
            max_limit: config.max_limit,
        }
    }

    pub fn matches(&self, candidate: &Candidate, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let Some(label) = candidate.label(&self.attribute) else {
            tracing::trace!(attribute = %self.attribute, %candidate, "candidate has no label");
            return false;
        };
        is_match(label, text, self.options)
    }

    /// Appends `candidate` to `visible` if it matches and may be admitted.
    /// Returns whether it was appended.
    pub fn admit(&self, visible: &mut Vec<Candidate>, candidate: &Candidate, text: &str) -> bool {
        if !self.matches(candidate, text) {
            return false;
        }
        if !self.allow_similar && self.is_repeated(visible, candidate) {
            return false;
        }
        if self.max_limit > 0 && visible.len() >= self.max_limit {
            return false;
        }
        visible.push(candidate.clone());
        true
    }

    fn is_repeated(&self, visible: &[Candidate], candidate: &Candidate) -> bool {
        let label = candidate.label(&self.attribute);
        visible
            .iter()
            .any(|existing| existing.label(&self.attribute) == label)
    }
}

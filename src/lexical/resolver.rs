//! Resolution of lexical capabilities per language and derivation of
//! the analyzed forms of a token.

use super::{
    decode_stem, MorphAnalyzer, NullMorphAnalyzer, NullSpellChecker, SpellChecker,
};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Resolves spell checkers and morph analyzers for a language hint and
/// derives the set of word forms a token is analyzed under.
///
/// Resolution order is the hinted language first, then the configured
/// languages in order; a language with no resource falls through to the
/// next, and the null capability backstops the chain. An unspecified
/// hint resolves to every available resource.
pub struct LexicalResolver<'a> {
    languages: &'a [String],
    spells: &'a FxHashMap<String, Arc<dyn SpellChecker>>,
    morphs: &'a FxHashMap<String, Arc<dyn MorphAnalyzer>>,
    deep: bool,
    null_spell: NullSpellChecker,
    null_morph: NullMorphAnalyzer,
}

impl<'a> LexicalResolver<'a> {
    pub fn new(
        languages: &'a [String],
        spells: &'a FxHashMap<String, Arc<dyn SpellChecker>>,
        morphs: &'a FxHashMap<String, Arc<dyn MorphAnalyzer>>,
        deep: bool,
    ) -> Self {
        Self {
            languages,
            spells,
            morphs,
            deep,
            null_spell: NullSpellChecker,
            null_morph: NullMorphAnalyzer,
        }
    }

    fn resolution_order<'b>(&'b self, hint: Option<&'b str>) -> impl Iterator<Item = &'b str> {
        hint.into_iter()
            .chain(self.languages.iter().map(String::as_str))
    }

    /// Spell checkers consulted for a hint. An unspecified hint yields
    /// every configured checker; a hinted lookup yields the first
    /// resolving checker, falling back to the null checker.
    pub fn spells_for(&self, hint: Option<&str>) -> Vec<&dyn SpellChecker> {
        match hint {
            None => {
                let available: Vec<&dyn SpellChecker> = self
                    .languages
                    .iter()
                    .filter_map(|language| self.spells.get(language))
                    .map(|spell| spell.as_ref())
                    .collect();
                if available.is_empty() {
                    vec![&self.null_spell]
                } else {
                    available
                }
            }
            Some(hint) => {
                let resolved = self
                    .resolution_order(Some(hint))
                    .find_map(|language| self.spells.get(language))
                    .map(|spell| spell.as_ref())
                    .unwrap_or(&self.null_spell);
                vec![resolved]
            }
        }
    }

    /// Morph analyzers consulted for a hint, with the same resolution
    /// rules as [`LexicalResolver::spells_for`].
    pub fn morphs_for(&self, hint: Option<&str>) -> Vec<&dyn MorphAnalyzer> {
        match hint {
            None => {
                let available: Vec<&dyn MorphAnalyzer> = self
                    .languages
                    .iter()
                    .filter_map(|language| self.morphs.get(language))
                    .map(|morph| morph.as_ref())
                    .collect();
                if available.is_empty() {
                    vec![&self.null_morph]
                } else {
                    available
                }
            }
            Some(hint) => {
                let resolved = self
                    .resolution_order(Some(hint))
                    .find_map(|language| self.morphs.get(language))
                    .map(|morph| morph.as_ref())
                    .unwrap_or(&self.null_morph);
                vec![resolved]
            }
        }
    }

    /// All forms a token is analyzed under, in a stable order with
    /// duplicates removed: the surface, the lower-cased lemma, decoded
    /// spell-checker stems (deep only), and morphological normal forms.
    ///
    /// A pronoun-placeholder lemma carries no lexical content, so it is
    /// replaced by the lower-cased surface.
    pub fn forms(
        &self,
        surface: &str,
        lemma: &str,
        hint: Option<&str>,
        pronoun_placeholder: Option<&str>,
    ) -> Vec<String> {
        fn push(forms: &mut Vec<String>, form: String) {
            if !form.is_empty() && !forms.contains(&form) {
                forms.push(form);
            }
        }

        let mut forms: Vec<String> = Vec::new();

        push(&mut forms, surface.to_string());

        let lemma = if pronoun_placeholder.is_some_and(|placeholder| lemma == placeholder) {
            surface.to_lowercase()
        } else {
            lemma.to_lowercase()
        };
        push(&mut forms, lemma.clone());

        if self.deep {
            for spell in self.spells_for(hint) {
                let encoding = spell.encoding();
                for stem in spell.stems(&lemma) {
                    if let Some(decoded) = decode_stem(&stem, encoding) {
                        push(&mut forms, decoded);
                    }
                }
            }
        }

        for morph in self.morphs_for(hint) {
            for normal_form in morph.normal_forms(&lemma) {
                push(&mut forms, normal_form);
            }
        }

        forms
    }

    /// Whether any consulted spell checker recognizes `word`
    pub fn is_dictionary_word(&self, hint: Option<&str>, word: &str) -> bool {
        self.spells_for(hint).iter().any(|spell| spell.is_valid(word))
    }

    /// Reduce `word` to its letters, unless deep analysis can vouch for
    /// it as a real word, in which case it is kept whole.
    pub fn keep_only_letters_or_dictionary_word(&self, hint: Option<&str>, word: &str) -> String {
        if self.deep && self.is_dictionary_word(hint, word) {
            word.to_string()
        } else {
            word.chars().filter(|ch| ch.is_alphabetic()).collect()
        }
    }
}

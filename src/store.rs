//! In-memory quote list. Owns id assignment and shape normalization.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::QuoteError;
use crate::model::{ALL_CATEGORIES, Quote, QuoteId, RawQuote};

mod normalize;

pub use self::normalize::normalize;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteStore {
    quotes: Vec<Quote>,
}

impl QuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from lenient records, normalizing them first.
    pub fn from_raw(raw: Vec<RawQuote>) -> Self {
        Self {
            quotes: normalize(raw),
        }
    }

    pub fn from_quotes(quotes: Vec<Quote>) -> Self {
        Self::from_raw(quotes.into_iter().map(RawQuote::from).collect())
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn all(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn get(&self, id: &QuoteId) -> Option<&Quote> {
        self.quotes.iter().find(|q| &q.id == id)
    }

    pub fn contains(&self, id: &QuoteId) -> bool {
        self.get(id).is_some()
    }

    /// Quotes in `category`, in store order. `"all"` disables the filter.
    pub fn by_category(&self, category: &str) -> Vec<Quote> {
        if category == ALL_CATEGORIES {
            return self.quotes.clone();
        }
        self.quotes
            .iter()
            .filter(|q| q.category == category)
            .cloned()
            .collect()
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.quotes
            .iter()
            .map(|q| q.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn add(&mut self, text: &str, category: &str) -> Result<Quote, QuoteError> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() {
            return Err(QuoteError::validation("quote text must not be empty"));
        }
        if category.is_empty() {
            return Err(QuoteError::validation("quote category must not be empty"));
        }

        let quote = Quote::new(self.fresh_id(), text, category);
        self.quotes.push(quote.clone());
        tracing::debug!(id = %quote.id, category = %quote.category, "added quote");
        Ok(quote)
    }

    /// Appends quotes whose ids are not yet present. Returns how many were appended.
    pub fn extend_new(&mut self, quotes: Vec<Quote>) -> usize {
        let mut appended = 0;
        for q in quotes {
            if self.contains(&q.id) {
                tracing::debug!(id = %q.id, "skipping quote with existing id");
                continue;
            }
            self.quotes.push(q);
            appended += 1;
        }
        appended
    }

    /// Overwrites the record with the same id in place. Returns the previous value, or
    /// `None` (and changes nothing) when the id is unknown.
    pub fn replace(&mut self, quote: Quote) -> Option<Quote> {
        let slot = self.quotes.iter_mut().find(|q| q.id == quote.id)?;
        Some(std::mem::replace(slot, quote))
    }

    /// Swaps in the result of a merge.
    pub fn set_all(&mut self, quotes: Vec<Quote>) {
        self.quotes = quotes;
    }

    fn fresh_id(&self) -> QuoteId {
        loop {
            let id = QuoteId::generate();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}

/// Uniform pick from `subset`; `None` when it is empty.
pub fn pick_random(subset: &[Quote]) -> Option<&Quote> {
    pick_random_with(subset, &mut rand::thread_rng())
}

pub fn pick_random_with<'a, R: Rng + ?Sized>(
    subset: &'a [Quote],
    rng: &mut R,
) -> Option<&'a Quote> {
    subset.choose(rng)
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;

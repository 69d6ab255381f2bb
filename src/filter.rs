//! Search-and-facet predicate shared by every listing.
//!
//! A record matches a [`Query`] when the free-text needle is a case-insensitive substring of at least one of its
//! search fields *and* its categorical facet is admitted by the query's [`Selection`]. There is no ranking and no
//! tokenization.

use std::fmt::Debug;

use tracing::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::types::Selection;

/// A record that can be searched and narrowed by one categorical facet.
pub trait Searchable {
    type Facet: Debug + Clone + PartialEq;

    /// Name of the facet as shown to the user and in filter errors.
    const FACET_NAME: &'static str;

    /// Strings the free-text query is matched against.
    fn search_fields(&self) -> Vec<&str>;

    fn facet(&self) -> Self::Facet;
}

/// Normalized free-text needle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchText {
    needle:       String,
    fold_accents: bool,
}

impl SearchText {
    pub fn new<S: AsRef<str>>(raw: S, fold_accents: bool) -> Self {
        Self {
            needle: normalize(raw.as_ref(), fold_accents),
            fold_accents,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    pub fn found_in(&self, haystack: &str) -> bool {
        self.is_empty() || normalize(haystack, self.fold_accents).contains(self.needle.as_str())
    }
}

fn normalize(text: &str, fold_accents: bool) -> String {
    let lower = text.to_lowercase();
    if fold_accents {
        lower.nfd().filter(|c| !is_combining_mark(*c)).collect()
    } else {
        lower
    }
}

#[derive(Debug, Clone)]
pub struct Query<F> {
    search: SearchText,
    facet:  Selection<F>,
}

impl<F> Default for Query<F> {
    fn default() -> Self {
        Self {
            search: SearchText::default(),
            facet:  Selection::All,
        }
    }
}

impl<F> Query<F>
where
    F: Debug + Clone + PartialEq,
{
    pub fn new(search: SearchText, facet: Selection<F>) -> Self {
        Self { search, facet }
    }

    pub fn with_search(mut self, search: SearchText) -> Self {
        self.search = search;
        self
    }

    pub fn with_facet(mut self, facet: Selection<F>) -> Self {
        self.facet = facet;
        self
    }

    pub fn search(&self) -> &SearchText {
        &self.search
    }

    pub fn facet(&self) -> &Selection<F> {
        &self.facet
    }

    pub fn is_unrestricted(&self) -> bool {
        self.search.is_empty() && self.facet.is_all()
    }

    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: Searchable<Facet = F>,
    {
        let matches_search = self.search.is_empty()
            || record
                .search_fields()
                .into_iter()
                .any(|field| self.search.found_in(field));

        matches_search && self.facet.admits(&record.facet())
    }

    /// Records that match, in their source order.
    pub fn apply<'a, R>(&self, records: &'a [R]) -> Vec<&'a R>
    where
        R: Searchable<Facet = F>,
    {
        let filtered: Vec<&R> = records.iter().filter(|r| self.matches(*r)).collect();
        debug!(
            "{} filter '{}' with search '{}': {} of {} records",
            R::FACET_NAME,
            self.facet_label(),
            self.search.as_str(),
            filtered.len(),
            records.len()
        );
        filtered
    }

    fn facet_label(&self) -> String {
        match &self.facet {
            Selection::All => "ALL".to_string(),
            Selection::Only(value) => format!("{value:?}"),
        }
    }
}

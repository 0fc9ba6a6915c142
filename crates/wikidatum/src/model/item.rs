//! Items and the read-only query surface over them.

use crate::model::term::normalize_code;
use crate::model::{EntityId, Sitelink, Statement, Term};

/// Keeps the terms whose language is in `langs`, or all of them when `langs` is empty.
fn filter_terms<'a, C: AsRef<str>>(terms: &'a [Term], langs: &[C]) -> Vec<&'a Term> {
    terms
        .iter()
        .filter(|t| langs.is_empty() || langs.iter().any(|l| normalize_code(l) == t.lang))
        .collect()
}

/// Read-only access to an item's statements, terms and sitelinks.
///
/// Implementors supply the `all_*` accessors; the filtered lookups are
/// provided. Language and site parameters take anything that is
/// `AsRef<str>` (`&str`, `String`, [`Code`](crate::model::Code)) and are
/// compared on their string form.
pub trait ItemAccess {
    /// The item's id (e.g., `Q42`).
    fn id(&self) -> &EntityId;

    fn all_statements(&self) -> &[Statement];

    fn all_labels(&self) -> &[Term];

    fn all_descriptions(&self) -> &[Term];

    fn all_aliases(&self) -> &[Term];

    fn all_sitelinks(&self) -> &[Sitelink];

    /// Returns the statements for `property` (e.g., "P31"), or all statements.
    fn statements(&self, property: Option<&str>) -> Vec<&Statement> {
        self.all_statements()
            .iter()
            .filter(|s| property.is_none_or(|p| s.property_id().as_str() == p))
            .collect()
    }

    /// Returns the labels in `langs`, or all labels when `langs` is empty.
    fn labels<C: AsRef<str>>(&self, langs: &[C]) -> Vec<&Term>
    where
        Self: Sized,
    {
        filter_terms(self.all_labels(), langs)
    }

    /// Returns the first label in `lang`.
    fn label<C: AsRef<str>>(&self, lang: C) -> Option<&Term>
    where
        Self: Sized,
    {
        let lang = normalize_code(&lang);
        self.all_labels().iter().find(|t| t.lang == lang)
    }

    /// Returns the descriptions in `langs`, or all descriptions when `langs` is empty.
    fn descriptions<C: AsRef<str>>(&self, langs: &[C]) -> Vec<&Term>
    where
        Self: Sized,
    {
        filter_terms(self.all_descriptions(), langs)
    }

    /// Returns the first description in `lang`.
    fn description<C: AsRef<str>>(&self, lang: C) -> Option<&Term>
    where
        Self: Sized,
    {
        let lang = normalize_code(&lang);
        self.all_descriptions().iter().find(|t| t.lang == lang)
    }

    /// Returns the aliases in `langs`, or all aliases when `langs` is empty.
    fn aliases<C: AsRef<str>>(&self, langs: &[C]) -> Vec<&Term>
    where
        Self: Sized,
    {
        filter_terms(self.all_aliases(), langs)
    }

    /// Returns the sitelinks for `sites` (e.g., `["enwiki", "commonswiki"]`),
    /// or all sitelinks when `sites` is empty.
    fn sitelinks<C: AsRef<str>>(&self, sites: &[C]) -> Vec<&Sitelink>
    where
        Self: Sized,
    {
        self.all_sitelinks()
            .iter()
            .filter(|s| sites.is_empty() || sites.iter().any(|c| normalize_code(c) == s.site))
            .collect()
    }

    /// Returns the sitelink for one site shortcode.
    fn sitelink<C: AsRef<str>>(&self, site: C) -> Option<&Sitelink>
    where
        Self: Sized,
    {
        let site = normalize_code(&site);
        self.all_sitelinks().iter().find(|s| s.site == site)
    }
}

/// An item with everything already fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: EntityId,
    statements: Vec<Statement>,
    labels: Vec<Term>,
    descriptions: Vec<Term>,
    aliases: Vec<Term>,
    sitelinks: Vec<Sitelink>,
}

impl Item {
    pub fn new(
        id: EntityId,
        statements: Vec<Statement>,
        labels: Vec<Term>,
        descriptions: Vec<Term>,
        aliases: Vec<Term>,
        sitelinks: Vec<Sitelink>,
    ) -> Self {
        Item {
            id,
            statements,
            labels,
            descriptions,
            aliases,
            sitelinks,
        }
    }
}

impl ItemAccess for Item {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn all_statements(&self) -> &[Statement] {
        &self.statements
    }

    fn all_labels(&self) -> &[Term] {
        &self.labels
    }

    fn all_descriptions(&self) -> &[Term] {
        &self.descriptions
    }

    fn all_aliases(&self) -> &[Term] {
        &self.aliases
    }

    fn all_sitelinks(&self) -> &[Sitelink] {
        &self.sitelinks
    }
}

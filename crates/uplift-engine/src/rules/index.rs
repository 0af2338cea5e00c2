//! The Rule Index: immutable token lookup by category and identity key.
//!
//! Exact lookups are a single hash probe. Import/using lookups that miss fall
//! back to a linear scan over wildcard keys in insertion order; no other
//! category has a fallback.

use glob::Pattern;
use tracing::debug;

use uplift_core::errors::RuleError;
use uplift_core::types::FxHashMap;

use super::category::Category;
use super::key::IdentityKey;
use super::token::Token;

#[derive(Debug, Default)]
pub struct RuleIndex {
    exact: FxHashMap<Category, FxHashMap<IdentityKey, Token>>,
    wildcards: Vec<(Pattern, Token)>,
}

impl RuleIndex {
    pub fn builder() -> RuleIndexBuilder {
        RuleIndexBuilder::default()
    }

    pub fn lookup(&self, category: Category, key: &IdentityKey) -> Option<&Token> {
        if let Some(token) = self.exact.get(&category).and_then(|m| m.get(key)) {
            return Some(token);
        }
        if category != Category::Using {
            return None;
        }
        let IdentityKey::Name(name) = key else {
            return None;
        };
        self.wildcards
            .iter()
            .find(|(pattern, _)| pattern.matches(name))
            .map(|(_, token)| token)
    }

    /// Exact-only lookup, ignoring wildcard keys.
    pub fn lookup_exact(&self, category: Category, key: &IdentityKey) -> Option<&Token> {
        self.exact.get(&category).and_then(|m| m.get(key))
    }

    pub fn len(&self) -> usize {
        self.exact.values().map(|m| m.len()).sum::<usize>() + self.wildcards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if any token is registered for `category`.
    pub fn has_category(&self, category: Category) -> bool {
        self.exact.get(&category).is_some_and(|m| !m.is_empty())
            || (category == Category::Using && !self.wildcards.is_empty())
    }
}

#[derive(Debug, Default)]
pub struct RuleIndexBuilder {
    index: RuleIndex,
}

impl RuleIndexBuilder {
    /// Register a token. A token whose key is already present has its cargo
    /// appended to the existing entry.
    pub fn add(&mut self, token: Token) -> Result<&mut Self, RuleError> {
        if token.key.is_empty() {
            return Err(RuleError::EmptyKey {
                category: token.category.to_string(),
            });
        }

        if token.key.is_wildcard() {
            if token.category != Category::Using {
                return Err(RuleError::WildcardNotSupported {
                    category: token.category.to_string(),
                    key: token.key.to_string(),
                });
            }
            let raw = token.key.primary().to_string();
            let pattern = Pattern::new(&raw).map_err(|e| RuleError::InvalidWildcard {
                pattern: raw.clone(),
                message: e.msg.to_string(),
            })?;
            match self
                .index
                .wildcards
                .iter_mut()
                .find(|(_, existing)| existing.key == token.key)
            {
                Some((_, existing)) => existing.merge(token),
                None => self.index.wildcards.push((pattern, token)),
            }
            return Ok(self);
        }

        let by_key = self.index.exact.entry(token.category).or_default();
        match by_key.get_mut(&token.key) {
            Some(existing) => {
                debug!(category = %token.category, key = %token.key, "merging duplicate rule key");
                existing.merge(token);
            }
            None => {
                by_key.insert(token.key.clone(), token);
            }
        }
        Ok(self)
    }

    pub fn add_all(
        &mut self,
        tokens: impl IntoIterator<Item = Token>,
    ) -> Result<&mut Self, RuleError> {
        for token in tokens {
            self.add(token)?;
        }
        Ok(self)
    }

    pub fn build(self) -> RuleIndex {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::PackageAction;

    fn using(key: &str, description: &str) -> Token {
        Token::new(Category::Using, IdentityKey::name(key)).with_description(description)
    }

    #[test]
    fn test_exact_wins_over_wildcard() {
        let mut builder = RuleIndex::builder();
        builder
            .add(using("System.Web.*", "wild"))
            .unwrap()
            .add(using("System.Web.Mvc", "exact"))
            .unwrap();
        let index = builder.build();

        let hit = index
            .lookup(Category::Using, &IdentityKey::name("System.Web.Mvc"))
            .unwrap();
        assert_eq!(hit.description, "exact");
        let hit = index
            .lookup(Category::Using, &IdentityKey::name("System.Web.Http"))
            .unwrap();
        assert_eq!(hit.description, "wild");
    }

    #[test]
    fn test_wildcard_rejected_outside_using() {
        let mut builder = RuleIndex::builder();
        let err = builder
            .add(Token::new(Category::Namespace, IdentityKey::name("System.*")))
            .unwrap_err();
        assert!(matches!(err, RuleError::WildcardNotSupported { .. }));
    }

    #[test]
    fn test_no_fallback_for_other_categories() {
        let mut builder = RuleIndex::builder();
        builder.add(using("System.*", "wild")).unwrap();
        let index = builder.build();
        assert!(index
            .lookup(Category::Namespace, &IdentityKey::name("System.Web"))
            .is_none());
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut builder = RuleIndex::builder();
        let err = builder
            .add(Token::new(Category::Class, IdentityKey::qualified("  ")))
            .unwrap_err();
        assert!(matches!(err, RuleError::EmptyKey { .. }));
    }

    #[test]
    fn test_invalid_glob_rejected() {
        let mut builder = RuleIndex::builder();
        let err = builder.add(using("System.[*", "bad")).unwrap_err();
        assert!(matches!(err, RuleError::InvalidWildcard { .. }));
    }

    #[test]
    fn test_duplicate_keys_merge() {
        let mut builder = RuleIndex::builder();
        builder
            .add(using("System.Web", "first").with_package(PackageAction::new("A", "1.0")))
            .unwrap()
            .add(using("System.Web", "second").with_package(PackageAction::new("B", "1.0")))
            .unwrap();
        let index = builder.build();
        assert_eq!(index.len(), 1);
        let token = index
            .lookup(Category::Using, &IdentityKey::name("System.Web"))
            .unwrap();
        assert_eq!(token.description, "first");
        assert_eq!(token.packages.len(), 2);
    }
}

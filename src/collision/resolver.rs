// Tue Jan 13 2026 - Alex

use crate::collision::{EntityKey, ReservedWords, Scope};
use crate::config::Config;
use crate::error::{GeneratorError, Result};
use crate::names::sanitize_identifier;
use ahash::{AHashMap, AHashSet};

#[derive(Debug, Clone, Default)]
struct ScopeNames {
    issued: AHashSet<String>,
    blocked: AHashSet<String>,
    owners: AHashMap<EntityKey, String>,
    next_suffix: AHashMap<String, u32>,
}

impl ScopeNames {
    fn is_taken(&self, reserved: &ReservedWords, candidate: &str) -> bool {
        self.issued.contains(candidate) || self.blocked.contains(candidate) || reserved.contains(candidate)
    }
}

/// Hands out identifiers that are unique per scope.
///
/// A free name is issued unchanged. A taken or reserved name gets the
/// first free numeric suffix, counted in the order requests arrive, so a
/// deterministic request order gives deterministic names.
#[derive(Debug, Clone)]
pub struct CollisionResolver {
    scopes: AHashMap<Scope, ScopeNames>,
    reserved: ReservedWords,
    max_suffix: u32,
    separator: String,
    sanitize: bool,
}

impl CollisionResolver {
    pub fn new(config: &Config) -> Self {
        Self {
            scopes: AHashMap::new(),
            reserved: ReservedWords::new(config.all_reserved_words()),
            max_suffix: config.max_name_suffix,
            separator: config.suffix_separator.clone(),
            sanitize: config.sanitize_identifiers,
        }
    }

    /// Makes `name` unavailable in `scope` without issuing it.
    pub fn reserve(&mut self, scope: Scope, name: &str) {
        self.scopes.entry(scope).or_default().blocked.insert(name.to_string());
    }

    pub fn resolve(&mut self, scope: Scope, entity: EntityKey, proposed: &str) -> Result<String> {
        let proposed = if self.sanitize {
            sanitize_identifier(proposed)
        } else {
            proposed.to_string()
        };

        let names = self.scopes.entry(scope).or_default();
        if let Some(existing) = names.owners.get(&entity) {
            return Ok(existing.clone());
        }

        let resolved = if !names.is_taken(&self.reserved, &proposed) {
            proposed
        } else {
            let start = names.next_suffix.get(&proposed).copied().unwrap_or(0);
            let mut found = None;
            for suffix in start..self.max_suffix {
                let candidate = format!("{}{}{}", proposed, self.separator, suffix);
                if !names.is_taken(&self.reserved, &candidate) {
                    found = Some((suffix, candidate));
                    break;
                }
            }
            let Some((suffix, candidate)) = found else {
                return Err(GeneratorError::NameSpaceExhausted {
                    scope: scope.to_string(),
                    proposed,
                });
            };
            log::debug!("Renamed '{}' to '{}' in {}", proposed, candidate, scope);
            names.next_suffix.insert(proposed, suffix + 1);
            candidate
        };

        names.issued.insert(resolved.clone());
        names.owners.insert(entity, resolved.clone());
        Ok(resolved)
    }

    /// Name already issued to `entity`, if any.
    pub fn lookup(&self, scope: Scope, entity: EntityKey) -> Option<&str> {
        self.scopes.get(&scope)?.owners.get(&entity).map(String::as_str)
    }

    pub fn issued_count(&self, scope: Scope) -> usize {
        self.scopes.get(&scope).map(|s| s.issued.len()).unwrap_or(0)
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }
}

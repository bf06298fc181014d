//! Relationship resolver

use crate::config::ResolverConfig;
use crate::path::{find_path, RelationshipPath};
use crate::terms::{classify, NOT_RELATED, SELF};
use lineage_domain::traits::FamilyRepository;
use lineage_domain::PersonId;
use lineage_graph::{GenealogyGraph, Result};
use std::fmt::Display;
use tracing::warn;

/// Names the relationship between two people
///
/// Each call builds its own [`GenealogyGraph`], so lookups are shared within
/// one query and nothing is cached between queries.
///
/// # Examples
///
/// ```
/// use lineage_domain::{ChildRelation, Gender, Person, PersonId};
/// use lineage_kinship::{RelationshipResolver, ResolverConfig};
/// use lineage_store::InMemoryStore;
///
/// let mut store = InMemoryStore::new();
/// let dad = store.create_person(Person::new(PersonId::new(0), Gender::Male)).unwrap();
/// let kid = store.create_person(Person::new(PersonId::new(0), Gender::Female)).unwrap();
/// let union = store.create_union(Some(dad), None).unwrap();
/// store.add_child(union, kid, None, ChildRelation::Biological).unwrap();
///
/// let resolver = RelationshipResolver::new(&store, ResolverConfig::default());
/// assert_eq!(resolver.describe(kid, dad), "Father");
/// assert_eq!(resolver.describe(dad, kid), "Daughter");
/// ```
pub struct RelationshipResolver<'a, R: FamilyRepository> {
    repo: &'a R,
    config: ResolverConfig,
}

impl<'a, R> RelationshipResolver<'a, R>
where
    R: FamilyRepository,
    R::Error: Display,
{
    /// Create a resolver over a repository
    pub fn new(repo: &'a R, config: ResolverConfig) -> Self {
        Self { repo, config }
    }

    /// Resolver with the default search depth
    pub fn with_defaults(repo: &'a R) -> Self {
        Self::new(repo, ResolverConfig::default())
    }

    /// Current configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// What `b` is to `a`, e.g. "Grandfather" when `b` is `a`'s grandfather
    ///
    /// Never fails: unknown people, storage errors and paths beyond the
    /// search depth all read "Not related".
    pub fn describe(&self, a: PersonId, b: PersonId) -> String {
        if a == b {
            return SELF.to_string();
        }

        let graph = GenealogyGraph::new(self.repo);
        match self.describe_in(&graph, a, b) {
            Ok(Some(term)) => term,
            Ok(None) => NOT_RELATED.to_string(),
            Err(e) => {
                warn!(from = %a, to = %b, error = %e, "Relationship lookup failed");
                NOT_RELATED.to_string()
            }
        }
    }

    /// Shortest path from `a` to `b`, `None` when not related within range
    pub fn relationship_path(&self, a: PersonId, b: PersonId) -> Result<Option<RelationshipPath>> {
        let graph = GenealogyGraph::new(self.repo);
        self.path_in(&graph, a, b)
    }

    /// [`Self::describe`] against an existing request-scoped graph
    ///
    /// `None` means no path within the search depth.
    pub fn describe_in(
        &self,
        graph: &GenealogyGraph<'_, R>,
        a: PersonId,
        b: PersonId,
    ) -> Result<Option<String>> {
        let Some(path) = self.path_in(graph, a, b)? else {
            return Ok(None);
        };
        let target = graph.require_person(b)?;
        Ok(Some(classify(path.tally(), target.gender)))
    }

    fn path_in(
        &self,
        graph: &GenealogyGraph<'_, R>,
        a: PersonId,
        b: PersonId,
    ) -> Result<Option<RelationshipPath>> {
        graph.require_person(a)?;
        graph.require_person(b)?;
        find_path(graph, a, b, self.config.effective_max_depth())
    }
}

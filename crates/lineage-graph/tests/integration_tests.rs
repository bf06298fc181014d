//! Integration tests for lineage-graph
//!
//! These tests run generation walks over awkward data: loops created by bad
//! records, cousin marriages and dangling references.

use lineage_domain::{ChildRelation, Gender, Person, PersonId};
use lineage_graph::{GenealogyGraph, MAX_GENERATIONS};
use lineage_store::InMemoryStore;

fn add(store: &mut InMemoryStore, first: &str, gender: Gender) -> PersonId {
    store
        .create_person(Person::new(PersonId::new(0), gender).named(first, "Loop"))
        .unwrap()
}

#[test]
fn test_ancestor_loop_terminates() {
    let mut store = InMemoryStore::new();
    let a = add(&mut store, "Ada", Gender::Female);
    let b = add(&mut store, "Bea", Gender::Female);

    // Each is recorded as the other's child
    let ua = store.create_union(Some(a), None).unwrap();
    let ub = store.create_union(Some(b), None).unwrap();
    store.add_child(ua, b, None, ChildRelation::Biological).unwrap();
    store.add_child(ub, a, None, ChildRelation::Biological).unwrap();

    let graph = GenealogyGraph::new(&store);
    let ancestors = graph.ancestors(a, 100).unwrap();
    assert_eq!(ancestors.len(), 1);
    assert_eq!(ancestors[&1][0].id, b);

    let descendants = graph.descendants(a, 100).unwrap();
    assert_eq!(descendants.len(), 1);
}

#[test]
fn test_shared_ancestor_listed_once() {
    let mut store = InMemoryStore::new();
    let gp = add(&mut store, "Gus", Gender::Male);
    let s1 = add(&mut store, "Sam", Gender::Male);
    let s2 = add(&mut store, "Sue", Gender::Female);
    let c1 = add(&mut store, "Cal", Gender::Male);
    let c2 = add(&mut store, "Cat", Gender::Female);
    let kid = add(&mut store, "Kit", Gender::Female);

    let u = store.create_union(Some(gp), None).unwrap();
    store.add_child(u, s1, None, ChildRelation::Biological).unwrap();
    store.add_child(u, s2, None, ChildRelation::Biological).unwrap();
    let u1 = store.create_union(Some(s1), None).unwrap();
    store.add_child(u1, c1, None, ChildRelation::Biological).unwrap();
    let u2 = store.create_union(Some(s2), None).unwrap();
    store.add_child(u2, c2, None, ChildRelation::Biological).unwrap();

    // First cousins marry
    let uc = store.create_union(Some(c1), Some(c2)).unwrap();
    store.add_child(uc, kid, None, ChildRelation::Biological).unwrap();

    let graph = GenealogyGraph::new(&store);
    let ancestors = graph.ancestors(kid, 10).unwrap();
    let ids = |g: u32| ancestors[&g].iter().map(|p| p.id).collect::<Vec<_>>();
    assert_eq!(ids(1), vec![c1, c2]);
    assert_eq!(ids(2), vec![s1, s2]);
    assert_eq!(ids(3), vec![gp]);
}

#[test]
fn test_generation_cap() {
    let mut store = InMemoryStore::new();
    let mut chain = vec![add(&mut store, "Root", Gender::Male)];
    for i in 0..(MAX_GENERATIONS + 5) {
        let parent = add(&mut store, &format!("P{}", i), Gender::Male);
        let union = store.create_union(Some(parent), None).unwrap();
        let child = *chain.last().unwrap();
        store.add_child(union, child, None, ChildRelation::Biological).unwrap();
        chain.push(parent);
    }

    let graph = GenealogyGraph::new(&store);
    let ancestors = graph.ancestors(chain[0], u32::MAX).unwrap();
    assert_eq!(ancestors.len(), MAX_GENERATIONS as usize);
}

//! End-to-end command tests against a dataset written to a temp directory

use clap::Parser;
use lineage_cli::commands::execute;
use lineage_cli::{Cli, CliError, Config};
use lineage_domain::traits::PlaceRepository;
use lineage_domain::{ChildRelation, DateValue, Event, EventId, EventType, Gender, Person, PersonId};
use lineage_store::InMemoryStore;
use serde_json::Value;
use tempfile::TempDir;

struct Dataset {
    _dir: TempDir,
    path: String,
    dad: PersonId,
    mum: PersonId,
    kid: PersonId,
    twin_record: PersonId,
}

fn dataset() -> Dataset {
    let mut store = InMemoryStore::new();
    let leeds = store.get_or_create_place("Leeds, England").unwrap();

    let mut dad = Person::new(PersonId::new(0), Gender::Male).named("Tom", "Reed");
    dad.birth_place = Some(leeds.id);
    let dad = store.create_person(dad).unwrap();
    let mum = store
        .create_person(Person::new(PersonId::new(0), Gender::Female).named("Una", "Reed"))
        .unwrap();
    let mut vi = Person::new(PersonId::new(0), Gender::Female).named("Vi", "Reed");
    vi.birth_date = Some(DateValue::gregorian("1990-01-05"));
    let kid = store.create_person(vi.clone()).unwrap();
    let union = store.create_union(Some(dad), Some(mum)).unwrap();
    store.add_child(union, kid, None, ChildRelation::Biological).unwrap();

    // Same woman entered a second time, unconnected
    let twin_record = store.create_person(vi).unwrap();

    let mut graduation =
        Event::new(EventId::new(0), kid, EventType::Graduation).on(DateValue::gregorian("2012-06-30"));
    graduation.place = Some(leeds.id);
    store.create_event(graduation).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("family.json");
    store.save_json(&path).unwrap();

    Dataset {
        path: path.to_string_lossy().into_owned(),
        _dir: dir,
        dad,
        mum,
        kid,
        twin_record,
    }
}

fn run(args: &[&str]) -> Result<String, CliError> {
    let mut argv = vec!["lineage", "--no-color"];
    argv.extend_from_slice(args);
    execute(Cli::parse_from(argv), &Config::default())
}

fn run_json(args: &[&str]) -> Value {
    let mut argv = args.to_vec();
    argv.extend(["--format", "json"]);
    serde_json::from_str(&run(&argv).unwrap()).unwrap()
}

#[test]
fn test_describe() {
    let d = dataset();
    let (kid, dad) = (d.kid.to_string(), d.dad.to_string());

    let json = run_json(&["--data", &d.path, "describe", &kid, &dad]);
    assert_eq!(json["relationship"], "Father");
    assert!(json.get("path").is_none());

    let quiet = run(&["--data", &d.path, "--format", "quiet", "describe", &dad, &kid]).unwrap();
    assert_eq!(quiet, "Daughter");

    let json = run_json(&["--data", &d.path, "describe", &kid, &dad, "--path"]);
    assert_eq!(json["path"].as_array().unwrap().len(), 1);
    assert_eq!(json["path"][0]["step"], "up");

    let table = run(&["--data", &d.path, "describe", &kid, &dad, "--path"]).unwrap();
    assert!(table.contains("Father"));
    assert!(table.contains("Vi Reed"));
    assert!(table.contains("parent"));
}

#[test]
fn test_describe_unknown_person() {
    let d = dataset();
    let result = run(&["--data", &d.path, "describe", "1", "999"]);
    assert!(matches!(result, Err(CliError::NotFound(_))));
}

#[test]
fn test_chart_with_layout() {
    let d = dataset();
    let kid = d.kid.to_string();

    let json = run_json(&["--data", &d.path, "chart", &kid, "--layout"]);
    assert_eq!(json["type"], "ancestor");
    assert_eq!(json["direction"], "TB");
    assert_eq!(json["nodes"].as_object().unwrap().len(), 3);
    assert_eq!(json["layout"]["boxes"].as_object().unwrap().len(), 3);
    assert_eq!(json["layout"]["edges"].as_array().unwrap().len(), 2);

    let json = run_json(&["--data", &d.path, "chart", &kid, "--type", "family", "--places"]);
    assert!(json.get("layout").is_none());
    assert_eq!(json["nodes"][d.dad.to_string()]["birth_place"], "Leeds, England");

    let table = run(&["--data", &d.path, "chart", &kid, "--layout"]).unwrap();
    assert!(table.contains("Ancestor Chart for Vi Reed"));
    assert!(table.contains("3 people, 2 links"));
}

#[test]
fn test_person_view() {
    let d = dataset();
    let json = run_json(&["--data", &d.path, "person", &d.kid.to_string()]);
    assert_eq!(json["person"]["first_name"], "Vi");
    assert_eq!(json["father"]["id"], d.dad.value());
    assert_eq!(json["mother"]["id"], d.mum.value());
    assert_eq!(json["children"].as_array().unwrap().len(), 0);

    let table = run(&["--data", &d.path, "person", &d.dad.to_string()]).unwrap();
    assert!(table.contains("Leeds, England"));
    assert!(table.contains("Spouse"));
    assert!(table.contains("Child"));
}

#[test]
fn test_ancestors_and_descendants() {
    let d = dataset();
    let quiet = run(&["--data", &d.path, "--format", "quiet", "ancestors", &d.kid.to_string()]).unwrap();
    assert_eq!(quiet, format!("{}\n{}", d.dad, d.mum));

    let json = run_json(&["--data", &d.path, "descendants", &d.mum.to_string(), "-g", "1"]);
    assert_eq!(json["1"][0]["id"], d.kid.value());
}

#[test]
fn test_calendar_tools() {
    let converted = run(&["--format", "quiet", "calendar", "convert", "2024-04-23", "--to", "hebrew"]).unwrap();
    assert_eq!(converted, "15 Nisan 5784");

    let parsed = run_json(&["calendar", "parse", "about 1850"]);
    assert_eq!(parsed["date"], "1850-01-01");
    assert_eq!(parsed["approximate"], true);

    let formatted = run(&["calendar", "format", "1990-01-05"]).unwrap();
    assert_eq!(formatted, "January 5, 1990");

    let bad = run(&["calendar", "convert", "spring of 1850", "--from", "hebrew", "--to", "gregorian"]);
    assert!(matches!(bad, Err(CliError::Calendar(_))));
}

#[test]
fn test_place_tools() {
    let key = run(&["--format", "quiet", "place", "New York,  NY, USA"]).unwrap();
    assert_eq!(key, "new york,ny,usa");

    let d = dataset();
    let json = run_json(&["--data", &d.path, "place", "leeds,england"]);
    assert_eq!(json["components"]["city"], "leeds");
    assert_eq!(json["stats"]["births"], 1);
    assert_eq!(json["stats"]["total_people"], 1);

    assert!(matches!(run(&["place", "?!"]), Err(CliError::InvalidInput(_))));
}

#[test]
fn test_dataset_required() {
    let result = run(&["person", "1"]);
    assert!(matches!(result, Err(CliError::Config(_))));

    let result = run(&["--data", "/nonexistent/family.json", "person", "1"]);
    assert!(matches!(result, Err(CliError::Store(_))));
}

#[test]
fn test_timeline() {
    let d = dataset();
    let kid = d.kid.to_string();

    let quiet = run(&["--data", &d.path, "--format", "quiet", "timeline", &kid]).unwrap();
    assert_eq!(quiet, "birth\ngraduation");

    let json = run_json(&["--data", &d.path, "timeline", &kid]);
    assert_eq!(json[0]["vital"], true);
    assert_eq!(json[1]["label"], "Graduation");

    let table = run(&["--data", &d.path, "timeline", &kid]).unwrap();
    assert!(table.contains("Timeline for Vi Reed"));
    assert!(table.contains("June 30, 2012"));
    assert!(table.contains("Leeds, England"));

    let empty = run(&["--data", &d.path, "timeline", &d.mum.to_string()]).unwrap();
    assert!(empty.contains("No dated events recorded"));
}

#[test]
fn test_matches() {
    let d = dataset();
    let json = run_json(&["--data", &d.path, "matches", &d.kid.to_string()]);
    let found = json.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["person"]["id"], d.twin_record.value());
    assert_eq!(found[0]["score"], 80);

    let table = run(&["--data", &d.path, "matches", &d.dad.to_string()]).unwrap();
    assert!(table.contains("No likely duplicates of Tom Reed"));

    let missing = run(&["--data", &d.path, "matches", "999"]);
    assert!(matches!(missing, Err(CliError::NotFound(_))));
}

#[test]
fn test_search() {
    let d = dataset();
    let quiet = run(&["--data", &d.path, "--format", "quiet", "search", "reed"]).unwrap();
    assert_eq!(quiet, format!("{}\n{}\n{}\n{}", d.dad, d.mum, d.kid, d.twin_record));

    let quiet = run(&["--data", &d.path, "--format", "quiet", "search", "una reed"]).unwrap();
    assert_eq!(quiet, d.mum.to_string());

    let table = run(&["--data", &d.path, "search", "x"]).unwrap();
    assert!(table.contains("No people found."));
}

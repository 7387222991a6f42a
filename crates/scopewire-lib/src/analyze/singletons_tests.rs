use scopewire_core::{Property, Role};

use super::{analyze_reachability, build_scopes, singleton_demand};
use crate::fixtures::{catalogue, entry, resolve, resolve_err, ty};
use crate::{Error, Resolution, ScopeId};

/// Scopes hosting a singleton for `label`.
fn hosts(resolution: &Resolution<'_>, label: &str) -> Vec<String> {
    resolution
        .graph()
        .iter()
        .filter(|(_, scope)| {
            scope
                .placed()
                .iter()
                .any(|p| p.role == Role::Singleton && p.property.label == label)
        })
        .map(|(_, scope)| scope.concrete().to_string())
        .collect()
}

#[test]
fn demand_counts_distinct_scopes_per_type() {
    let catalogue = catalogue([
        entry("App")
            .constructs("a", "A")
            .constructs("alias", "any AProviding")
            .constructs("b", "B"),
        entry("A").alias("any AProviding").singleton("s", "S"),
        entry("B")
            .singleton("s", "S")
            .singleton("shared", "S")
            .singleton("t", "T"),
        entry("S"),
        entry("T"),
    ]);
    let reachability = analyze_reachability(&catalogue).unwrap();
    let graph = build_scopes(&catalogue, &reachability.reachable);
    let demand = singleton_demand(&catalogue, &graph);

    assert_eq!(demand.len(), 2);
    let s = &demand[&ty("S")];
    assert_eq!(s.count(), 2);
    assert_eq!(s.property, Property::new("s", ty("S")));
    assert_eq!(demand[&ty("T")].count(), 1);
}

#[test]
fn placed_at_lowest_common_ancestor() {
    let catalogue = catalogue([
        entry("App").constructs("main", "Main"),
        entry("Main").constructs("a", "A").constructs("b", "B"),
        entry("A").singleton("s", "S"),
        entry("B").singleton("s", "S"),
        entry("S"),
    ]);
    let resolution = resolve(&catalogue);

    assert_eq!(hosts(&resolution, "s"), ["Main"]);
    let a = resolution.scope(&ty("A")).unwrap();
    assert!(a.passthroughs().is_empty());
}

#[test]
fn sole_consumer_hosts_its_singleton() {
    let catalogue = catalogue([
        entry("App").constructs("a", "A"),
        entry("A").singleton("s", "S"),
        entry("S"),
    ]);
    let resolution = resolve(&catalogue);
    assert_eq!(hosts(&resolution, "s"), ["A"]);
}

#[test]
fn consumer_reached_twice_counts_once() {
    let catalogue = catalogue([
        entry("App")
            .constructs("a", "A")
            .constructs("b", "B")
            .constructs("e", "E"),
        entry("A").constructs("c", "C"),
        entry("B").constructs("c", "C"),
        entry("C").singleton("s", "S"),
        entry("E").singleton("s", "S"),
        entry("S"),
    ]);
    let resolution = resolve(&catalogue);

    assert_eq!(hosts(&resolution, "s"), ["App"]);
    for relay in ["A", "B"] {
        let scope = resolution.scope(&ty(relay)).unwrap();
        assert_eq!(scope.passthroughs().len(), 1, "{relay} should relay `s`");
    }
}

#[test]
fn host_lies_on_every_path_to_every_consumer() {
    // `C` is reached through both `A` and `B`; `E` only through `B`. `B`
    // covers both consumers on one path but not `C` via `A`.
    let catalogue = catalogue([
        entry("App").constructs("a", "A").constructs("b", "B"),
        entry("A").constructs("c", "C"),
        entry("B").constructs("c", "C").constructs("e", "E"),
        entry("C").singleton("s", "S"),
        entry("E").singleton("s", "S"),
        entry("S"),
    ]);
    let resolution = resolve(&catalogue);

    assert_eq!(hosts(&resolution, "s"), ["App"]);
    for relay in ["A", "B"] {
        let scope = resolution.scope(&ty(relay)).unwrap();
        let relayed: Vec<String> = scope.passthroughs().iter().map(ToString::to_string).collect();
        assert_eq!(relayed, ["s: S"], "{relay} should relay `s`");
    }
    for consumer in ["C", "E"] {
        assert!(resolution.scope(&ty(consumer)).unwrap().passthroughs().is_empty());
    }
}

#[test]
fn differently_labelled_consumers_share_one_instance() {
    let catalogue = catalogue([
        entry("App").constructs("a", "A").constructs("b", "B"),
        entry("A").singleton("log", "Logger"),
        entry("B").singleton("logger", "Logger"),
        entry("Logger"),
    ]);
    let resolution = resolve(&catalogue);

    let placements: Vec<String> = resolution
        .graph()
        .iter()
        .flat_map(|(_, scope)| scope.placed())
        .filter(|p| p.role == Role::Singleton)
        .map(|p| p.property.to_string())
        .collect();
    assert_eq!(placements, ["log: Logger"]);
    assert_eq!(hosts(&resolution, "log"), ["App"]);

    insta::assert_snapshot!(resolution.printer().dump(), @r"
    App
      a: A [value]
        < log: Logger (singleton)
      b: B [value]
        < logger: Logger (singleton)
      log: Logger [value, singleton]
    ");
}

#[test]
fn host_declaration_names_the_placement() {
    let catalogue = catalogue([
        entry("App")
            .constructs("a", "A")
            .singleton("clock", "Clock"),
        entry("A").singleton("time", "Clock"),
        entry("Clock"),
    ]);
    let resolution = resolve(&catalogue);

    assert_eq!(hosts(&resolution, "clock"), ["App"]);
    assert!(hosts(&resolution, "time").is_empty());
}

#[test]
fn singleton_scopes_are_traversed_after_placement() {
    let catalogue = catalogue([
        entry("App").singleton("store", "Store"),
        entry("Store").singleton("disk", "Disk"),
        entry("Disk"),
    ]);
    let resolution = resolve(&catalogue);

    assert_eq!(hosts(&resolution, "store"), ["App"]);
    assert_eq!(hosts(&resolution, "disk"), ["Store"]);
}

#[test]
fn exactly_one_placement_per_singleton() {
    let catalogue = catalogue([
        entry("App")
            .constructs("a", "A")
            .constructs("b", "B")
            .singleton("log", "Logger"),
        entry("A").constructs("c", "C").singleton("log", "Logger"),
        entry("B").singleton("log", "Logger").singleton("db", "Db"),
        entry("C").singleton("db", "Db"),
        entry("Logger"),
        entry("Db"),
    ]);
    let resolution = resolve(&catalogue);

    assert_eq!(hosts(&resolution, "log"), ["App"]);
    assert_eq!(hosts(&resolution, "db"), ["App"]);

    let host: ScopeId = resolution.scope_for(&ty("App")).unwrap();
    let placements = resolution
        .graph()
        .iter()
        .flat_map(|(_, scope)| scope.placed())
        .filter(|p| p.role == Role::Singleton)
        .count();
    assert_eq!(placements, 2);
    assert!(
        resolution
            .graph()
            .get(host)
            .placed()
            .iter()
            .filter(|p| p.role == Role::Singleton)
            .all(|p| p.kind == crate::BuildKind::Value)
    );
}

#[test]
fn consumers_unreachable_from_roots_are_unsatisfiable() {
    let catalogue = catalogue([
        entry("App").constructs("a", "A"),
        entry("A"),
        entry("Left").constructs("right", "Right").singleton("s", "S"),
        entry("Right").constructs("left", "Left"),
        entry("S"),
    ]);

    let err = resolve_err(&catalogue);
    assert_eq!(
        err,
        Error::UnsatisfiableSingletons {
            properties: vec![Property::new("s", ty("S"))],
            roots: vec![ty("App")],
        }
    );
}

#[test]
fn unsatisfiable_singletons_are_batched_and_sorted() {
    let catalogue = catalogue([
        entry("One").singleton("z", "Zed").singleton("a", "Alpha"),
        entry("Two").singleton("z", "Zed").singleton("a", "Alpha"),
        entry("Zed"),
        entry("Alpha"),
    ]);

    let Error::UnsatisfiableSingletons { properties, roots } = resolve_err(&catalogue) else {
        panic!("expected unsatisfiable singletons");
    };
    let labels: Vec<&str> = properties.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["a", "z"]);
    assert_eq!(roots, [ty("One"), ty("Two")]);
}

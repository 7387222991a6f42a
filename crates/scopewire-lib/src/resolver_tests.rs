use indoc::indoc;
use scopewire_core::{Catalogue, Property, Role, load_catalogue};

use crate::fixtures::{catalogue, entry, resolve, resolve_err, scenario_a, ty};
use crate::{BuildKind, Error, UnfulfillableProperty};

#[test]
fn scenario_a_places_singleton_at_root_and_relays_through_a() {
    let catalogue = scenario_a();
    let resolution = resolve(&catalogue);

    assert_eq!(resolution.roots(), [ty("R")]);
    assert_eq!(resolution.reachable(), [ty("A"), ty("B"), ty("R"), ty("X")]);
    assert_eq!(resolution.graph().len(), 4);

    let root = resolution.scope(&ty("R")).unwrap();
    let singletons: Vec<_> = root
        .placed()
        .iter()
        .filter(|p| p.role == Role::Singleton)
        .collect();
    assert_eq!(singletons.len(), 1);
    assert_eq!(singletons[0].property.label, "x");
    assert_eq!(singletons[0].kind, BuildKind::Value);
    assert_eq!(Some(singletons[0].scope), resolution.scope_for(&ty("X")));

    let a = resolution.scope(&ty("A")).unwrap();
    let b = resolution.scope(&ty("B")).unwrap();
    assert_eq!(a.passthroughs().len(), 1);
    assert_eq!(a.passthroughs()[0].to_string(), "x: X");
    assert!(b.passthroughs().is_empty());
    assert!(root.passthroughs().is_empty());

    insta::assert_snapshot!(resolution.printer().dump(), @r"
    R
      a: A [value]
        ~ x: X
        < x: X (received)
        b: B [value]
          < x: X (received)
      x: X [value, singleton]
    ");
}

#[test]
fn scenario_b_disjoint_consumers_are_unsatisfiable() {
    let catalogue = catalogue([
        entry("Root1").constructs("c", "C1"),
        entry("Root2").constructs("c", "C2"),
        entry("C1").singleton("y", "Y"),
        entry("C2").singleton("y", "Y"),
        entry("Y"),
    ]);

    let err = resolve_err(&catalogue);
    let Error::UnsatisfiableSingletons { properties, roots } = &err else {
        panic!("unexpected error: {err}");
    };
    let properties: Vec<String> = properties.iter().map(ToString::to_string).collect();
    assert_eq!(properties, ["y: Y"]);
    assert_eq!(roots, &[ty("Root1"), ty("Root2")]);

    insta::assert_snapshot!(err, @"cannot place singletons `y: Y` under a common ancestor of roots `Root1`, `Root2`");
}

#[test]
fn scenario_c_unsupplied_received_slot() {
    let catalogue = catalogue([
        entry("R").constructs("a", "A"),
        entry("A").receives("z", "Z"),
    ]);

    let err = resolve_err(&catalogue);
    assert_eq!(
        err,
        Error::UnfulfillableProperties(vec![UnfulfillableProperty {
            property: Property::new("z", ty("Z")),
            instantiable: ty("A"),
            ancestor_chain: vec![ty("R")],
        }])
    );
}

#[test]
fn all_unfulfillable_properties_are_reported() {
    let catalogue = catalogue([
        entry("R").constructs("a", "A").constructs("b", "B"),
        entry("A").receives("z", "Z").receives("w", "W"),
        entry("B").receives("z", "Z"),
    ]);

    let Error::UnfulfillableProperties(failures) = resolve_err(&catalogue) else {
        panic!("expected unfulfillable properties");
    };
    let rendered: Vec<String> = failures.iter().map(ToString::to_string).collect();
    insta::assert_debug_snapshot!(rendered, @r#"
    [
        "`w: W` on `A` is not supplied by any ancestor (path: `R`)",
        "`z: Z` on `A` is not supplied by any ancestor (path: `R`)",
        "`z: Z` on `B` is not supplied by any ancestor (path: `R`)",
    ]
    "#);
}

#[test]
fn missing_instantiable_fails_fast() {
    let catalogue = catalogue([entry("R").constructs("m", "Missing")]);
    assert_eq!(
        resolve_err(&catalogue),
        Error::NoInstantiableFound(ty("Missing"))
    );
}

#[test]
fn empty_catalogue_has_no_root() {
    let catalogue = Catalogue::new();
    assert_eq!(resolve_err(&catalogue), Error::NoRootFound);
}

#[test]
fn mutual_construction_has_no_root() {
    let catalogue = catalogue([
        entry("A").constructs("b", "B"),
        entry("B").constructs("a", "A"),
    ]);
    assert_eq!(resolve_err(&catalogue), Error::NoRootFound);
}

#[test]
fn construction_cycle_below_root_terminates() {
    let catalogue = catalogue([
        entry("R").constructs("a", "A"),
        entry("A").constructs("b", "B"),
        entry("B").constructs("a", "A"),
    ]);
    let resolution = resolve(&catalogue);

    insta::assert_snapshot!(resolution.printer().dump(), @r"
    R
      a: A [value]
        b: B [value]
          a: A [value] (cycle)
    ");
}

#[test]
fn aliases_share_one_scope() {
    let catalogue = catalogue([
        entry("R")
            .constructs("client", "Client")
            .constructs("net", "any Networking"),
        entry("Client").alias("any Networking").alias("Fetching"),
    ]);
    let resolution = resolve(&catalogue);

    let client = resolution.scope_for(&ty("Client")).unwrap();
    assert_eq!(resolution.scope_for(&ty("any Networking")), Some(client));
    assert_eq!(resolution.scope_for(&ty("Fetching")), Some(client));
    assert_eq!(resolution.graph().len(), 2);

    let root = resolution.scope(&ty("R")).unwrap();
    assert!(root.placed().iter().all(|p| p.scope == client));
}

#[test]
fn build_kinds_follow_wrappers_and_roles() {
    let catalogue = catalogue([
        entry("R")
            .constructs("value", "V")
            .lazy("lazy", "Lazy<L>")
            .constructs("builder", "Instantiator<F>")
            .lazy("lazy_builder", "Instantiator<F>")
            .constructs("forwarding", "ForwardingInstantiator<String, G>"),
        entry("V"),
        entry("L"),
        entry("F"),
        entry("G").forwards("name", "String"),
    ]);
    let resolution = resolve(&catalogue);

    let root = resolution.scope(&ty("R")).unwrap();
    let kinds: Vec<(&str, BuildKind)> = root
        .placed()
        .iter()
        .map(|p| (p.property.label.as_str(), p.kind))
        .collect();
    assert_eq!(
        kinds,
        [
            ("value", BuildKind::Value),
            ("lazy", BuildKind::Lazy),
            ("builder", BuildKind::OnDemandBuilder),
            ("lazy_builder", BuildKind::OnDemandBuilder),
            ("forwarding", BuildKind::ForwardingOnDemandBuilder),
        ]
    );
    assert_eq!(
        Some(root.placed()[1].scope),
        resolution.scope_for(&ty("L"))
    );
    assert_eq!(
        Some(root.placed()[4].scope),
        resolution.scope_for(&ty("G"))
    );
}

#[test]
fn forwarded_slot_supplies_descendants() {
    let catalogue = catalogue([
        entry("R").constructs("builder", "ForwardingInstantiator<User, Session>"),
        entry("Session").forwards("user", "User").constructs("feed", "Feed"),
        entry("Feed").constructs("row", "Row"),
        entry("Row").receives("user", "User"),
    ]);
    let resolution = resolve(&catalogue);

    let feed = resolution.scope(&ty("Feed")).unwrap();
    assert_eq!(feed.passthroughs().len(), 1);
    assert!(resolution.scope(&ty("Session")).unwrap().passthroughs().is_empty());
}

#[test]
fn properties_match_on_label_and_type() {
    let catalogue = catalogue([
        entry("R").constructs("a", "A").constructs("primary", "Store"),
        entry("A").receives("secondary", "Store"),
        entry("Store"),
    ]);

    let Error::UnfulfillableProperties(failures) = resolve_err(&catalogue) else {
        panic!("expected unfulfillable properties");
    };
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].property.label, "secondary");
}

#[test]
fn resolution_is_independent_of_catalogue_order() {
    let entries = || {
        vec![
            entry("Root").constructs("a", "A").constructs("b", "B"),
            entry("A").constructs("c", "C"),
            entry("B").constructs("d", "D"),
            entry("C").singleton("s", "S").receives("s2", "S2"),
            entry("D").singleton("s", "S"),
            entry("S"),
            entry("Other").singleton("s2", "S2").constructs("root", "Root"),
            entry("S2"),
        ]
    };
    let forward = catalogue(entries());
    let mut reversed_entries = entries();
    reversed_entries.reverse();
    let reversed = catalogue(reversed_entries);

    let forward_plan = resolve(&forward).to_plan();
    let reversed_plan = resolve(&reversed).to_plan();
    assert_eq!(forward_plan, reversed_plan);
    assert_eq!(
        forward_plan.to_json(true).unwrap(),
        reversed_plan.to_json(true).unwrap()
    );
}

#[test]
fn resolves_manifest_json() {
    let catalogue = load_catalogue(indoc! {r#"
        {
            "modules": ["App"],
            "instantiables": [
                {"type": "App", "slots": [
                    {"label": "session", "type": "Lazy<Session>", "role": "lazy_constructed"},
                    {"label": "logger", "type": "Logger", "role": "singleton"}
                ]},
                {"type": "Session", "slots": [
                    {"label": "logger", "type": "Logger", "role": "received"}
                ]},
                {"type": "Logger", "aliases": ["any Logging"]}
            ]
        }
    "#})
    .unwrap();
    let resolution = resolve(&catalogue);

    insta::assert_snapshot!(resolution.printer().dump(), @r"
    modules: App

    App
      session: Lazy<Session> [lazy]
        < logger: Logger (received)
      logger: Logger [value, singleton]
    ");
}

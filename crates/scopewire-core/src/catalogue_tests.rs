use crate::{Catalogue, CatalogueError, Instantiable, Role, TypeIdentity};

fn ty(text: &str) -> TypeIdentity {
    TypeIdentity::parse(text).unwrap()
}

#[test]
fn aliases_resolve_to_same_instantiable() {
    let catalogue = Catalogue::from_instantiables([Instantiable::new(ty("NetworkClient"))
        .with_alias(ty("Networking"))
        .with_alias(ty("any Fetching"))])
    .unwrap();

    let id = catalogue.fulfilling(&ty("NetworkClient")).unwrap();
    assert_eq!(catalogue.fulfilling(&ty("Networking")), Some(id));
    assert_eq!(catalogue.fulfilling(&ty("any Fetching")), Some(id));
    assert_eq!(catalogue.fulfilling(&ty("Fetching")), None);
    assert_eq!(catalogue.len(), 1);
}

#[test]
fn alias_equal_to_concrete_is_not_a_duplicate() {
    let inst = Instantiable::new(ty("A")).with_alias(ty("A"));
    assert_eq!(inst.fulfilled_types().count(), 1);

    let catalogue = Catalogue::from_instantiables([inst]).unwrap();
    assert!(catalogue.contains(&ty("A")));
}

#[test]
fn duplicate_fulfillment_is_rejected() {
    let err = Catalogue::from_instantiables([
        Instantiable::new(ty("A")).with_alias(ty("Shared")),
        Instantiable::new(ty("B")).with_alias(ty("Shared")),
    ])
    .unwrap_err();

    assert_eq!(
        err,
        CatalogueError::DuplicateFulfillment {
            type_identity: ty("Shared"),
            existing: ty("A"),
            duplicate: ty("B"),
        }
    );
    insta::assert_snapshot!(err, @"`Shared` is fulfilled by both `A` and `B`");
}

#[test]
fn rejected_insert_leaves_catalogue_untouched() {
    let mut catalogue = Catalogue::new();
    catalogue.insert(Instantiable::new(ty("A"))).unwrap();

    let result = catalogue.insert(Instantiable::new(ty("B")).with_alias(ty("A")));
    assert!(result.is_err());
    assert_eq!(catalogue.len(), 1);
    assert!(!catalogue.contains(&ty("B")));
}

#[test]
fn merge_combines_entries_and_modules() {
    let mut left = Catalogue::from_instantiables([Instantiable::new(ty("A"))]).unwrap();
    left.add_module("Feature");
    let mut right = Catalogue::from_instantiables([Instantiable::new(ty("B"))]).unwrap();
    right.add_module("App");
    right.add_module("Feature");

    left.merge(right).unwrap();
    assert_eq!(left.len(), 2);
    assert_eq!(left.modules(), ["App", "Feature"]);
}

#[test]
fn merge_detects_cross_manifest_duplicates() {
    let mut left = Catalogue::from_instantiables([Instantiable::new(ty("A"))]).unwrap();
    let right = Catalogue::from_instantiables([Instantiable::new(ty("A"))]).unwrap();
    assert!(left.merge(right).is_err());
}

#[test]
fn possible_root_requires_only_constructive_slots() {
    let root = Instantiable::new(ty("Root"))
        .with_slot("a", ty("A"), Role::Constructed)
        .with_slot("b", ty("Lazy<B>"), Role::LazyConstructed)
        .with_slot("x", ty("X"), Role::Singleton);
    assert!(root.is_possible_root());
    assert_eq!(root.constructive_slots().count(), 3);

    let child = root.clone().with_slot("user", ty("User"), Role::Forwarded);
    assert!(!child.is_possible_root());
    assert_eq!(child.slots_with_role(Role::Forwarded).count(), 1);

    assert!(Instantiable::new(ty("Leaf")).is_possible_root());
}

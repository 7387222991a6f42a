use crate::{DeferredWrapper, Property, Role, Slot, TypeIdentity, sort_canonical};

fn ty(text: &str) -> TypeIdentity {
    TypeIdentity::parse(text).unwrap()
}

#[test]
fn built_type_unwraps_deferred_wrappers() {
    assert_eq!(ty("Lazy<Foo>").built_type(), &ty("Foo"));
    assert_eq!(ty("Instantiator<Foo>").built_type(), &ty("Foo"));
    assert_eq!(
        ty("ForwardingInstantiator<(String, Int), Foo>").built_type(),
        &ty("Foo")
    );
}

#[test]
fn built_type_unwraps_one_level_only() {
    assert_eq!(ty("Lazy<Lazy<Foo>>").built_type(), &ty("Lazy<Foo>"));
}

#[test]
fn built_type_leaves_other_generics_alone() {
    assert_eq!(ty("Foo").built_type(), &ty("Foo"));
    assert_eq!(ty("Box<Foo>").built_type(), &ty("Box<Foo>"));
    // Wrapper names with the wrong arity are ordinary types.
    assert_eq!(ty("Lazy<A, B>").built_type(), &ty("Lazy<A, B>"));
    assert_eq!(ty("Outer.Lazy<Foo>").built_type(), &ty("Outer.Lazy<Foo>"));
}

#[test]
fn deferred_wrapper_kinds() {
    assert_eq!(ty("Lazy<Foo>").deferred_wrapper(), Some(DeferredWrapper::Lazy));
    assert_eq!(
        ty("Instantiator<Foo>").deferred_wrapper(),
        Some(DeferredWrapper::Instantiator)
    );
    assert_eq!(
        ty("ForwardingInstantiator<A, Foo>").deferred_wrapper(),
        Some(DeferredWrapper::ForwardingInstantiator)
    );
    assert_eq!(ty("Foo?").deferred_wrapper(), None);
}

#[test]
fn lenient_parse_keeps_unparseable_text() {
    assert_eq!(
        TypeIdentity::parse_lenient("  Foo<<  "),
        TypeIdentity::Unknown("Foo<<".to_owned())
    );
    assert_eq!(TypeIdentity::parse_lenient("Foo"), ty("Foo"));
}

#[test]
fn serde_uses_canonical_text() {
    let property = Property::new("cache", ty("[String : Lazy<Int>]"));
    let json = serde_json::to_string(&property).unwrap();
    insta::assert_snapshot!(json, @r#"{"label":"cache","type":"[String: Lazy<Int>]"}"#);

    let back: Property = serde_json::from_str(&json).unwrap();
    assert_eq!(back, property);
}

#[test]
fn serde_rejects_bad_type_text() {
    let err = serde_json::from_str::<Property>(r#"{"label":"x","type":"Foo<"}"#).unwrap_err();
    assert!(err.to_string().contains("found end of input"), "{err}");
}

#[test]
fn sort_by_canonical_text() {
    let mut types = vec![ty("b"), ty("A?"), ty("[A]"), ty("A")];
    sort_canonical(&mut types);
    let rendered: Vec<_> = types.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["A", "A?", "[A]", "b"]);
}

#[test]
fn constructive_roles() {
    assert!(Role::Constructed.is_constructive());
    assert!(Role::LazyConstructed.is_constructive());
    assert!(Role::Singleton.is_constructive());
    assert!(!Role::Received.is_constructive());
    assert!(!Role::Forwarded.is_constructive());
}

#[test]
fn slot_display() {
    let slot = Slot::new("loader", ty("Lazy<Loader>"), Role::LazyConstructed);
    insta::assert_snapshot!(slot, @"loader: Lazy<Loader> (lazy_constructed)");
    assert_eq!(slot.built_type(), &ty("Loader"));
}

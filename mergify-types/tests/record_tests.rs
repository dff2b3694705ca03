use mergify_types::{Class, Lineage, PropertyKey, Record, Symbol, Value};
use pretty_assertions::assert_eq;
use std::rc::Rc;

fn key(s: &str) -> PropertyKey {
    PropertyKey::from(s)
}

// ── Construction and lineage ─────────────────────────────────────

#[test]
fn new_record_is_empty_and_plain() {
    let record = Record::new();
    assert!(record.is_empty());
    assert!(record.is_plain());
    assert!(matches!(record.lineage(), Lineage::Root));
}

#[test]
fn bare_record_is_plain() {
    let record = Record::bare();
    assert!(record.is_plain());
    assert!(matches!(record.lineage(), Lineage::Bare));
}

#[test]
fn class_instance_is_not_plain() {
    let class = Rc::new(Class::new("Unicorn"));
    let record = Record::instance(&class);
    assert!(!record.is_plain());
    assert_eq!(record.lineage().class().map(|c| c.name()), Some("Unicorn"));
}

// ── Property access ──────────────────────────────────────────────

#[test]
fn missing_property_reads_absent() {
    let record = Record::new();
    assert!(record.get(&key("nope")).is_absent());
    assert_eq!(record.get_own(&key("nope")), None);
}

#[test]
fn set_appends_and_overwrites_in_place() {
    let record = Record::new().with("a", 1).with("b", 2);
    record.set("a", 3);
    assert_eq!(record.keys(), vec![key("a"), key("b")]);
    assert_eq!(record.get(&key("a")), Value::from(3));
}

#[test]
fn instance_reads_prototype_defaults() {
    let class = Rc::new(Class::new("Unicorn").with_default("rainbows", "many"));
    let unicorn = Record::instance(&class);
    assert_eq!(unicorn.get(&key("rainbows")), Value::from("many"));
    assert!(!unicorn.contains_key(&key("rainbows")));
    assert!(unicorn.is_empty());

    unicorn.set("rainbows", "none");
    assert_eq!(unicorn.get(&key("rainbows")), Value::from("none"));
}

#[test]
fn non_enumerable_properties_are_hidden_from_keys() {
    let record = Record::new();
    record.define("hidden", true, false);
    record.set("shown", true);

    assert_eq!(record.keys(), vec![key("shown")]);
    assert_eq!(record.len(), 1);
    assert!(record.contains_key(&key("hidden")));
    assert!(!record.is_enumerable(&key("hidden")));
    assert_eq!(record.properties().len(), 2);
}

#[test]
fn assignment_keeps_existing_enumerability() {
    let record = Record::new();
    record.define("hidden", 1, false);
    record.set("hidden", 2);
    assert!(!record.is_enumerable(&key("hidden")));
    assert_eq!(record.get_own(&key("hidden")), Some(Value::from(2)));
}

#[test]
fn keys_list_strings_before_symbols() {
    let sym = Symbol::new("s");
    let record = Record::new();
    record.set(&sym, 1);
    record.set("b", 2);
    record.set("a", 3);

    assert_eq!(record.string_keys(), vec![key("b"), key("a")]);
    assert_eq!(record.symbol_keys(), vec![PropertyKey::from(&sym)]);
    assert_eq!(
        record.keys(),
        vec![key("b"), key("a"), PropertyKey::from(sym)]
    );
}

#[test]
fn handles_alias_the_same_record() {
    let record = Record::new();
    let alias = record.clone();
    alias.set("x", 1);
    assert!(record.ptr_eq(&alias));
    assert_eq!(record.get(&key("x")), Value::from(1));
    assert!(!record.ptr_eq(&Record::new()));
}

#[test]
fn from_iter_preserves_order() {
    let record: Record = [("z", 1), ("y", 2), ("x", 3)].into_iter().collect();
    assert_eq!(record.keys(), vec![key("z"), key("y"), key("x")]);
}

#[test]
fn debug_shows_class_name() {
    let class = Rc::new(Class::new("Point"));
    let point = Record::instance(&class).with("x", 1);
    assert_eq!(format!("{point:?}"), r#"Point {"x": 1}"#);
}

mod common;

use std::sync::Arc;
use std::time::Duration;

use br_bean::cache::CachePolicy;
use br_bean::config::{CanonicalPolicy, EngineConfig};
use br_bean::derive::Bean;
use br_bean::info::Type;
use br_bean::registry::BeanRegistry;
use br_bean::{BeanError, BeanRefs, PathSpec};
use common::{Address, Contact, Person, Phone, person, refs};

/// A wrapper exposing two beans at once.
#[derive(Bean, Default)]
#[bean(synthetic, default)]
struct Card {
    #[bean(facet)]
    contact: Contact,
    #[bean(facet)]
    phone: Phone,
}

fn registry() -> BeanRegistry {
    let mut registry = BeanRegistry::empty();
    registry.register::<Card>();
    registry.register::<Address>();
    registry
}

fn engine(json: &str) -> BeanRefs {
    let config: EngineConfig = serde_json::from_str(json).unwrap();
    BeanRefs::with_config(registry(), config)
}

#[test]
fn configuration_from_json() {
    let config: EngineConfig = serde_json::from_str(
        r#"{
            "cache": { "kind": "expire_after_access", "ttl_ms": 250 },
            "canonical": "facets_first"
        }"#,
    )
    .unwrap();
    assert_eq!(
        config,
        EngineConfig {
            cache: CachePolicy::ExpireAfterAccess {
                ttl_ms: 250,
                max_entries: None
            },
            canonical: CanonicalPolicy::FacetsFirst,
        }
    );

    let json = serde_json::to_string(&EngineConfig::default()).unwrap();
    assert_eq!(
        json,
        r#"{"cache":{"kind":"unbounded"},"canonical":"facets_first"}"#
    );

    assert!(serde_json::from_str::<EngineConfig>(r#"{ "canonical": "every_facet" }"#).is_err());
}

#[test]
fn facets_first_merges_every_facet() {
    let refs = engine(r#"{ "canonical": "facets_first" }"#);
    let card = refs.root::<Card>();

    let names: Vec<_> = card.all().unwrap().iter().map(|p| p.path()).collect();
    assert_eq!(names, ["email", "address", "phones", "number"]);

    let mut value = Card::default();
    let number = card.path_as::<String>("number").unwrap();
    number.set(&mut value, String::from("555-1")).unwrap();
    let email = card.path_as::<String>("email").unwrap();
    email.set(&mut value, String::from("clark@planet.example")).unwrap();

    assert_eq!(value.phone.number.as_deref(), Some("555-1"));
    assert_eq!(value.contact.email.as_deref(), Some("clark@planet.example"));
}

#[test]
fn first_facet_only_sees_the_first_one() {
    let refs = engine(r#"{ "canonical": "first_facet" }"#);
    let card = refs.root::<Card>();

    let names: Vec<_> = card.all().unwrap().iter().map(|p| p.path()).collect();
    assert_eq!(names, ["email", "address", "phones"]);
    assert!(matches!(
        card.path("number"),
        Err(BeanError::IllegalArgument(_))
    ));
}

#[test]
fn path_specs_survive_serialization() {
    let refs = refs();
    let city = refs.resolve(Type::of::<Person>(), "contact.address.city").unwrap();

    let json = serde_json::to_string(&city.spec()).unwrap();
    let spec: PathSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(spec, city.spec());

    let again = refs.path_from_spec(&spec).unwrap();
    assert_eq!(again, city);
    assert!(Arc::ptr_eq(again.last(), city.last()));

    let short = PathSpec {
        root: String::from("Person"),
        path: String::from("contact.address.city"),
    };
    assert_eq!(refs.path_from_spec(&short).unwrap(), city);

    let unknown = PathSpec {
        root: String::from("nowhere::Person"),
        path: String::from("name"),
    };
    assert!(matches!(
        refs.path_from_spec(&unknown),
        Err(BeanError::IllegalArgument(_))
    ));
}

#[test]
fn expired_descriptors_are_resolved_again() {
    let mut registry = BeanRegistry::empty();
    registry.register::<Person>();
    registry.register::<Contact>();
    let refs = BeanRefs::with_config(
        registry,
        EngineConfig {
            cache: CachePolicy::expire_after_access(Duration::from_millis(20)),
            ..EngineConfig::default()
        },
    );

    let first = refs.property(Person::CONTACT).unwrap();
    assert!(refs.cached_descriptors() >= 1);
    let hit = refs.property(Person::CONTACT).unwrap();
    assert!(Arc::ptr_eq(first.descriptor(), hit.descriptor()));

    std::thread::sleep(Duration::from_millis(60));
    assert_eq!(refs.cached_descriptors(), 0);

    let second = refs.property(Person::CONTACT).unwrap();
    assert!(!Arc::ptr_eq(first.descriptor(), second.descriptor()));
    assert_eq!(first, second);

    // Paths built before the expiry keep working.
    let clark = person("Noville");
    assert!(first.get(&clark).unwrap().is_some());
}

#[test]
fn bounded_cache_evicts() {
    let refs = BeanRefs::with_config(
        registry(),
        EngineConfig {
            cache: CachePolicy::ExpireAfterAccess {
                ttl_ms: 60_000,
                max_entries: Some(2),
            },
            ..EngineConfig::default()
        },
    );

    refs.property(Contact::EMAIL).unwrap();
    refs.property(Contact::ADDRESS).unwrap();
    refs.property(Address::CITY).unwrap();
    assert_eq!(refs.cached_descriptors(), 2);
}

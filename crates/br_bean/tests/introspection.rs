mod common;

use std::sync::Arc;

use br_bean::derive::Bean;
use br_bean::info::Type;
use br_bean::registry::BeanRegistry;
use br_bean::{BeanError, BeanRefs};
use common::{Address, Contact, Person, person, refs};

#[derive(Bean, Default)]
#[bean(synthetic, default)]
struct AuditedContact {
    #[bean(facet)]
    contact: Contact,
    #[bean(skip)]
    audit: Vec<String>,
}

#[derive(Bean, Default)]
#[bean(synthetic)]
struct AddressAdapter {
    #[bean(parent)]
    address: Address,
}

fn names(paths: &[br_bean::Path]) -> Vec<String> {
    paths.iter().map(|p| p.path()).collect()
}

#[test]
fn properties_in_declaration_order() {
    let refs = refs();
    let all = refs.all_properties(Type::of::<Person>()).unwrap();
    assert_eq!(
        names(&all),
        [
            "id",
            "name",
            "age",
            "contact",
            "status",
            "permissions",
            "employer",
            "emergency",
            "badges"
        ]
    );

    let read_only: Vec<_> = all
        .iter()
        .filter(|p| p.is_read_only())
        .map(|p| p.path())
        .collect();
    assert_eq!(read_only, ["id", "status", "emergency", "badges"]);

    assert_eq!(refs.root::<Person>().all().unwrap(), all);
}

#[test]
fn extending_with_every_property() {
    let refs = refs();
    let contact = refs.property(Person::CONTACT).unwrap();
    let children = contact.all().unwrap();
    assert_eq!(
        names(&children),
        ["contact.email", "contact.address", "contact.phones"]
    );
    assert!(children.iter().all(|p| p.root_type().is::<Person>()));

    assert!(matches!(
        refs.property(Person::NAME).unwrap().all(),
        Err(BeanError::IllegalArgument(_))
    ));
}

#[test]
fn typed_and_named_routes_share_descriptors() {
    let refs = refs();
    let typed = refs.property(Person::CONTACT).unwrap();
    let named = refs.resolve(Type::of::<Person>(), "contact").unwrap();
    assert!(Arc::ptr_eq(typed.descriptor(), named.last()));

    let again = refs.property(Person::CONTACT).unwrap();
    assert!(Arc::ptr_eq(typed.descriptor(), again.descriptor()));

    // A separate engine has caches of its own.
    let other = common::refs();
    let elsewhere = other.property(Person::CONTACT).unwrap();
    assert!(!Arc::ptr_eq(typed.descriptor(), elsewhere.descriptor()));
    assert_eq!(typed, elsewhere);

    let clone = refs.clone();
    let cloned = clone.property(Person::CONTACT).unwrap();
    assert!(Arc::ptr_eq(typed.descriptor(), cloned.descriptor()));
}

#[test]
fn descriptor_metadata() {
    let refs = refs();
    let city = refs.resolve(Type::of::<Person>(), "contact.address.city").unwrap();
    let last = city.last();

    assert!(last.declaring_type().is::<Address>());
    assert!(last.value_type().is::<String>());
    assert_eq!(last.name(), "city");
    assert_eq!(last.member(), "get_city");
    assert!(!last.is_read_only());
    assert!(last.instantiator().is_none());

    let contact = refs.property(Person::CONTACT).unwrap();
    assert!(contact.descriptor().instantiator().is_some());
    let employer = refs.property(Person::EMPLOYER).unwrap();
    assert!(employer.descriptor().instantiator().is_none());
}

#[test]
fn synthetic_facets_expose_the_wrapped_properties() {
    let refs = refs();
    refs.register::<AuditedContact>();

    let wrapper = refs.root::<AuditedContact>();
    assert_eq!(names(&wrapper.all().unwrap()), ["email", "address", "phones"]);

    let email = wrapper.path("email").unwrap();
    assert!(email.last().declaring_type().is::<Contact>());
    assert_eq!(email, refs.resolve(Type::of::<Contact>(), "email").unwrap());

    let mut audited = AuditedContact::default();
    audited.audit.push(String::from("created"));
    email
        .set_dyn(&mut audited, Some(Box::new(String::from("lois@planet.example"))))
        .unwrap();
    assert_eq!(audited.contact.email.as_deref(), Some("lois@planet.example"));

    let city = wrapper.path_as::<String>("address.city").unwrap();
    city.set(&mut audited, String::from("Metropolis")).unwrap();
    assert_eq!(
        city.get(&audited).unwrap().map(String::as_str),
        Some("Metropolis")
    );

    // The wrapped bean, not the wrapper, must be given to a plain path.
    let direct = refs.resolve(Type::of::<Contact>(), "email").unwrap();
    assert!(direct.get_dyn(&audited).is_err());
}

#[test]
fn synthetic_parent_is_followed_without_facets() {
    let refs = refs();
    refs.register::<AddressAdapter>();

    let adapter = refs.root::<AddressAdapter>();
    assert_eq!(names(&adapter.all().unwrap()), ["street", "city"]);

    let mut value = AddressAdapter::default();
    adapter
        .path("city")
        .unwrap()
        .set_dyn(&mut value, Some(Box::new(String::from("Gotham"))))
        .unwrap();
    assert_eq!(value.address.city.as_deref(), Some("Gotham"));

    // Registering the wrapper registered its parent too.
    assert!(
        refs.registry()
            .read()
            .contains(core::any::TypeId::of::<Address>())
    );
}

#[derive(Bean, Default)]
#[bean(default)]
struct Dock {
    label: Option<String>,
}

#[derive(Bean, Default)]
#[bean(default)]
struct Berth {
    dock: Option<Dock>,
}

#[derive(Bean, Default)]
#[bean(default)]
struct Harbor {
    name: Option<String>,
    berth: Option<Berth>,
    #[bean(collection)]
    docks: Option<Vec<Dock>>,
}

#[test]
fn registering_a_root_registers_its_property_beans() {
    let refs = BeanRefs::new(BeanRegistry::empty());
    refs.register::<Harbor>();
    {
        let registry = refs.registry().read();
        assert!(registry.contains(core::any::TypeId::of::<Berth>()));
        assert!(registry.contains(core::any::TypeId::of::<Dock>()));
        assert_eq!(registry.len(), 3);
    }

    let label = refs.resolve_as::<Harbor, String>("berth.dock.label").unwrap();
    let mut harbor = Harbor::default();
    label.set(&mut harbor, String::from("north")).unwrap();
    let dock = harbor.berth.as_ref().and_then(|b| b.dock.as_ref());
    assert_eq!(dock.and_then(|d| d.label.as_deref()), Some("north"));

    let last = refs.resolve_as::<Harbor, String>("docks[].label").unwrap();
    last.set(&mut harbor, String::from("south")).unwrap();
    assert_eq!(harbor.docks.as_ref().map(Vec::len), Some(1));
    assert_eq!(last.get(&harbor).unwrap().map(String::as_str), Some("south"));
}

#[test]
fn concurrent_resolution_converges() {
    let refs = BeanRefs::new(BeanRegistry::empty());
    refs.register::<Person>();
    refs.register::<Contact>();
    refs.register::<Address>();

    let resolved: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let refs = refs.clone();
                scope.spawn(move || {
                    refs.resolve(Type::of::<Person>(), "contact.address.city")
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let first = resolved[0].last();
    for path in &resolved {
        assert!(Arc::ptr_eq(first, path.last()));
        assert_eq!(path, &resolved[0]);
    }

    let clark = person("Noville");
    let city = resolved[0].get_dyn(&clark).unwrap().unwrap();
    assert_eq!(city.downcast_ref::<String>().map(String::as_str), Some("Noville"));
}

#[test]
fn registry_lookups() {
    let refs = refs();
    let registry = refs.registry().read();

    let info = registry.find("Person").unwrap();
    assert!(info.ty().is::<Person>());
    assert!(registry.find(Type::of::<Person>().name()).is_some());
    assert!(registry.find("Nobody").is_none());
    assert!(info.constructor().is_some());
    assert!(!info.is_synthetic());
}

#[cfg(feature = "auto_register")]
#[test]
fn auto_registered_beans() {
    let refs = BeanRefs::new(BeanRegistry::new());
    let city = refs.resolve(Type::of::<Person>(), "contact.address.city");
    assert!(city.is_ok());

    let registry = refs.registry().read();
    assert!(registry.contains(core::any::TypeId::of::<Address>()));
    // Generic beans are never collected on their own, only as the value
    // type of a registered property.
    assert!(registry.contains(core::any::TypeId::of::<br_bean::info::Ref<common::Status>>()));
}

#![allow(dead_code, reason = "shared by several test binaries")]

use br_bean::BeanRefs;
use br_bean::derive::Bean;
use br_bean::info::Ref;
use br_bean::registry::BeanRegistry;
use indexmap::IndexSet;

#[derive(Bean, Default, Debug, Clone, PartialEq)]
#[bean(default, auto_register)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
}

#[derive(Bean, Default, Debug, Clone, PartialEq)]
#[bean(default, auto_register)]
pub struct Phone {
    pub number: Option<String>,
}

#[derive(Bean, Default, Debug, Clone, PartialEq)]
#[bean(default, auto_register)]
pub struct Contact {
    pub email: Option<String>,
    pub address: Option<Address>,
    #[bean(collection)]
    pub phones: Option<Vec<Phone>>,
}

#[derive(Bean, Default, Debug, Clone, PartialEq)]
#[bean(default, auto_register)]
pub struct Status {
    pub name: Option<String>,
}

/// No constructor: a null employer cannot be instantiated.
#[derive(Bean, Debug, Clone, PartialEq)]
#[bean(auto_register)]
pub struct Employer {
    pub name: Option<String>,
}

#[derive(Bean, Default, Debug)]
#[bean(default, auto_register)]
pub struct Person {
    #[bean(read_only)]
    pub id: u64,
    pub name: Option<String>,
    pub age: u32,
    pub contact: Option<Contact>,
    #[bean(read_only)]
    pub status: Ref<Status>,
    #[bean(collection)]
    pub permissions: Option<IndexSet<String>>,
    pub employer: Option<Employer>,
    #[bean(read_only)]
    pub emergency: Option<Contact>,
    #[bean(collection, read_only)]
    pub badges: Option<Vec<String>>,
}

/// An engine with every test bean registered explicitly, so the tests do
/// not depend on the `auto_register` feature.
pub fn refs() -> BeanRefs {
    let mut registry = BeanRegistry::empty();
    registry.register::<Person>();
    registry.register::<Contact>();
    registry.register::<Address>();
    registry.register::<Phone>();
    registry.register::<Status>();
    registry.register::<Employer>();
    registry.register::<Ref<Status>>();
    BeanRefs::new(registry)
}

pub fn phone(number: &str) -> Phone {
    Phone {
        number: Some(number.to_owned()),
    }
}

/// A person living in `city` with two phones, `555-1` and `555-2`.
pub fn person(city: &str) -> Person {
    Person {
        id: 7,
        name: Some("Clark".to_owned()),
        age: 35,
        contact: Some(Contact {
            email: Some("clark@planet.example".to_owned()),
            address: Some(Address {
                street: Some("Hyperion Ave".to_owned()),
                city: Some(city.to_owned()),
            }),
            phones: Some(vec![phone("555-1"), phone("555-2")]),
        }),
        status: Ref::new(Status {
            name: Some("active".to_owned()),
        }),
        ..Person::default()
    }
}

//! Integration tests: class demos

use hello_bindings::prelude::*;

#[test]
fn pet_walkthrough() {
    let mut p = Pet::new("Jamy");
    assert_eq!(p.get_name(), "Jamy");
    p.set_name("Jo");
    assert_eq!(p.get_name(), "Jo");
    p.name = "Josy".to_string();
    assert_eq!(p.name, "Josy");
    assert_eq!(format!("{}", p), "<example.Pet named 'Josy'>");
}

#[test]
fn pet2_dynamic_attributes() {
    let mut p2 = Pet2::new("Jose");
    p2.set_attr("random_att_name", "hey").unwrap();
    p2.set_attr("legs", 4_i64).unwrap();
    let keys: Vec<&str> = p2.attrs().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["legs", "random_att_name"]);

    let err = p2.set_attr("name", 234324_i64).unwrap_err();
    assert!(matches!(err, BindingError::InvalidArgument(_)));
    p2.set_attr("name", "Josie").unwrap();
    assert_eq!(p2.name(), "Josie");
}

#[test]
fn dog_is_a_pet_that_barks() {
    let mut dog = Dog::new("Rex");
    assert_eq!(dog.bark(), BARK);
    dog.set_name("Max");
    assert_eq!(dog.pet().name, "Max");
    dog.pet_mut().name = "Rex".into();

    let pet: Pet = dog.into();
    assert_eq!(pet.to_string(), "<example.Pet named 'Rex'>");
    assert_eq!(Dog::default().get_name(), "AtomicDog");
}

#[test]
fn pet_store_loses_bark_but_pet_store2_keeps_it() {
    let molly = pet_store();
    assert_eq!(molly, Pet::new("Molly"));

    let polymorphic = pet_store2();
    let bark = polymorphic.as_bark().expect("polymorphic dog barks");
    assert_eq!(bark.bark(), "woof!");
}

#[test]
fn overlord_defaults_and_overloaded_set() {
    let mut o = Overlord::default();
    assert_eq!(o.name(), DEFAULT_OVERLORD_NAME);
    assert_eq!(o.age(), DEFAULT_OVERLORD_AGE);

    o.set(SetArg::Age(9000));
    o.set(String::from("Melkor"));
    assert_eq!(o, Overlord::new("Melkor", 9000));
}

#[test]
fn overlord_serializes_to_json() {
    let json = serde_json::to_string(&Overlord::default()).unwrap();
    assert_eq!(json, r#"{"name":"Morgoth","age":141}"#);
    let back: Overlord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Overlord::default());
}

#[test]
fn bird_nested_types() {
    let mut bird = Bird::new("Russell", BirdKind::Crow);
    assert_eq!(bird.kind.value(), 0);
    assert_eq!(bird.kind.to_string(), "Kind.Crow");
    assert_eq!(bird.attr, Attributes::default());

    bird.kind = BirdKind::try_from(1).unwrap();
    bird.attr.age = 2.0;
    assert_eq!(bird.kind, BirdKind::Goose);
    assert_eq!(bird.attr.age, 2.0);
}

#[test]
fn custom_constructors() {
    let mut private = PrivateCtor::create(3);
    private.set_i(5);
    assert_eq!(private.i(), 5);

    assert_eq!(PublicCtor::new(7).i, 7);
    assert_eq!(create_pub(7.99).i, 7);
    assert_eq!(create_pub(f64::NAN).i, 0);
}

use std::{collections::HashMap, marker::PhantomData};

use mutator::{Mutable, Mutator, PasswordMask};

struct NotMutable;

#[derive(Mutable)]
struct Envelope<T, const N: usize> {
    payload: Option<T>,
    table: HashMap<String, T>,
    sizes: [u8; N],
    _marker: PhantomData<NotMutable>,
}

#[derive(Mutable)]
struct Typed<T> {
    id: u64,
    _kind: PhantomData<T>,
}

fn main() {
    let mutator = Mutator::field_match();
    mutator.hooks().add("secret", PasswordMask::new());

    let mut envelope = Envelope::<String, 2> {
        payload: Some("value".into()),
        table: HashMap::from([("secret".into(), "value".into())]),
        sizes: [1, 2],
        _marker: PhantomData,
    };
    mutator.execute(&mut envelope);
    assert_eq!(envelope.table["secret"], "********");

    let mut typed = Typed::<NotMutable> {
        id: 1,
        _kind: PhantomData,
    };
    mutator.execute(&mut typed);
    assert_eq!(typed.id, 1);
}

use mutator::{Mutable, Mutator, PasswordMask};

#[derive(Mutable)]
enum Never {}

#[derive(Mutable)]
enum Single {
    Only { password: String },
}

#[derive(Mutable)]
enum Mixed<T> {
    Named { password: String, extra: T },
    Tuple(String, #[mutate(skip)] std::fs::File),
    Unit,
}

fn main() {
    let mutator = Mutator::field_match();
    mutator.hooks().add("password", PasswordMask::new());

    let mut single = Single::Only {
        password: "secret".into(),
    };
    mutator.execute(&mut single);
    let Single::Only { password } = single;
    assert_eq!(password, "********");

    let mut mixed: Mixed<u8> = Mixed::Unit;
    mutator.execute(&mut mixed);

    let _ = std::mem::size_of::<Never>();
}

use mutator::{Mutable, Mutator, PasswordMask};

struct Foreign;

#[derive(Mutable)]
#[mutate(type_name = "app.Account")]
struct Account {
    #[mutate(rename = "Password")]
    password: String,
    #[mutate(skip)]
    handle: Foreign,
    r#type: String,
}

fn main() {
    let mutator = Mutator::type_qualified();
    mutator.hooks().add("app.Account.Password", PasswordMask::new());

    let mut account = Account {
        password: "secret".into(),
        handle: Foreign,
        r#type: "admin".into(),
    };
    mutator.execute(&mut account);

    assert_eq!(account.password, "********");
    assert_eq!(account.r#type, "admin");
    let Foreign = account.handle;
}

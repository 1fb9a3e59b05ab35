mod model {
    #[derive(mutator::Mutable)]
    pub struct Login {
        pub user: String,
        pub password: String,
    }
}

mod scrub {
    pub fn run(login: &mut crate::model::Login) {
        let mutator = mutator::Mutator::field_match();
        mutator
            .hooks()
            .add("password", mutator::PasswordMask::new());
        mutator.execute(login);
    }
}

fn main() {
    let mut login = model::Login {
        user: "admin".into(),
        password: "secret".into(),
    };
    scrub::run(&mut login);
    assert_eq!(login.user, "admin");
    assert_eq!(login.password, "********");
}

//! End-to-end tests for the public mutation API.
//!
//! These tests exercise the integration of:
//! - `Mutable` derive traversal,
//! - registry lookups under the bare field-name strategy, and
//! - the hook contract (replace, keep, owner access, type mismatch).

use std::{
    any::Any,
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use mutator::{
    HookKey, MutateHook, Mutable, Mutator, PASSWORD_MASK, PasswordMask, Replace, TextMask,
    from_fn, typed,
};

#[derive(Clone, Debug, Mutable)]
struct Credentials {
    username: String,
    password: String,
}

fn credentials() -> Credentials {
    Credentials {
        username: "admin".into(),
        password: "Master#123".into(),
    }
}

fn password_mutator() -> Mutator {
    let mutator = Mutator::field_match();
    mutator.hooks().add("password", PasswordMask::new());
    mutator
}

/// Counts invocations and keeps the current value.
#[derive(Default)]
struct CountingHook {
    calls: AtomicUsize,
}

impl CountingHook {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MutateHook for CountingHook {
    fn mutate(&self, _owner: Option<&dyn Any>, _current: &dyn Any) -> Option<Box<dyn Any>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        None
    }
}

mod records {
    use super::*;

    #[test]
    fn masks_matching_field_and_keeps_others() {
        let mutator = password_mutator();
        let mut value = credentials();

        mutator.execute(&mut value);

        assert_eq!(value.username, "admin");
        assert_eq!(value.password, PASSWORD_MASK);
    }

    #[test]
    fn empty_registry_changes_nothing() {
        let mutator = Mutator::field_match();
        let mut value = credentials();

        mutator.execute(&mut value);

        assert_eq!(value.password, "Master#123");
    }

    #[test]
    fn execution_is_idempotent_for_constant_hooks() {
        let mutator = password_mutator();
        let mut once = credentials();
        let mut twice = credentials();

        mutator.execute(&mut once);
        mutator.execute(&mut twice);
        mutator.execute(&mut twice);

        assert_eq!(once.password, twice.password);
        assert_eq!(once.username, twice.username);
    }

    #[test]
    fn nested_records_are_walked() {
        #[derive(Mutable)]
        struct Smtp {
            host: String,
            auth: Credentials,
            backup: Option<Box<Credentials>>,
        }

        let mutator = password_mutator();
        let mut smtp = Smtp {
            host: "mail.example.com".into(),
            auth: credentials(),
            backup: Some(Box::new(credentials())),
        };

        mutator.execute(&mut smtp);

        assert_eq!(smtp.host, "mail.example.com");
        assert_eq!(smtp.auth.password, PASSWORD_MASK);
        assert_eq!(smtp.backup.unwrap().password, PASSWORD_MASK);
    }

    #[test]
    fn matched_member_is_not_walked() {
        #[derive(Mutable)]
        struct Outer {
            inner: Credentials,
        }

        let counter = std::sync::Arc::new(CountingHook::default());
        let mutator = Mutator::field_match();
        mutator
            .hooks()
            .add_shared("inner", counter.clone())
            .add_shared("password", counter.clone());
        let mut outer = Outer {
            inner: credentials(),
        };

        mutator.execute(&mut outer);

        assert_eq!(counter.calls(), 1);
        assert_eq!(outer.inner.password, "Master#123");
    }

    #[test]
    fn hook_can_replace_a_whole_record() {
        #[derive(Mutable)]
        struct Outer {
            inner: Credentials,
        }

        let mutator = Mutator::field_match();
        mutator.hooks().add(
            "inner",
            Replace::new(Credentials {
                username: String::new(),
                password: String::new(),
            }),
        );
        let mut outer = Outer {
            inner: credentials(),
        };

        mutator.execute(&mut outer);

        assert!(outer.inner.username.is_empty());
        assert!(outer.inner.password.is_empty());
    }

    #[test]
    fn hook_receives_the_owning_record() {
        let mutator = Mutator::field_match();
        mutator.hooks().add(
            "password",
            from_fn(|owner: Option<&dyn Any>, _current: &dyn Any| {
                let owner = owner?.downcast_ref::<Credentials>()?;
                Some(Box::new(format!("reset-for-{}", owner.username)) as Box<dyn Any>)
            }),
        );
        let mut value = credentials();

        mutator.execute(&mut value);

        assert_eq!(value.password, "reset-for-admin");
    }

    #[test]
    fn non_string_fields_are_replaced_by_typed_hooks() {
        #[derive(Mutable)]
        struct Server {
            port: u16,
            retries: Option<u32>,
        }

        let mutator = Mutator::field_match();
        mutator
            .hooks()
            .add("port", typed(|_: &u16| 0_u16))
            .add("retries", Replace::new(None::<u32>));
        let mut server = Server {
            port: 8080,
            retries: Some(3),
        };

        mutator.execute(&mut server);

        assert_eq!(server.port, 0);
        assert_eq!(server.retries, None);
    }

    #[test]
    fn removed_hook_no_longer_fires() {
        let mutator = password_mutator();
        mutator.hooks().remove("password");
        let mut value = credentials();

        mutator.execute(&mut value);

        assert_eq!(value.password, "Master#123");
    }

    #[test]
    fn text_mask_keeps_a_suffix() {
        #[derive(Mutable)]
        struct Card {
            number: String,
        }

        let mutator = Mutator::field_match();
        mutator.hooks().add("number", TextMask::keep_last(4));
        let mut card = Card {
            number: "4111111111111111".into(),
        };

        mutator.execute(&mut card);

        assert_eq!(card.number, "************1111");
    }

    #[test]
    #[should_panic(expected = "returned a value that is not a")]
    fn mismatched_replacement_type_panics() {
        let mutator = Mutator::field_match();
        mutator.hooks().add(
            "password",
            from_fn(|_: Option<&dyn Any>, _: &dyn Any| Some(Box::new(42_i32) as Box<dyn Any>)),
        );
        let mut value = credentials();

        mutator.execute(&mut value);
    }

    #[test]
    fn mutated_returns_a_scrubbed_clone() {
        let mutator = password_mutator();
        let original = credentials();

        let copy = mutator.mutated(&original);

        assert_eq!(copy.password, PASSWORD_MASK);
        assert_eq!(original.password, "Master#123");
    }
}

mod attributes {
    use super::*;

    #[test]
    fn skipped_fields_are_neither_matched_nor_walked() {
        struct Foreign(String);

        #[derive(Mutable)]
        struct Session {
            #[mutate(skip)]
            password: String,
            #[mutate(skip)]
            handle: Foreign,
            #[mutate(skip)]
            nested: Credentials,
        }

        let mutator = password_mutator();
        let mut session = Session {
            password: "visible".into(),
            handle: Foreign("raw".into()),
            nested: credentials(),
        };

        mutator.execute(&mut session);

        assert_eq!(session.password, "visible");
        assert_eq!(session.handle.0, "raw");
        assert_eq!(session.nested.password, "Master#123");
    }

    #[test]
    fn renamed_fields_match_under_the_new_name() {
        #[derive(Mutable)]
        struct Legacy {
            #[mutate(rename = "Password")]
            secret: String,
        }

        let mutator = Mutator::field_match();
        mutator.hooks().add("Password", PasswordMask::new());
        let mut legacy = Legacy {
            secret: "hunter2".into(),
        };

        mutator.execute(&mut legacy);

        assert_eq!(legacy.secret, PASSWORD_MASK);
    }

    #[test]
    fn raw_identifiers_match_without_prefix() {
        #[derive(Mutable)]
        struct Token {
            r#type: String,
        }

        let mutator = Mutator::field_match();
        mutator.hooks().add("type", PasswordMask::new());
        let mut token = Token {
            r#type: "bearer".into(),
        };

        mutator.execute(&mut token);

        assert_eq!(token.r#type, PASSWORD_MASK);
    }
}

mod shapes {
    use super::*;

    #[test]
    fn tuple_struct_members_are_named_by_index() {
        #[derive(Mutable)]
        struct Pair(String, String);

        let mutator = Mutator::field_match();
        mutator.hooks().add("1", PasswordMask::new());
        let mut pair = Pair("keep".into(), "hide".into());

        mutator.execute(&mut pair);

        assert_eq!(pair.0, "keep");
        assert_eq!(pair.1, PASSWORD_MASK);
    }

    #[test]
    fn unit_struct_is_accepted() {
        #[derive(Mutable)]
        struct Marker;

        let mutator = password_mutator();
        let mut marker = Marker;
        mutator.execute(&mut marker);
    }

    #[test]
    fn only_the_active_enum_variant_is_walked() {
        #[derive(Debug, PartialEq, Mutable)]
        enum Auth {
            Basic { user: String, password: String },
            Bearer(String),
            Anonymous,
        }

        let mutator = Mutator::field_match();
        mutator
            .hooks()
            .add("password", PasswordMask::new())
            .add("0", PasswordMask::new());

        let mut basic = Auth::Basic {
            user: "admin".into(),
            password: "secret".into(),
        };
        let mut bearer = Auth::Bearer("token".into());
        let mut anonymous = Auth::Anonymous;

        mutator.execute(&mut basic);
        mutator.execute(&mut bearer);
        mutator.execute(&mut anonymous);

        assert_eq!(
            basic,
            Auth::Basic {
                user: "admin".into(),
                password: PASSWORD_MASK.into(),
            }
        );
        assert_eq!(bearer, Auth::Bearer(PASSWORD_MASK.into()));
        assert_eq!(anonymous, Auth::Anonymous);
    }

    #[test]
    fn generic_records_walk_their_parameters() {
        #[derive(Mutable)]
        struct Envelope<T> {
            id: u64,
            payload: T,
            _marker: std::marker::PhantomData<fn() -> T>,
        }

        let mutator = password_mutator();
        let mut envelope = Envelope {
            id: 1,
            payload: credentials(),
            _marker: std::marker::PhantomData,
        };

        mutator.execute(&mut envelope);

        assert_eq!(envelope.id, 1);
        assert_eq!(envelope.payload.password, PASSWORD_MASK);
    }
}

mod maps {
    use super::*;

    #[test]
    fn map_entries_are_matched_by_key() {
        let mutator = password_mutator();
        let mut map = HashMap::from([
            (String::from("username"), String::from("admin")),
            (String::from("password"), String::from("admin")),
        ]);

        mutator.execute(&mut map);

        assert_eq!(map["username"], "admin");
        assert_eq!(map["password"], PASSWORD_MASK);
    }

    #[test]
    fn map_hooks_receive_no_owner() {
        let mutator = Mutator::field_match();
        mutator.hooks().add(
            "password",
            from_fn(|owner: Option<&dyn Any>, _: &dyn Any| {
                let marker = if owner.is_some() { "owned" } else { "orphan" };
                Some(Box::new(String::from(marker)) as Box<dyn Any>)
            }),
        );
        let mut map = HashMap::from([("password", String::from("admin"))]);

        mutator.execute(&mut map);

        assert_eq!(map["password"], "orphan");
    }

    #[test]
    fn record_fields_holding_maps_are_walked() {
        #[derive(Mutable)]
        struct Config {
            env: HashMap<String, String>,
        }

        let mutator = Mutator::field_match();
        mutator.hooks().add("DB_PASSWORD", PasswordMask::new());
        let mut config = Config {
            env: HashMap::from([
                (String::from("DB_PASSWORD"), String::from("pw")),
                (String::from("DB_HOST"), String::from("localhost")),
            ]),
        };

        mutator.execute(&mut config);

        assert_eq!(config.env["DB_PASSWORD"], PASSWORD_MASK);
        assert_eq!(config.env["DB_HOST"], "localhost");
    }

    #[test]
    fn bool_and_char_keys_are_matched() {
        let mutator = Mutator::field_match();
        mutator
            .hooks()
            .add(true, PasswordMask::new())
            .add('k', PasswordMask::new());
        let mut flags = HashMap::from([(true, String::from("a")), (false, String::from("b"))]);
        let mut letters = HashMap::from([('k', String::from("c"))]);

        mutator.execute(&mut flags);
        mutator.execute(&mut letters);

        assert_eq!(flags[&true], PASSWORD_MASK);
        assert_eq!(flags[&false], "b");
        assert_eq!(letters[&'k'], PASSWORD_MASK);
        assert!(mutator.hooks().contains(&HookKey::Bool(true)));
    }
}

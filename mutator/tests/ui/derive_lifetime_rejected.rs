// Test: Mutable requires 'static types

use mutator::Mutable;

#[derive(Mutable)]
struct Borrowed<'a> {
    password: &'a str,
}

fn main() {}

// Test: #[mutate] is only allowed on fields of an enum

use mutator::Mutable;

#[derive(Mutable)]
enum Secret {
    #[mutate(skip)]
    Basic { password: String },
}

fn main() {}

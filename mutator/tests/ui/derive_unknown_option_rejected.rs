// Test: unknown field options are rejected

use mutator::Mutable;

#[derive(Mutable)]
struct Login {
    #[mutate(mask)]
    password: String,
}

fn main() {}

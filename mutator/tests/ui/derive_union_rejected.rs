// Test: Mutable cannot be derived for unions

use mutator::Mutable;

#[derive(Mutable)]
union Bits {
    int: u32,
    float: f32,
}

fn main() {}

/// worked scenarios: balancing equations and tracking species in a sieve
pub mod sieve_examples;

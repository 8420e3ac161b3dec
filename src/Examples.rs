//! examples of usage of RustedBlasius
/// Blasius shooting examples
pub mod blasius_examples;

//! Grammar productions, split by syntactic category.
//!
//! Every production is an `impl Parser` block method so the cursor and
//! error helpers stay in one place.

mod expr;
mod function;
mod pattern;
mod stmt;

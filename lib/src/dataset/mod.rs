//! Loading MovieLens `::`-delimited files and pivoting them into the matrix the model trains on.

pub mod matrix;
pub mod movielens;

pub use matrix::*;
pub use movielens::*;

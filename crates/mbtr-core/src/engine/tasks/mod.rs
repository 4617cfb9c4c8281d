pub mod pairwise;
pub mod triplet;

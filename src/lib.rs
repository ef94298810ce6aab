pub mod coordination;
pub mod element;
pub mod error;
pub mod geometry;
pub mod lattice;
pub mod molecule;
pub mod rotation;
pub mod site;
pub mod structure;
pub mod tilting;

//! Tabletop game-system rules. Only Pathfinder is implemented; the module
//! split leaves room for other systems' load rules.

pub mod pathfinder;

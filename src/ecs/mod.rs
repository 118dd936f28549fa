pub mod world;

pub use world::{SubjectRecord, World, WorldSnapshot};

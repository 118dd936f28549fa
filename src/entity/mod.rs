pub mod attributes;
pub mod body;
pub mod subject;

pub mod instances;
pub mod points;

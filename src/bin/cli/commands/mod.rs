pub mod cards;
pub mod export;
pub mod generate;
pub mod model;
pub mod models;
pub mod notes;
pub mod quiz;
pub mod status;
pub mod todo;

mod models;

pub use models::TodoItem;

pub mod todo;
pub mod user;

pub use todo::{Priority, Todo, TodoCreate, TodoUpdate};
pub use user::User;

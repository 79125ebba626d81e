pub mod department;
pub mod employee;
pub mod entity;
pub mod review;

pub use department::Department;
pub use employee::Employee;
pub use entity::{shared, Entity, Shared};
pub use review::Review;

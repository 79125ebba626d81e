//! Repository layer persisting the models to SQLite
//!
//! `Repo<T>` carries the shared table lifecycle and CRUD operations; the
//! per-entity modules add typed constructors, attribute finders and
//! relationship queries.

pub mod department_repo;
pub mod employee_repo;
pub mod identity_map;
pub mod review_repo;
pub mod sqlite_repo;

pub use department_repo::DepartmentRepo;
pub use employee_repo::EmployeeRepo;
pub use identity_map::{Cached, IdentityMap, IdentityMaps};
pub use review_repo::ReviewRepo;
pub use sqlite_repo::Repo;

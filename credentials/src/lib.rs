//! Credential storage utilities
//!
//! Argon2id password hashing shared by services that persist user passwords.
//! Services define their own hashing port and adapt [`PasswordHasher`] to it,
//! so the algorithm can change without touching domain logic.
//!
//! # Examples
//!
//! ```
//! use credentials::HashCost;
//! use credentials::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(HashCost {
//!     memory_kib: 1024,
//!     iterations: 1,
//!     parallelism: 1,
//! })
//! .unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```

pub mod password;

pub use password::HashCost;
pub use password::PasswordError;
pub use password::PasswordHasher;

//! userstore keeps a list of user records (id, name, age) in a JSON or XML
//! file and runs a short scripted session over it: show, update an age,
//! insert, delete, and save.
//!
//! The pieces are usable on their own:
//!
//! ```
//! use userstore::document::record::{Collection, Record};
//!
//! let mut users = Collection::new(vec![Record::new(1, "Ana", 30)]);
//! users.update_age(1, 31);
//! assert_eq!(users.find(1).unwrap().age, 31);
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod file;
pub mod logging;
pub mod session;

pub use document::ops::Outcome;
pub use document::record::{Collection, Record};
pub use error::StoreError;
pub use file::format::Format;

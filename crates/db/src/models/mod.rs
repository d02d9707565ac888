//! Entity structs and command DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` entity struct decoded from the database row
//! - `Deserialize` command DTOs driving inserts and updates

pub mod survey_run;

//! # sql-insert-writer
//!
//! > **Readable starting points for long `INSERT` statements.**
//!
//! Inspects a destination table (and optionally source tables) in a live
//! database and writes a template `INSERT` for hand-editing.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use sql_insert_writer::prelude::*;
//!
//! let db = Database::connect("postgresql://localhost/app").await?;
//!
//! // INSERT INTO tab1 (...) VALUES (DEFAULT, ...)
//! let sql = generate_values_insert(&db, "tab1", 1, false).await?;
//!
//! // INSERT INTO tab1 (...) SELECT tab2.col1, ... FROM tab2 INNER JOIN tab3 ...
//! let sql = generate_select_insert(&db, "tab1", &["tab2", "tab3"], false, false).await?;
//! ```
//!
//! ## Dialects
//!
//! | Scheme       | No value  | Cast                |
//! |--------------|-----------|---------------------|
//! | `postgresql` | `DEFAULT` | `expr::type`        |
//! | `mysql`      | `NULL`    | `CAST(expr AS type)`|
//! | `sqlite`     | `NULL`    | none                |

pub mod config;
pub mod dialect;
pub mod engine;
pub mod error;
pub mod generator;
pub mod schema;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::dialect::Dialect;
    pub use crate::engine::Database;
    pub use crate::error::*;
    pub use crate::generator::{
        Composer, GenerationRequest, Layout, generate, generate_select_insert,
        generate_values_insert,
    };
    pub use crate::schema::{ColumnInfo, fetch_columns};
}

pub use generator::{generate, generate_select_insert, generate_values_insert};

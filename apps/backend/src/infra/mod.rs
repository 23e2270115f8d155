//! Infrastructure: database bootstrap, DbErr mapping and state assembly.

pub mod db;
pub mod db_errors;
pub mod state;

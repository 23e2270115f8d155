//! Use cases behind the HTTP handlers. Services take store trait objects and
//! return `AppError`, so they run the same against SeaORM or in-memory stores.

pub mod accounts;
pub mod recipes;

//! Users management service: account registration and login, plus a
//! bearer-guarded user-profile resource with CRUD operations.

pub mod db;
pub mod handlers;
pub mod services;

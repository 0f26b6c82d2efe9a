mod helpers;

mod accounts;
mod auth;
mod orders;

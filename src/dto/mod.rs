pub mod auth;
pub mod cart;
pub mod cms;
pub mod comments;
pub mod gallery;
pub mod orders;
pub mod products;
pub mod ratings;
pub mod stats;

//! Orchestration services: validate, resolve, mutate, commit, translate.

pub mod auth;
pub mod client;
pub mod invoice;
pub mod jwt;
pub mod payment;

pub use auth::AuthService;
pub use client::ClientService;
pub use invoice::InvoiceService;
pub use jwt::{Claims, JwtService};
pub use payment::PaymentService;

//! CSRF token handling

mod token;

pub use token::CsrfToken;

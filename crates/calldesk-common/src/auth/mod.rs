//! Authentication utilities

mod jwt;
mod password;
mod pin;
mod reset_code;

pub use jwt::{Claims, JwtService, TokenPair, TokenType};
pub use password::{hash_password, validate_password_strength, verify_password};
pub use pin::ElevatedPin;
pub use reset_code::{generate_reset_code, reset_code_expiry, RESET_CODE_TTL_MINUTES};

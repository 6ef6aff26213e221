pub mod pact_entry;
pub mod user;
pub mod verification_token;

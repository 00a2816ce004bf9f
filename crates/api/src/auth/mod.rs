//! Token validation for resolved actors. Token issuance and user
//! provisioning are external collaborators; this module only validates.

pub mod jwt;

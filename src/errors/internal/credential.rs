use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    /// Unknown account number or wrong password; deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,
}

//! Application services for user identity.

mod registration;

pub use registration::{
    ActivationOutcome, IdentityServiceError, IdentityServiceResult, RegisterUserRequest,
    RegistrationService, UpdateProfileRequest,
};

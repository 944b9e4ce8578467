//! Account use cases.

mod login;
mod register;
mod resend_verification;
mod verify_registration;

pub use login::Login;
pub use register::Register;
pub use resend_verification::ResendVerification;
pub use verify_registration::VerifyRegistration;

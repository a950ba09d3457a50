pub mod company;
pub mod user;

pub use company::CompanyRequest;
pub use user::{
    CheckEmailQuery, GenerateOtpRequest, RegisterWithSsoRequest, RegisterWithoutSsoRequest,
    VerificationOtpRequest,
};

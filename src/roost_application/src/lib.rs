pub mod use_cases;

pub use use_cases::{
    login::{LoginError, LoginUseCase},
    refresh::{RefreshError, RefreshUseCase},
    register::{RegisterError, RegisterUseCase},
};

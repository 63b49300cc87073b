mod issue;
mod service;
mod verify;

#[cfg(test)]
pub(crate) mod test_utils;

pub use service::TokenService;

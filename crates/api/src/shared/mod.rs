pub mod auth;
pub mod guard;
#[cfg(test)]
pub mod test_helpers;
pub mod usecase;

pub mod assignments;
pub mod console;
pub mod health;
pub mod me;
pub mod permissions;
pub mod roles;

#[cfg(test)]
pub(crate) mod test_support;

pub mod controller;
pub mod conversation;
pub mod debounce;
pub mod format;
pub mod rows;
pub mod section;
pub mod upload;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

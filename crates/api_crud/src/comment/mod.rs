pub mod create;
pub mod delete;
pub mod list;
pub mod update;

#[cfg(test)]
pub(crate) mod test_data;

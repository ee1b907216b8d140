pub mod build;
pub mod poj;
pub mod qstring;
pub mod reconcile;
pub mod settings;
pub mod store;
pub mod unicode;

#[cfg(test)]
mod proptest_props;

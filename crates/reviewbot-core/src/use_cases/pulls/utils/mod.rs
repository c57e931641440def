pub(crate) mod versioned_update;

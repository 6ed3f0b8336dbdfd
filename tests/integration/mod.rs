//! Integration tests for the abimap binary

mod helpers;
mod test_check;
mod test_new;
mod test_update;
mod test_version;

//! Pure helper functions over domain types

pub mod listing;

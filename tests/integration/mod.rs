//! Integration tests for change generator dispatch

mod candidate_selection;
mod discovery;
mod ordering_properties;

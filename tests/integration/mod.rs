//! Integration tests for the resgen snapshot generator

mod cli_surface;
mod end_to_end;
mod test_utils;

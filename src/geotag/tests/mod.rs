mod extract_tests;
mod apply_tests;

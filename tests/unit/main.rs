//! Unit test modules.

mod alignment_test;
mod exercise_parser_test;
mod lap_builder_test;

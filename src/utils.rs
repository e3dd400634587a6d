pub mod string_builder;

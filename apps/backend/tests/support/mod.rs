#![allow(dead_code)]


pub use app_builder::create_test_app;

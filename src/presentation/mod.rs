//! Askama views composing the blog helpers.

pub mod views;

//! Client-side post store for a blog front-end: a pure reducer over posts,
//! edit selection and loading state, driven by async calls to a REST backend.

pub mod api;
pub mod blog;
pub mod cli;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod post;
pub mod store;

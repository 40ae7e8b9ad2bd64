mod common;
mod overview;
mod service;

mod common;
mod encoding;
mod scoring;

mod common;
mod feed;

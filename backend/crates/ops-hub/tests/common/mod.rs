#![allow(unused_imports)]

pub(crate) mod jwt_helper;
pub(crate) mod sse_client;
pub(crate) mod test_server;
pub(crate) mod test_writer;

pub use jwt_helper::*;
pub use sse_client::*;
pub use test_server::*;
pub use test_writer::*;

pub mod http;
pub mod in_process;
pub mod mock;
pub mod postgres;

pub mod fastdl_server;

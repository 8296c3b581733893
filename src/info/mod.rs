pub mod info_client;
pub mod response_structs;

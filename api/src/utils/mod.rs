pub mod packet;
pub mod yaml;

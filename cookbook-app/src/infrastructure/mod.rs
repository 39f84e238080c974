pub mod db;
pub mod identity;
pub mod image_host;
pub mod security;

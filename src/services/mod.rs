pub mod crc;
pub mod key;
pub mod middleware;
pub mod normalize;
pub mod pix;
pub mod tlv;

/// Hex packet decode command.
pub mod decode;
/// Message and bundle encode command.
pub mod encode;
/// UDP listen command.
pub mod listen;
/// UDP send command.
pub mod send;
/// Argument literal parsing, hex helpers, and CLI errors.
pub mod util;
/// Text and JSON renderings of decoded packets.
pub mod view;

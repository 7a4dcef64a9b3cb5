//! `sm2me`: convert SM2 keys and signatures between DER, raw and compressed encodings.
pub mod cmd;
pub mod input;
pub mod logging;

//! 署名サービスAPI

pub mod signing;

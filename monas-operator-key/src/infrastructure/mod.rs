pub mod address;
pub mod aes_kwp;
pub mod pkcs8_encoder;
pub mod public_key_pem;
pub mod rsa_oaep;
pub mod scalar_parser;

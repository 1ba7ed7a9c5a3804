//! HS256 access tokens

use crate::domain::tenancy::{Claims, TokenCodec};
use anyhow::Result;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Signs and verifies tokens with a shared secret
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl TokenCodec for JwtCodec {
    fn issue(&self, claims: &Claims) -> Result<String> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding)?)
    }

    fn verify(&self, token: &str) -> Result<Claims> {
        Ok(decode::<Claims>(token, &self.decoding, &self.validation)?.claims)
    }
}

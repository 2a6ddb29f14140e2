//! Conversion: TokenDocument → Token.

use super::wire::TokenDocument;
use super::Token;
use crate::error::TokenError;
use crate::shared::{parse_decimal, parse_timestamp, TokenAddress};

fn present(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

impl TryFrom<TokenDocument> for Token {
    type Error = TokenError;

    fn try_from(doc: TokenDocument) -> Result<Self, Self::Error> {
        let address = TokenAddress::parse(doc.address.as_deref().unwrap_or_default())?;

        let created_at = match present(doc.created_at) {
            Some(raw) => Some(parse_timestamp(&raw).ok_or(TokenError::InvalidCreatedAt(raw))?),
            None => None,
        };

        Ok(Token {
            address,
            name: present(doc.name),
            symbol: present(doc.symbol),
            created_at,
            last_price: present(doc.last_price).and_then(|p| parse_decimal(&p)),
        })
    }
}

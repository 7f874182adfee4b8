use paseto_core::claims::Claims;
use paseto_core::footer::Footer;
use paseto_core::version::{Purpose, Version};

/// An authenticated and validated token.
///
/// Only a [`Parser`](crate::Parser) creates these.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    version: Version,
    purpose: Purpose,
    claims: Claims,
    footer: Footer,
}

impl Token {
    pub(crate) fn new(version: Version, purpose: Purpose, claims: Claims, footer: Footer) -> Self {
        Self {
            version,
            purpose,
            claims,
            footer,
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn footer(&self) -> &Footer {
        &self.footer
    }

    pub fn into_parts(self) -> (Claims, Footer) {
        (self.claims, self.footer)
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Inquiry deep links.
//!
//! Shoppers contact the boutique through a messaging deep link carrying a
//! prefilled message about the collection. Sold out collections get no link.

use crate::domain::catalog::{Collection, CollectionStatus};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const DEEP_LINK_BASE: &str = "https://wa.me/";

/// Characters escaped in a query component: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Fixed parts of the inquiry message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InquiryTemplate<'a> {
    pub phone_number: &'a str,
    pub product_noun: &'a str,
    pub currency_symbol: &'a str,
}

impl InquiryTemplate<'_> {
    /// Prefilled message for a collection.
    #[must_use]
    pub fn message(&self, name: &str, price: u64) -> String {
        format!(
            "Hi! I'm interested in the \"{name}\" {noun} priced at {currency}{price}. \
             Could you please provide more details?",
            noun = self.product_noun,
            currency = self.currency_symbol,
            price = group_thousands(price),
        )
    }

    /// Deep link for `collection`, or `None` when it is sold out.
    #[must_use]
    pub fn link_for(&self, collection: &Collection) -> Option<String> {
        self.link(&collection.name, collection.price, collection.status)
    }

    #[must_use]
    pub fn link(&self, name: &str, price: u64, status: CollectionStatus) -> Option<String> {
        if status.is_sold_out() {
            return None;
        }
        let digits: String = self
            .phone_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        Some(format!(
            "{DEEP_LINK_BASE}{digits}?text={}",
            encode_uri_component(&self.message(name, price))
        ))
    }
}

/// Formats `value` with `,` between groups of three digits.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Percent-encodes `input` for use as a query component.
#[must_use]
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: InquiryTemplate<'static> = InquiryTemplate {
        phone_number: "919881207898",
        product_noun: "ghagra choli",
        currency_symbol: "₹",
    };

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(45_000), "45,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn message_mentions_name_and_price() {
        let message = TEMPLATE.message("Rani Pink", 45_000);
        assert_eq!(
            message,
            "Hi! I'm interested in the \"Rani Pink\" ghagra choli priced at ₹45,000. \
             Could you please provide more details?"
        );
    }

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_uri_component("a b"), "a%20b");
        assert_eq!(encode_uri_component("it's (ok)!"), "it's%20(ok)!");
        assert_eq!(encode_uri_component("\"x\"?&="), "%22x%22%3F%26%3D");
        assert_eq!(encode_uri_component("₹"), "%E2%82%B9");
    }

    #[test]
    fn link_targets_phone_number() {
        let link = TEMPLATE
            .link("Rani", 100, CollectionStatus::Available)
            .expect("available collection has a link");
        assert!(link.starts_with("https://wa.me/919881207898?text=Hi!%20I'm%20interested"));
    }

    #[test]
    fn sold_out_has_no_link() {
        assert!(TEMPLATE.link("Rani", 100, CollectionStatus::SoldOut).is_none());
    }
}

// Rainforest API response types.
// Mirrors the JSON shape of a `type=product` request; every field defaults when absent or null.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Bindings sold as paperbacks, in preference order.
pub const PAPERBACK_TYPES: &[&str] = &[
    "Paperback",
    "Mass Market Paperback",
    "Perfect Paperback",
    "Pocket Book",
];

/// Bindings sold as hardcovers, in preference order.
pub const HARDCOVER_TYPES: &[&str] = &["Hardcover", "Leather Bound", "Library Binding", "Flexibound"];

/// Digital editions.
pub const DIGITAL_TYPES: &[&str] = &["Kindle", "Kindle & Comixology", "Digital"];

/// Audio editions.
pub const AUDIOBOOK_TYPES: &[&str] = &["Audiobook", "Audible Audiobook", "Audio CD", "MP3 CD"];

/// A group of variant titles that describe the same kind of binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    Paperback,
    Hardcover,
    Digital,
    Audiobook,
}

impl Binding {
    /// Candidate variant titles for this binding, in preference order.
    pub fn titles(&self) -> &'static [&'static str] {
        match self {
            Binding::Paperback => PAPERBACK_TYPES,
            Binding::Hardcover => HARDCOVER_TYPES,
            Binding::Digital => DIGITAL_TYPES,
            Binding::Audiobook => AUDIOBOOK_TYPES,
        }
    }
}

impl FromStr for Binding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "paperback" => Ok(Binding::Paperback),
            "hardcover" => Ok(Binding::Hardcover),
            "digital" | "kindle" | "ebook" => Ok(Binding::Digital),
            "audiobook" | "audio" => Ok(Binding::Audiobook),
            _ => Err(format!(
                "Invalid binding: '{}'. Valid bindings: paperback, hardcover, digital, audiobook",
                s
            )),
        }
    }
}

/// Decode an explicit JSON `null` as the field's default value.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Full response for a single product lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductData {
    #[serde(deserialize_with = "null_default")]
    pub request_info: RequestInfo,
    #[serde(deserialize_with = "null_default")]
    pub request_parameters: RequestParameters,
    #[serde(deserialize_with = "null_default")]
    pub request_metadata: RequestMetadata,
    #[serde(deserialize_with = "null_default")]
    pub product: Product,
    #[serde(deserialize_with = "null_default")]
    pub frequently_bought_together: FrequentlyBoughtTogether,
    #[serde(deserialize_with = "null_default")]
    pub also_bought: Vec<AlsoBought>,
}

impl ProductData {
    /// A response only describes a product when it carries an ASIN.
    pub fn is_found(&self) -> bool {
        !self.product.asin.is_empty()
    }

    /// Find the first variant whose title matches a candidate, trying candidates in order.
    pub fn lookup_variant<S: AsRef<str>>(&self, titles: &[S]) -> Option<&Variant> {
        titles.iter().find_map(|title| {
            self.product
                .variants
                .iter()
                .find(|v| v.title == title.as_ref())
        })
    }

    /// Find the preferred variant for a binding group.
    pub fn lookup_binding(&self, binding: Binding) -> Option<&Variant> {
        self.lookup_variant(binding.titles())
    }
}

/// Credit accounting for the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestInfo {
    #[serde(deserialize_with = "null_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_default")]
    pub credits_used: i64,
    #[serde(deserialize_with = "null_default")]
    pub credits_used_this_request: i64,
    #[serde(deserialize_with = "null_default")]
    pub credits_remaining: i64,
    pub credits_reset_at: Option<DateTime<Utc>>,
}

/// Echo of the request inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestParameters {
    #[serde(deserialize_with = "null_default")]
    pub amazon_domain: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_default")]
    pub request_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestMetadata {
    pub created_at: Option<DateTime<Utc>>,
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_default")]
    pub total_time_taken: f64,
    #[serde(deserialize_with = "null_default")]
    pub amazon_url: String,
}

/// A monetary amount as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    #[serde(deserialize_with = "null_default")]
    pub symbol: String,
    #[serde(deserialize_with = "null_default")]
    pub value: f64,
    #[serde(deserialize_with = "null_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_default")]
    pub raw: String,
}

/// Product detail payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub search_alias: SearchAlias,
    #[serde(deserialize_with = "null_default")]
    pub keywords: String,
    #[serde(deserialize_with = "null_default")]
    pub keywords_list: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub asin: String,
    #[serde(deserialize_with = "null_default")]
    pub link: String,
    #[serde(deserialize_with = "null_default")]
    pub sell_on_amazon: bool,
    #[serde(deserialize_with = "null_default")]
    pub variants: Vec<Variant>,
    #[serde(deserialize_with = "null_default")]
    pub variant_asins_flat: String,
    #[serde(deserialize_with = "null_default")]
    pub authors: Vec<Author>,
    #[serde(deserialize_with = "null_default")]
    pub format: String,
    #[serde(deserialize_with = "null_default")]
    pub categories: Vec<Category>,
    #[serde(deserialize_with = "null_default")]
    pub categories_flat: String,
    #[serde(deserialize_with = "null_default")]
    pub sub_title: SubTitle,
    #[serde(deserialize_with = "null_default")]
    pub marketplace_id: String,
    #[serde(deserialize_with = "null_default")]
    pub rating: f64,
    #[serde(deserialize_with = "null_default")]
    pub rating_breakdown: RatingBreakdown,
    #[serde(deserialize_with = "null_default")]
    pub ratings_total: i64,
    #[serde(deserialize_with = "null_default")]
    pub book_description: String,
    #[serde(deserialize_with = "null_default")]
    pub editorial_reviews: Vec<EditorialReview>,
    #[serde(deserialize_with = "null_default")]
    pub editorial_reviews_flat: String,
    #[serde(deserialize_with = "null_default")]
    pub main_image: Image,
    #[serde(deserialize_with = "null_default")]
    pub images: Vec<Image>,
    #[serde(deserialize_with = "null_default")]
    pub images_count: i64,
    #[serde(deserialize_with = "null_default")]
    pub images_flat: String,
    #[serde(deserialize_with = "null_default")]
    pub is_bundle: bool,
    #[serde(deserialize_with = "null_default")]
    pub attributes: Vec<NameValue>,
    #[serde(deserialize_with = "null_default")]
    pub top_reviews: Vec<Review>,
    #[serde(deserialize_with = "null_default")]
    pub buybox_winner: BuyboxWinner,
    #[serde(deserialize_with = "null_default")]
    pub more_buying_choices: Vec<BuyingChoice>,
    #[serde(deserialize_with = "null_default")]
    pub specifications: Vec<NameValue>,
    #[serde(deserialize_with = "null_default")]
    pub specifications_flat: String,
    #[serde(deserialize_with = "null_default")]
    pub bestsellers_rank: Vec<BestsellersRank>,
    #[serde(deserialize_with = "null_default")]
    pub publication_date: String,
    #[serde(deserialize_with = "null_default")]
    pub publisher: String,
    #[serde(deserialize_with = "null_default")]
    pub isbn_10: String,
    #[serde(deserialize_with = "null_default")]
    pub isbn_13: String,
    #[serde(deserialize_with = "null_default")]
    pub language: String,
    #[serde(deserialize_with = "null_default")]
    pub weight: String,
    #[serde(deserialize_with = "null_default")]
    pub bestsellers_rank_flat: String,
}

/// Alternate purchasable form of a product (binding, edition).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variant {
    #[serde(deserialize_with = "null_default")]
    pub asin: String,
    #[serde(deserialize_with = "null_default")]
    pub link: String,
    #[serde(deserialize_with = "null_default")]
    pub is_current_product: bool,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub price: Price,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchAlias {
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub link: String,
    #[serde(deserialize_with = "null_default")]
    pub asin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub link: String,
    #[serde(deserialize_with = "null_default")]
    pub category_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubTitle {
    #[serde(deserialize_with = "null_default")]
    pub text: String,
    #[serde(deserialize_with = "null_default")]
    pub link: String,
}

/// Share and count of reviews at one star level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarCount {
    #[serde(deserialize_with = "null_default")]
    pub percentage: f32,
    #[serde(deserialize_with = "null_default")]
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingBreakdown {
    #[serde(deserialize_with = "null_default")]
    pub five_star: StarCount,
    #[serde(deserialize_with = "null_default")]
    pub four_star: StarCount,
    #[serde(deserialize_with = "null_default")]
    pub three_star: StarCount,
    #[serde(deserialize_with = "null_default")]
    pub two_star: StarCount,
    #[serde(deserialize_with = "null_default")]
    pub one_star: StarCount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorialReview {
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    #[serde(deserialize_with = "null_default")]
    pub link: String,
}

/// Generic name/value pair used by attributes and specifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameValue {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub body: String,
    #[serde(deserialize_with = "null_default")]
    pub body_html: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_default")]
    pub link: String,
    #[serde(deserialize_with = "null_default")]
    pub rating: i64,
    #[serde(deserialize_with = "null_default")]
    pub date: ReviewDate,
    pub profile: Option<ReviewProfile>,
    #[serde(deserialize_with = "null_default")]
    pub vine_program: bool,
    #[serde(deserialize_with = "null_default")]
    pub verified_purchase: bool,
    #[serde(deserialize_with = "null_default")]
    pub review_country: String,
    #[serde(deserialize_with = "null_default")]
    pub is_global_review: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helpful_votes: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewDate {
    #[serde(deserialize_with = "null_default")]
    pub raw: String,
    pub utc: Option<DateTime<Utc>>,
}

/// Reviewer profile; the provider omits most fields for anonymous reviewers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewProfile {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The offer that currently wins the buy box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuyboxWinner {
    #[serde(deserialize_with = "null_default")]
    pub maximum_order_quantity: MaximumOrderQuantity,
    #[serde(deserialize_with = "null_default")]
    pub secondary_buybox: SecondaryBuybox,
    #[serde(deserialize_with = "null_default")]
    pub offer_id: String,
    #[serde(deserialize_with = "null_default")]
    pub new_offers_count: i64,
    #[serde(deserialize_with = "null_default")]
    pub new_offers_from: Price,
    #[serde(deserialize_with = "null_default")]
    pub used_offers_count: i64,
    #[serde(deserialize_with = "null_default")]
    pub used_offers_from: Price,
    #[serde(deserialize_with = "null_default")]
    pub is_prime: bool,
    #[serde(deserialize_with = "null_default")]
    pub is_amazon_fresh: bool,
    #[serde(deserialize_with = "null_default")]
    pub condition: Condition,
    #[serde(deserialize_with = "null_default")]
    pub availability: Availability,
    #[serde(deserialize_with = "null_default")]
    pub fulfillment: Fulfillment,
    #[serde(deserialize_with = "null_default")]
    pub price: Price,
    #[serde(deserialize_with = "null_default")]
    pub shipping: RawText,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaximumOrderQuantity {
    #[serde(deserialize_with = "null_default")]
    pub value: i64,
    #[serde(deserialize_with = "null_default")]
    pub hard_maximum: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryBuybox {
    #[serde(deserialize_with = "null_default")]
    pub offer_id: String,
    #[serde(deserialize_with = "null_default")]
    pub caption: String,
    #[serde(deserialize_with = "null_default")]
    pub price: Price,
    #[serde(deserialize_with = "null_default")]
    pub availability: RawText,
}

/// A field the provider reports only as display text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawText {
    #[serde(deserialize_with = "null_default")]
    pub raw: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    #[serde(deserialize_with = "null_default")]
    pub is_new: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Availability {
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_default")]
    pub availability_type: String,
    #[serde(deserialize_with = "null_default")]
    pub raw: String,
    #[serde(deserialize_with = "null_default")]
    pub dispatch_days: i64,
    #[serde(deserialize_with = "null_default")]
    pub stock_level: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fulfillment {
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_default")]
    pub fulfillment_type: String,
    #[serde(deserialize_with = "null_default")]
    pub standard_delivery: Delivery,
    #[serde(deserialize_with = "null_default")]
    pub fastest_delivery: Delivery,
    #[serde(deserialize_with = "null_default")]
    pub is_sold_by_amazon: bool,
    #[serde(deserialize_with = "null_default")]
    pub is_fulfilled_by_amazon: bool,
    #[serde(deserialize_with = "null_default")]
    pub is_fulfilled_by_third_party: bool,
    #[serde(deserialize_with = "null_default")]
    pub is_sold_by_third_party: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delivery {
    #[serde(deserialize_with = "null_default")]
    pub date: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuyingChoice {
    #[serde(deserialize_with = "null_default")]
    pub price: Price,
    #[serde(deserialize_with = "null_default")]
    pub seller_name: String,
    #[serde(deserialize_with = "null_default")]
    pub seller_link: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    #[serde(deserialize_with = "null_default")]
    pub free_shipping: bool,
    #[serde(deserialize_with = "null_default")]
    pub position: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BestsellersRank {
    #[serde(deserialize_with = "null_default")]
    pub category: String,
    #[serde(deserialize_with = "null_default")]
    pub rank: i64,
    #[serde(deserialize_with = "null_default")]
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequentlyBoughtTogether {
    #[serde(deserialize_with = "null_default")]
    pub total_price: Price,
    #[serde(deserialize_with = "null_default")]
    pub products: Vec<BoughtTogetherProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoughtTogetherProduct {
    #[serde(deserialize_with = "null_default")]
    pub asin: String,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub link: String,
    #[serde(deserialize_with = "null_default")]
    pub price: Price,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_default")]
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlsoBought {
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub asin: String,
    #[serde(deserialize_with = "null_default")]
    pub link: String,
    #[serde(deserialize_with = "null_default")]
    pub image: String,
    #[serde(deserialize_with = "null_default")]
    pub rating: f32,
    #[serde(deserialize_with = "null_default")]
    pub ratings_total: f32,
    #[serde(deserialize_with = "null_default")]
    pub price: Price,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_with_variants(titles: &[&str]) -> ProductData {
        let mut data = ProductData::default();
        data.product.asin = "B000BOOK".to_string();
        data.product.variants = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Variant {
                asin: format!("B00VAR{}", i),
                title: title.to_string(),
                ..Default::default()
            })
            .collect();
        data
    }

    #[test]
    fn test_lookup_variant_first_candidate_wins() {
        let data = book_with_variants(&["Hardcover", "Paperback"]);

        let variant = data.lookup_variant(&["Kindle", "Paperback"]).unwrap();
        assert_eq!(variant.title, "Paperback");
        assert_eq!(variant.asin, "B00VAR1");

        // Candidate order decides, not variant order
        let variant = data.lookup_variant(&["Paperback", "Hardcover"]).unwrap();
        assert_eq!(variant.title, "Paperback");
    }

    #[test]
    fn test_lookup_variant_no_match() {
        let data = book_with_variants(&["Hardcover", "Paperback"]);

        assert!(data.lookup_variant(&["Kindle"]).is_none());
        assert!(data.lookup_variant::<&str>(&[]).is_none());
    }

    #[test]
    fn test_lookup_binding() {
        let data = book_with_variants(&["Audio CD", "Mass Market Paperback", "Library Binding"]);

        assert_eq!(
            data.lookup_binding(Binding::Paperback).unwrap().title,
            "Mass Market Paperback"
        );
        assert_eq!(
            data.lookup_binding(Binding::Hardcover).unwrap().title,
            "Library Binding"
        );
        assert_eq!(
            data.lookup_binding(Binding::Audiobook).unwrap().title,
            "Audio CD"
        );
        assert!(data.lookup_binding(Binding::Digital).is_none());
    }

    #[test]
    fn test_binding_parse() {
        assert_eq!("Paperback".parse::<Binding>(), Ok(Binding::Paperback));
        assert_eq!("kindle".parse::<Binding>(), Ok(Binding::Digital));
        assert_eq!("audio".parse::<Binding>(), Ok(Binding::Audiobook));

        let err = "scroll".parse::<Binding>().unwrap_err();
        assert!(err.contains("Invalid binding"));
        assert!(err.contains("scroll"));
    }

    #[test]
    fn test_is_found() {
        assert!(!ProductData::default().is_found());
        assert!(book_with_variants(&[]).is_found());
    }

    #[test]
    fn test_deserialize_null_fields_as_defaults() {
        let json = r#"{"product":{"asin":"B000TEST","title":null,"variants":null}}"#;
        let data: ProductData = serde_json::from_str(json).unwrap();

        assert!(data.is_found());
        assert_eq!(data.product.title, "");
        assert!(data.product.variants.is_empty());
    }

    #[test]
    fn test_deserialize_nested_nulls() {
        let json = r#"{
            "request_info": null,
            "product": {
                "asin": "B000TEST",
                "buybox_winner": {"price": null, "is_prime": null},
                "variants": [{"asin": "B000PAPR", "title": "Paperback", "price": {"value": null, "raw": null}}],
                "rating_breakdown": {"five_star": {"percentage": null, "count": 3}}
            },
            "also_bought": null
        }"#;
        let data: ProductData = serde_json::from_str(json).unwrap();

        assert_eq!(data.request_info, RequestInfo::default());
        assert_eq!(data.product.buybox_winner.price, Price::default());
        assert!(!data.product.buybox_winner.is_prime);
        assert_eq!(data.product.variants[0].price.value, 0.0);
        assert_eq!(data.product.rating_breakdown.five_star.count, 3);
        assert!(data.also_bought.is_empty());

        // Decoded defaults re-encode as plain values and decode again unchanged
        let reencoded = serde_json::to_string(&data).unwrap();
        assert_eq!(serde_json::from_str::<ProductData>(&reencoded).unwrap(), data);
    }

    #[test]
    fn test_deserialize_partial_response() {
        let json = r#"{
            "request_info": {
                "success": true,
                "credits_used": 12,
                "credits_remaining": 988,
                "credits_reset_at": "2026-11-01T00:00:00.000Z"
            },
            "request_parameters": {"amazon_domain": "amazon.com", "type": "product", "gtin": "9780441013593"},
            "product": {
                "asin": "0441013597",
                "title": "Dune",
                "variants": [
                    {"asin": "B00B7NPRY8", "title": "Kindle", "price": {"symbol": "$", "value": 9.99, "currency": "USD", "raw": "$9.99"}}
                ],
                "top_reviews": [
                    {"id": "R1", "rating": 5, "profile": {"name": "Paul"}, "date": {"raw": "Reviewed in the United States", "utc": "2024-03-02T00:00:00.000Z"}}
                ],
                "buybox_winner": {"price": {"value": 10.29, "currency": "USD"}, "availability": {"type": "in_stock", "raw": "In Stock"}}
            },
            "also_bought": [{"asin": "0593099324", "title": "Dune Messiah", "rating": 4.6}]
        }"#;

        let data: ProductData = serde_json::from_str(json).unwrap();
        assert!(data.request_info.success);
        assert_eq!(data.request_info.credits_remaining, 988);
        assert!(data.request_info.credits_reset_at.is_some());
        assert_eq!(data.request_parameters.gtin.as_deref(), Some("9780441013593"));
        assert_eq!(data.product.title, "Dune");
        assert_eq!(data.product.variants[0].price.value, 9.99);
        assert_eq!(
            data.product.top_reviews[0].profile.as_ref().unwrap().name,
            "Paul"
        );
        assert_eq!(data.product.buybox_winner.availability.availability_type, "in_stock");
        assert_eq!(data.also_bought[0].title, "Dune Messiah");
        assert!(data.frequently_bought_together.products.is_empty());
    }
}

//! schema.org JSON-LD document types.
//!
//! Only the properties the site emits are modelled. Top-level documents carry
//! `@context`; nested nodes carry only `@type`.

use serde::Serialize;

/// `@context` of every top-level document.
pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Offer availability for bookable packages.
pub const IN_STOCK: &str = "https://schema.org/InStock";
/// Offer availability for everything else.
pub const OUT_OF_STOCK: &str = "https://schema.org/OutOfStock";

/// A top-level JSON-LD document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredData {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(flatten)]
    pub document: Document,
}

impl From<Document> for StructuredData {
    fn from(document: Document) -> Self {
        Self {
            context: SCHEMA_CONTEXT,
            document,
        }
    }
}

/// The kinds of document the site publishes, tagged by `@type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type")]
pub enum Document {
    Organization(Organization),
    TravelAgency(TravelAgency),
    TouristTrip(TouristTrip),
    WebPage(WebPage),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_point: Option<ContactPoint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub contact_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelAgency {
    pub name: String,
    pub url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub makes_offer: Vec<Offer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TouristTrip {
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<ItemList>,
    pub offers: Offer,
    pub provider: Provider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPage {
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_entity: Option<ItemList>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub price: String,
    pub price_currency: String,
    pub url: String,
    pub availability: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_offered: Option<TripSummary>,
}

/// A trip referenced from an offer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSummary {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub description: String,
    pub url: String,
}

/// The agency behind a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provider {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemList {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub number_of_items: usize,
    pub item_list_element: Vec<ListItem>,
}

impl ItemList {
    /// Number the items from 1 and wrap them in a list.
    #[must_use]
    pub fn numbered(items: Vec<ListItem>) -> Self {
        let item_list_element: Vec<ListItem> = items
            .into_iter()
            .zip(1..)
            .map(|(item, position)| ListItem { position, ..item })
            .collect();

        Self {
            kind: "ItemList",
            number_of_items: item_list_element.len(),
            item_list_element,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub position: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Place>,
}

impl ListItem {
    /// A linked entry (position assigned by [`ItemList::numbered`]).
    #[must_use]
    pub fn link(name: String, description: String, url: String) -> Self {
        Self {
            kind: "ListItem",
            position: 0,
            name: Some(name),
            description: Some(description),
            url: Some(url),
            item: None,
        }
    }

    /// An itinerary stop (position assigned by [`ItemList::numbered`]).
    #[must_use]
    pub fn place(name: String) -> Self {
        Self {
            kind: "ListItem",
            position: 0,
            name: None,
            description: None,
            url: None,
            item: Some(Place {
                kind: "Place",
                name,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn top_level_documents_carry_context_and_type() {
        let data = StructuredData::from(Document::WebPage(WebPage {
            name: "About us".to_owned(),
            description: "Who we are".to_owned(),
            url: "https://wayfarer.travel/about".to_owned(),
            main_entity: None,
        }));

        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "@context": "https://schema.org",
                "@type": "WebPage",
                "name": "About us",
                "description": "Who we are",
                "url": "https://wayfarer.travel/about"
            })
        );
    }

    #[test]
    fn numbered_lists_start_at_one() {
        let list = ItemList::numbered(vec![
            ListItem::place("Lisbon".to_owned()),
            ListItem::place("Porto".to_owned()),
        ]);

        assert_eq!(list.number_of_items, 2);
        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value["itemListElement"][0]["position"], 1);
        assert_eq!(value["itemListElement"][1]["item"]["name"], "Porto");
        assert_eq!(value["numberOfItems"], 2);
    }
}

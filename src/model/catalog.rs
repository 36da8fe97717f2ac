//! Read-only catalog records: services, tags (packages) and tag categories

use serde::{Deserialize, Serialize};

use super::{flexible_id, null_as_default, or_dash, rupees};

/// A bookable service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    #[serde(deserialize_with = "flexible_id")]
    pub service_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub short_description: Option<String>,
    pub regular_price: Option<f64>,
    pub category_name: Option<String>,
    pub sub_category_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub locations: Vec<String>,
}

impl Service {
    pub fn price_display(&self) -> String {
        rupees(self.regular_price)
    }

    pub fn locations_display(&self) -> String {
        or_dash(Some(&self.locations.join(", ")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceName {
    #[serde(deserialize_with = "flexible_id")]
    pub service_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// A tag groups services into a package, optionally discounted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tag {
    #[serde(deserialize_with = "flexible_id")]
    pub tag_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tag_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tag_short_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub service_names: Vec<ServiceName>,
    pub discount_value: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub updated_at_str: Option<String>,
}

impl Tag {
    pub fn services_display(&self) -> String {
        let names: Vec<&str> = self.service_names.iter().map(|s| s.name.as_str()).collect();
        or_dash(Some(&names.join(", ")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TagCategory {
    #[serde(deserialize_with = "flexible_id")]
    pub tag_category_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tag_category_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tag_category_short_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tag_list: Vec<Tag>,
    pub updated_at_str: Option<String>,
}

impl TagCategory {
    /// Names of the packages in this category
    pub fn packages_display(&self) -> String {
        let names: Vec<&str> = self.tag_list.iter().map(|t| t.tag_name.as_str()).collect();
        or_dash(Some(&names.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_display_helpers() {
        let service: Service = serde_json::from_str(
            r#"{"serviceId": 4, "name": "Physiotherapy", "regularPrice": 799,
                "locations": ["Bengaluru", "Pune"]}"#,
        )
        .unwrap();
        assert_eq!(service.service_id, "4");
        assert_eq!(service.price_display(), "₹ 799");
        assert_eq!(service.locations_display(), "Bengaluru, Pune");

        let bare = Service::default();
        assert_eq!(bare.price_display(), "--");
        assert_eq!(bare.locations_display(), "--");
    }

    #[test]
    fn test_tag_and_category_join_names() {
        let category: TagCategory = serde_json::from_str(
            r#"{"tagCategoryId": "TC1", "tagCategoryName": "Elder care",
                "tagList": [
                    {"tagId": "T1", "tagName": "Recovery",
                     "serviceNames": [{"serviceId": 1, "name": "Nursing"}, {"serviceId": 2, "name": "Physio"}]},
                    {"tagId": "T2", "tagName": "Wellness", "serviceNames": null}
                ]}"#,
        )
        .unwrap();
        assert_eq!(category.packages_display(), "Recovery, Wellness");
        assert_eq!(category.tag_list[0].services_display(), "Nursing, Physio");
        assert_eq!(category.tag_list[1].services_display(), "--");
    }
}

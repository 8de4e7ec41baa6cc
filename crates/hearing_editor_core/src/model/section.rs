//! Hearing section and section image model.
//!
//! # Responsibility
//! - Define the section entity stored in the `sections` slice.
//! - Own the main-image edit rule shared by reducers and selectors.
//!
//! # Invariants
//! - A section is keyed by its server `id`, or by `front_id` before first save.
//! - The main image is the first element of `images`.
//! - On the main image, `image` (uploaded file) and `url` (external link) are
//!   mutually exclusive: setting one clears the other, even when the new
//!   value is rejected.

use crate::model::fields::{
    deserialize_optional_id, deserialize_text, merge_field, ExtraFields, FieldMergeError,
};
use crate::model::EntityId;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Image field holding an uploaded file reference.
pub const IMAGE_FIELD: &str = "image";
/// Image field holding an external URL.
pub const URL_FIELD: &str = "url";

/// One image attached to a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionImage {
    /// Uploaded file reference (path or data URL).
    #[serde(default, deserialize_with = "deserialize_text")]
    pub image: String,
    /// External image URL.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub url: String,
    /// Caption, title and any other server-side image fields.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl SectionImage {
    /// Returns the active reference: the uploaded file, else the URL.
    pub fn source(&self) -> Option<&str> {
        if !self.image.is_empty() {
            Some(self.image.as_str())
        } else if !self.url.is_empty() {
            Some(self.url.as_str())
        } else {
            None
        }
    }
}

/// Section entity from the normalized `sections` slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Server id; absent until the section has been saved.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<EntityId>,
    /// Client-generated id for sections added in the editor.
    #[serde(
        rename = "frontId",
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub front_id: Option<EntityId>,
    #[serde(default)]
    pub images: Vec<SectionImage>,
    /// Per-language texts (`title`, `abstract`, `content`), `type` and the rest.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Generates a client-side id for a section that has no server id yet.
pub fn new_front_id() -> EntityId {
    Uuid::new_v4().to_string()
}

impl Section {
    /// Creates an empty unsaved section with a caller-provided front id.
    pub fn with_front_id(front_id: impl Into<EntityId>) -> Self {
        Self {
            front_id: Some(front_id.into()),
            ..Self::default()
        }
    }

    /// Returns the normalized-map key: server id first, then front id.
    pub fn key(&self) -> Option<&str> {
        self.id.as_deref().or(self.front_id.as_deref())
    }

    /// Returns the main image, if any.
    pub fn main_image(&self) -> Option<&SectionImage> {
        self.images.first()
    }

    /// Returns a copy with one main-image field replaced.
    ///
    /// Starts from the current main image (or an empty one), applies the
    /// edit, clears the competing reference, and leaves the result as the
    /// only image of the section. A malformed `image` or `url` value keeps
    /// that reference as it was but still clears the competing one.
    pub fn with_main_image_field(&self, field: &str, value: Value) -> Result<Self, FieldMergeError> {
        let current = self.main_image().cloned().unwrap_or_default();
        let mut image = match merge_field(&current, field, value) {
            Ok(image) => image,
            Err(err) if is_reference_field(field) => {
                warn!("event=image_reference_rejected module=model field={field} error={err}");
                current
            }
            Err(err) => return Err(err),
        };
        match field {
            IMAGE_FIELD => image.url.clear(),
            URL_FIELD => image.image.clear(),
            _ => {}
        }

        let mut section = self.clone();
        section.images = vec![image];
        Ok(section)
    }
}

fn is_reference_field(field: &str) -> bool {
    field == IMAGE_FIELD || field == URL_FIELD
}

#[cfg(test)]
mod tests {
    use super::{new_front_id, Section, SectionImage, IMAGE_FIELD, URL_FIELD};
    use serde_json::json;

    #[test]
    fn new_front_generates_distinct_front_ids() {
        let first = Section::with_front_id(new_front_id());
        let second = Section::with_front_id(new_front_id());
        assert!(first.front_id.is_some());
        assert_ne!(first.front_id, second.front_id);
        assert_eq!(first.key(), first.front_id.as_deref());
    }

    #[test]
    fn key_prefers_server_id() {
        let mut section = Section::with_front_id("f1");
        section.id = Some("42".to_string());
        assert_eq!(section.key(), Some("42"));
    }

    #[test]
    fn setting_image_clears_url() {
        let section = Section {
            images: vec![SectionImage {
                url: "https://example.org/a.png".to_string(),
                ..SectionImage::default()
            }],
            ..Section::with_front_id("f1")
        };

        let updated = section
            .with_main_image_field(IMAGE_FIELD, json!("upload.png"))
            .expect("image edit");
        assert_eq!(updated.images.len(), 1);
        assert_eq!(updated.images[0].image, "upload.png");
        assert_eq!(updated.images[0].url, "");
        assert_eq!(updated.images[0].source(), Some("upload.png"));
    }

    #[test]
    fn setting_url_clears_image() {
        let section = Section::with_front_id("f1")
            .with_main_image_field(IMAGE_FIELD, json!("upload.png"))
            .expect("image edit");

        let updated = section
            .with_main_image_field(URL_FIELD, json!("https://example.org/b.png"))
            .expect("url edit");
        assert_eq!(updated.images[0].image, "");
        assert_eq!(updated.images[0].url, "https://example.org/b.png");
    }

    #[test]
    fn malformed_image_value_still_clears_url() {
        let section = Section::with_front_id("f1")
            .with_main_image_field(URL_FIELD, json!("https://example.org/a.png"))
            .expect("url edit");

        let updated = section
            .with_main_image_field(IMAGE_FIELD, json!(42))
            .expect("reference edit is never rejected");
        assert_eq!(updated.images[0].url, "");
        assert_eq!(updated.images[0].image, "");
        assert_eq!(updated.images[0].source(), None);
    }

    #[test]
    fn caption_edit_keeps_references_and_drops_extra_images() {
        let section = Section {
            images: vec![
                SectionImage {
                    image: "main.png".to_string(),
                    ..SectionImage::default()
                },
                SectionImage {
                    image: "second.png".to_string(),
                    ..SectionImage::default()
                },
            ],
            ..Section::with_front_id("f1")
        };

        let updated = section
            .with_main_image_field("caption", json!({"fi": "Kuvateksti"}))
            .expect("caption edit");
        assert_eq!(updated.images.len(), 1);
        assert_eq!(updated.images[0].image, "main.png");
        assert_eq!(
            updated.images[0].extra.get("caption"),
            Some(&json!({"fi": "Kuvateksti"}))
        );
    }

    #[test]
    fn null_references_deserialize_as_empty() {
        let image: SectionImage =
            serde_json::from_value(json!({"image": null, "url": "https://x/y.png"}))
                .expect("image should deserialize");
        assert_eq!(image.image, "");
        assert_eq!(image.source(), Some("https://x/y.png"));
    }
}

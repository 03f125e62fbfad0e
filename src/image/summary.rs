//! Image list, history and inspect responses
//!
//! Three queries, three shapes. They share a few field names but differ in
//! representation (`Created` is epoch seconds in list and history, a
//! daemon-formatted string on inspect) and are not interchangeable.

use crate::error::{require, ApiError, Result};
use crate::shape::{Shape, ShapeKind};
use crate::time::{from_epoch, null_as_default};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row returned when listing images
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Image {
    /// Epoch seconds
    pub created: i64,
    pub id: String,
    pub parent_id: String,
    /// `repo:tag` references; `<none>:<none>` for dangling images
    #[serde(deserialize_with = "null_as_default")]
    pub repo_tags: Vec<String>,
    /// Bytes in this image's own layer
    pub size: i64,
    /// Bytes including all parent layers
    pub virtual_size: i64,
}

impl Image {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        from_epoch(self.created)
    }

    pub fn is_dangling(&self) -> bool {
        self.repo_tags.iter().all(|tag| tag == "<none>:<none>")
    }
}

impl Shape for Image {
    const KIND: ShapeKind = ShapeKind::Image;

    fn validate(&self) -> Result<()> {
        require(Self::KIND.wire_name(), "Id", &self.id)
    }
}

/// One entry of an image's history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageLayer {
    pub id: String,
    /// Epoch seconds
    pub created: i64,
    /// Build instruction that produced the layer
    pub created_by: String,
    pub comment: String,
    pub size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl ImageLayer {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        from_epoch(self.created)
    }
}

impl Shape for ImageLayer {
    const KIND: ShapeKind = ShapeKind::ImageLayer;

    fn validate(&self) -> Result<()> {
        require(Self::KIND.wire_name(), "Id", &self.id)
    }
}

/// Image inspection result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageInfo {
    /// Daemon-formatted creation time, kept verbatim
    pub created: String,
    /// Container the image was committed from, if any
    pub container: String,
    pub id: String,
    pub parent: String,
    pub size: i64,
}

impl Shape for ImageInfo {
    const KIND: ShapeKind = ShapeKind::ImageInfo;

    fn validate(&self) -> Result<()> {
        require(Self::KIND.wire_name(), "Id", &self.id)
    }
}

/// One entry of an image removal response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageDelete {
    /// Image ID that was removed
    #[serde(skip_serializing_if = "String::is_empty")]
    pub deleted: String,
    /// Reference that was untagged
    #[serde(skip_serializing_if = "String::is_empty")]
    pub untagged: String,
}

impl Shape for ImageDelete {
    const KIND: ShapeKind = ShapeKind::ImageDelete;

    fn validate(&self) -> Result<()> {
        if self.deleted.is_empty() && self.untagged.is_empty() {
            return Err(ApiError::validation(
                Self::KIND.wire_name(),
                "Deleted",
                "or Untagged must be set",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::construct;
    use serde_json::json;

    #[test]
    fn test_image_row() {
        let image: Image = construct(json!({
            "RepoTags": ["ubuntu:12.04", "ubuntu:precise", "ubuntu:latest"],
            "Id": "8dbd9e392a964056420e5d58ca5cc376ef18e2de93b5cc90e868a1bbc8318c1c",
            "Created": 1365714795,
            "Size": 131506275,
            "VirtualSize": 131506275
        }))
        .unwrap();
        assert_eq!(image.repo_tags.len(), 3);
        assert_eq!(image.parent_id, "");
        assert!(!image.is_dangling());
        assert_eq!(image.created_at().unwrap().timestamp(), 1_365_714_795);
    }

    #[test]
    fn test_dangling_image() {
        let image = Image {
            id: "abc".to_string(),
            repo_tags: vec!["<none>:<none>".to_string()],
            ..Image::default()
        };
        assert!(image.is_dangling());
    }

    #[test]
    fn test_history_entry() {
        let layer: ImageLayer = construct(json!({
            "Id": "3db9c44f45209632d6050b35958829c3a2aa256d81b9a7be45b362ff85c54710",
            "Created": 1398108230,
            "CreatedBy": "/bin/sh -c #(nop) ADD file:eb15dbd63394e063b805a3c32ca7bf0266ef64676d5a6fab4801f2e81e2a5148 in /",
            "Tags": null,
            "Size": 0,
            "Comment": ""
        }))
        .unwrap();
        assert!(layer.tags.is_empty());
        assert!(layer.created_by.starts_with("/bin/sh"));
    }

    #[test]
    fn test_inspect_keeps_string_timestamp() {
        let info: ImageInfo = construct(json!({
            "Created": "2013-03-23T22:24:18.818426-07:00",
            "Container": "3d67245a8d72ecf13f33dffac9f79dcdf70f75acb84d308770391510e0c23ad0",
            "Id": "b750fe79269d2ec9a3c593ef05b4332b1d1a02a62b4accb2c21d589ff2f5f2dc",
            "Parent": "27cf784147099545",
            "Size": 6824592
        }))
        .unwrap();
        assert_eq!(info.created, "2013-03-23T22:24:18.818426-07:00");
        assert_eq!(info.size, 6_824_592);
    }

    #[test]
    fn test_delete_entries() {
        let entries: Vec<ImageDelete> = serde_json::from_value(json!([
            {"Untagged": "3e2f21a89f"},
            {"Deleted": "3e2f21a89f"},
            {"Deleted": "53b4f83ac9"}
        ]))
        .unwrap();
        assert!(entries.iter().all(|e| e.validate().is_ok()));
        assert_eq!(
            serde_json::to_value(&entries[0]).unwrap(),
            json!({"Untagged": "3e2f21a89f"})
        );
        assert!(ImageDelete::default().validate().is_err());
    }
}

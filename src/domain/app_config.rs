use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::commission::ReferralCommission;
use crate::domain::snapshot::{MergeFields, merge_field, merge_list, merge_object};

/// An image shown in the client app's home screen slider
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SliderImage {
    pub id: String,
    pub url: String,
    pub alt: String,
    /// 0-based display position
    pub order: u32,
    /// RFC 3339 timestamp
    pub created_at: String,
}

impl MergeFields for SliderImage {
    fn merge_fields(fields: &Map<String, Value>) -> Self {
        Self {
            id: merge_field(fields, "id"),
            url: merge_field(fields, "url"),
            alt: merge_field(fields, "alt"),
            order: merge_field(fields, "order"),
            created_at: merge_field(fields, "createdAt"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// The single configuration document stored at `STORE.config_path`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub logo_url: String,
    pub app_name: String,
    pub slider_images: Vec<SliderImage>,
    pub support_url: String,
    pub tutorial_video_id: String,
    pub referral_commission: ReferralCommission,
}

impl AppConfig {
    /// Builds local state from a store snapshot.
    ///
    /// Every field is read on its own, down to the commission levels and
    /// slider entries: a missing, null or malformed field takes its default
    /// while the rest of the document is kept. An absent document yields the
    /// full default configuration.
    pub fn from_snapshot(snapshot: Option<&Value>) -> Self {
        let fields = match snapshot {
            None | Some(Value::Null) => return Self::default(),
            Some(Value::Object(fields)) => fields,
            Some(other) => {
                log::warn!("Ignoring non-object config snapshot: {}", other);
                return Self::default();
            }
        };

        Self::merge_fields(fields)
    }

    /// The whole document as it is written back to the store.
    pub fn to_document(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Appends a slider image. A blank url is ignored.
    pub fn add_slider_image(&mut self, url: &str, alt: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }
        let now = Utc::now();
        let order = self.slider_images.len() as u32;
        self.slider_images.push(SliderImage {
            id: format!("slider_{}_{}", now.timestamp_millis(), order),
            url: url.to_string(),
            alt: alt.trim().to_string(),
            order,
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        });
        true
    }

    pub fn remove_slider_image(&mut self, index: usize) -> Option<SliderImage> {
        if index >= self.slider_images.len() {
            return None;
        }
        let removed = self.slider_images.remove(index);
        self.reorder_slider_images();
        Some(removed)
    }

    pub fn move_slider_image(&mut self, index: usize, direction: MoveDirection) -> bool {
        let len = self.slider_images.len();
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => index.checked_add(1),
        };
        match target {
            Some(target) if index < len && target < len => {
                self.slider_images.swap(index, target);
                self.reorder_slider_images();
                true
            }
            _ => false,
        }
    }

    fn reorder_slider_images(&mut self) {
        for (idx, image) in self.slider_images.iter_mut().enumerate() {
            image.order = idx as u32;
        }
    }
}

impl MergeFields for AppConfig {
    fn merge_fields(fields: &Map<String, Value>) -> Self {
        Self {
            logo_url: merge_field(fields, "logoUrl"),
            app_name: merge_field(fields, "appName"),
            slider_images: merge_list(fields, "sliderImages"),
            support_url: merge_field(fields, "supportUrl"),
            tutorial_video_id: merge_field(fields, "tutorialVideoId"),
            referral_commission: merge_object::<ReferralCommission>(fields, "referralCommission")
                .normalized(),
        }
    }
}

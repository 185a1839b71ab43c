//! trailpost/crates/tp-core/src/lib.rs
//!
//! The central domain types and interface definitions for trailpost.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;

    #[test]
    fn post_detail_round_trips_through_json() {
        let post = Post {
            post_id: 1,
            title: "A week in Hokkaido".to_string(),
            description: "Snow, onsen, ramen.".to_string(),
            user_id: Some(7),
            images: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&post).unwrap();
        let back: Post = serde_json::from_value(json).unwrap();
        assert_eq!(back.post_id, 1);
        assert_eq!(back.user_id, Some(7));
    }

    #[test]
    fn post_patch_defaults_touch_nothing() {
        let patch = PostPatch::default();
        assert!(patch.title.is_none());
        assert!(patch.description.is_none());
        assert!(patch.images.is_none());
    }
}

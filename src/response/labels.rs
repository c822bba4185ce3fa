//! Field-label template for media-mode envelopes.
//!
//! Deployed variants of this API disagree on label casing ("Username" vs
//! `username`); the casing is a configuration choice, not six hardcoded
//! response shapes.

use crate::core::config;

/// Label casing variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// Human-facing "Title Case" labels
    TitleCase,
    /// Machine-facing snake_case labels
    SnakeCase,
}

impl LabelStyle {
    /// Resolve the style from `LABEL_STYLE`; unrecognized values fall back to
    /// TitleCase.
    pub fn from_env() -> Self {
        match config::LABEL_STYLE.as_str() {
            "snake" => LabelStyle::SnakeCase,
            _ => LabelStyle::TitleCase,
        }
    }

    pub fn labels(&self) -> &'static LabelSet {
        match self {
            LabelStyle::TitleCase => &TITLE_LABELS,
            LabelStyle::SnakeCase => &SNAKE_LABELS,
        }
    }
}

/// The complete set of configurable field labels.
#[derive(Debug)]
pub struct LabelSet {
    pub username: &'static str,
    pub full_name: &'static str,
    pub user_id: &'static str,
    pub verified: &'static str,
    pub business: &'static str,
    pub followers: &'static str,
    pub following: &'static str,
    pub total_posts: &'static str,
    pub bio: &'static str,
    pub avatar: &'static str,
    pub media_type: &'static str,
    pub dimensions: &'static str,
    pub duration: &'static str,
    pub upload_date: &'static str,
    pub shortcode: &'static str,
    pub views: &'static str,
    pub likes: &'static str,
    pub comments: &'static str,
    pub thumbnail: &'static str,
    pub video_url: &'static str,
    pub image_url: &'static str,
}

pub static TITLE_LABELS: LabelSet = LabelSet {
    username: "Username",
    full_name: "Full Name",
    user_id: "User ID",
    verified: "Verified",
    business: "Business",
    followers: "Followers",
    following: "Following",
    total_posts: "Total Posts",
    bio: "Bio",
    avatar: "HD Avatar",
    media_type: "Type",
    dimensions: "Dimensions",
    duration: "Duration",
    upload_date: "Upload Date",
    shortcode: "Shortcode",
    views: "Views",
    likes: "Likes",
    comments: "Comments",
    thumbnail: "Thumbnail",
    video_url: "Video URL",
    image_url: "Image URL",
};

pub static SNAKE_LABELS: LabelSet = LabelSet {
    username: "username",
    full_name: "full_name",
    user_id: "user_id",
    verified: "verified",
    business: "business",
    followers: "followers",
    following: "following",
    total_posts: "total_posts",
    bio: "bio",
    avatar: "avatar",
    media_type: "type",
    dimensions: "dimensions",
    duration: "duration",
    upload_date: "upload_date",
    shortcode: "shortcode",
    views: "views",
    likes: "likes",
    comments: "comments",
    thumbnail: "thumbnail",
    video_url: "video_url",
    image_url: "image_url",
};

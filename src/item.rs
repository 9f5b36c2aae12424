use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The capabilities the image processor needs from a feed item.
pub trait Item {
    /// Whether the item already carries an image.
    fn has_image(&self) -> bool;

    /// HTML body of the item, if any.
    fn content(&self) -> Option<&str>;

    fn set_image(&mut self, url: String);
}

impl<T: Item + ?Sized> Item for &mut T {
    fn has_image(&self) -> bool {
        (**self).has_image()
    }

    fn content(&self) -> Option<&str> {
        (**self).content()
    }

    fn set_image(&mut self, url: String) {
        (**self).set_image(url)
    }
}

impl<T: Item + ?Sized> Item for Box<T> {
    fn has_image(&self) -> bool {
        (**self).has_image()
    }

    fn content(&self) -> Option<&str> {
        (**self).content()
    }

    fn set_image(&mut self, url: String) {
        (**self).set_image(url)
    }
}

/// A syndicated entry as read from an RSS or Atom feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

impl FeedItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl Item for FeedItem {
    fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(|image| !image.is_empty())
    }

    fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    fn set_image(&mut self, url: String) {
        self.image = Some(url);
    }
}
